pub mod engine;
pub mod generator;

pub use engine::{ChatError, ConversationEngine, CONVERSATION_UPDATED_EVENT};
pub use generator::{ReplyGenerator, ScriptedReplyGenerator};
