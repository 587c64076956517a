use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use finhub_core::bus::{Bus, BusEventDef};
use finhub_core::TaskRegistry;
use finhub_types::{ConversationMessage, MessageSender};

use crate::generator::ReplyGenerator;

/// Published after any transcript change (user append or assistant reply).
pub static CONVERSATION_UPDATED_EVENT: BusEventDef = BusEventDef::new("conversation.updated");

const DEFAULT_REPLY_DELAY: Duration = Duration::from_secs(1);
const REPLY_TASK: &str = "reply";

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The message was blank after trimming; nothing was appended.
    #[error("message is empty")]
    EmptyInput,
}

struct ConversationState {
    messages: Vec<ConversationMessage>,
    pending_reply: bool,
}

/// Owns one conversation transcript and its simulated reply pipeline.
///
/// The transcript is append-only. At most one assistant reply is in flight:
/// `pending_reply` is checked and set under the state lock before a reply
/// task is scheduled, and user messages sent while a reply is pending append
/// without starting a second cycle.
#[derive(Clone)]
pub struct ConversationEngine {
    state: Arc<RwLock<ConversationState>>,
    generator: Arc<dyn ReplyGenerator>,
    tasks: Arc<TaskRegistry>,
    reply_delay: Duration,
    bus: Option<Arc<Bus>>,
}

impl ConversationEngine {
    pub fn new(generator: Arc<dyn ReplyGenerator>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ConversationState {
                messages: Vec::new(),
                pending_reply: false,
            })),
            generator,
            tasks: Arc::new(TaskRegistry::new()),
            reply_delay: DEFAULT_REPLY_DELAY,
            bus: None,
        }
    }

    /// Simulated backend round-trip latency before each assistant reply.
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    pub fn with_bus(mut self, bus: Arc<Bus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Seeds the transcript with an opening assistant message. Intended for
    /// the greeting shown when the chat is first opened.
    pub async fn with_greeting(self, greeting: impl Into<String>) -> Self {
        {
            let mut state = self.state.write().await;
            state.messages.push(ConversationMessage::assistant(greeting));
        }
        self
    }

    /// Appends the user's message and, when no reply is already pending,
    /// schedules one simulated reply. Returns the appended message's id.
    ///
    /// Blank input is rejected before any mutation. Messages sent while a
    /// reply is pending still append, but no second reply cycle starts.
    pub async fn send_user_message(&self, text: &str) -> Result<String, ChatError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyInput);
        }

        let message = ConversationMessage::user(trimmed);
        let message_id = message.id.clone();

        let start_reply = {
            let mut state = self.state.write().await;
            state.messages.push(message);
            if state.pending_reply {
                false
            } else {
                state.pending_reply = true;
                true
            }
        };
        self.publish_updated();

        if start_reply {
            self.schedule_reply();
        } else {
            tracing::debug!("reply already pending, queued user message only");
        }

        Ok(message_id)
    }

    pub async fn messages(&self) -> Vec<ConversationMessage> {
        self.state.read().await.messages.clone()
    }

    pub async fn pending_reply(&self) -> bool {
        self.state.read().await.pending_reply
    }

    /// Tears the engine down: the scheduled reply (if any) is cancelled so no
    /// late completion can append to a discarded conversation.
    pub async fn shutdown(&self) {
        self.tasks.cancel_all();
        let mut state = self.state.write().await;
        state.pending_reply = false;
    }

    fn schedule_reply(&self) {
        let state = Arc::clone(&self.state);
        let generator = Arc::clone(&self.generator);
        let tasks = Arc::clone(&self.tasks);
        let bus = self.bus.clone();
        let delay = self.reply_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let transcript = {
                let state = state.read().await;
                state.messages.clone()
            };
            let content = generator.generate_reply(&transcript).await;

            // Append and clear the pending flag in one critical section so
            // no other callback observes a half-finished cycle.
            {
                let mut state = state.write().await;
                state.messages.push(ConversationMessage::assistant(content));
                state.pending_reply = false;
            }
            tasks.complete(REPLY_TASK);
            if let Some(bus) = &bus {
                bus.publish(
                    &CONVERSATION_UPDATED_EVENT,
                    serde_json::json!({ "sender": MessageSender::Assistant }),
                );
            }
        });
        self.tasks.insert(REPLY_TASK, handle);
    }

    fn publish_updated(&self) {
        if let Some(bus) = &self.bus {
            bus.publish(
                &CONVERSATION_UPDATED_EVENT,
                serde_json::json!({ "sender": MessageSender::User }),
            );
        }
    }
}
