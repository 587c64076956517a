use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Assistant,
}

/// One entry in a conversation transcript. Transcripts are append-only:
/// messages are never mutated or reordered after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: String,
    pub sender: MessageSender,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: format!("msg_{}", uuid::Uuid::new_v4()),
            sender: MessageSender::User,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: format!("msg_{}", uuid::Uuid::new_v4()),
            sender: MessageSender::Assistant,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_sender_and_unique_ids() {
        let user = ConversationMessage::user("What's my balance?");
        let reply = ConversationMessage::assistant("Checking now.");

        assert_eq!(user.sender, MessageSender::User);
        assert_eq!(reply.sender, MessageSender::Assistant);
        assert!(user.id.starts_with("msg_"));
        assert_ne!(user.id, reply.id);
    }
}
