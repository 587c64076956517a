use async_trait::async_trait;
use once_cell::sync::Lazy;

use finhub_types::{ConversationMessage, MessageSender};

/// Boundary the engine asks for assistant content. Implementations receive
/// the transcript so far and return the reply text; the engine itself is
/// agnostic to reply content.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate_reply(&self, transcript: &[ConversationMessage]) -> String;
}

static SCRIPT: Lazy<Vec<(&[&str], &str)>> = Lazy::new(|| {
    vec![
        (
            &["balance", "wallet", "money"][..],
            "Your total balance across all currencies is $28,203.91. Your USD account is up 2.34% today.",
        ),
        (
            &["exchange", "rate", "transfer", "convert"][..],
            "The USD/EUR exchange rate is favorable for transfers right now. Open the Exchange tab for live rates.",
        ),
        (
            &["card", "cards"][..],
            "You have two active cards: a Platinum card in USD and a Business card in EUR. Both are ready to use.",
        ),
        (
            &["secure", "security", "2fa"][..],
            "Your account security has been enhanced with 2FA. No further action is needed.",
        ),
    ]
});

const FALLBACK_REPLY: &str =
    "I understand you're asking about your finances. Let me help you with that!";

/// Keyword-matched canned replies standing in for a real assistant backend.
pub struct ScriptedReplyGenerator;

impl ScriptedReplyGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ScriptedReplyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplyGenerator for ScriptedReplyGenerator {
    async fn generate_reply(&self, transcript: &[ConversationMessage]) -> String {
        let last_user_message = transcript
            .iter()
            .rev()
            .find(|m| m.sender == MessageSender::User)
            .map(|m| m.content.to_lowercase())
            .unwrap_or_default();

        for (keywords, reply) in SCRIPT.iter() {
            if keywords.iter().any(|k| last_user_message.contains(k)) {
                return (*reply).to_string();
            }
        }
        FALLBACK_REPLY.to_string()
    }
}
