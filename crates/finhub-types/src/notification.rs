use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Info,
}

/// A transient status alert shown above the main shell.
///
/// Lives in the notification center's queue in publish order until it is
/// dismissed by the user or its expiry timer fires, whichever happens first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    /// `None` means the notification stays until dismissed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_expire_after: Option<Duration>,
}

impl Notification {
    pub fn new(
        id: impl Into<String>,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        auto_expire_after: Option<Duration>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            message: message.into(),
            created_at: Utc::now(),
            auto_expire_after,
        }
    }
}
