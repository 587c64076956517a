pub mod center;

pub use center::{NotificationCenter, NOTIFICATION_DISMISSED_EVENT, NOTIFICATION_PUBLISHED_EVENT};
