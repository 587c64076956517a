pub mod identity;
pub mod message;
pub mod notification;
pub mod portfolio;
pub mod theme;

pub use identity::UserIdentity;
pub use message::{ConversationMessage, MessageSender};
pub use notification::{Notification, NotificationKind};
pub use portfolio::{CurrencyBalance, PaymentCard, ProfileStat};
pub use theme::{ThemeMode, ThemePreference};
