use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use finhub_core::bus::{Bus, BusEventDef};
use finhub_core::id::{self, Prefix};
use finhub_core::TaskRegistry;
use finhub_types::{Notification, NotificationKind};

pub static NOTIFICATION_PUBLISHED_EVENT: BusEventDef = BusEventDef::new("notification.published");
pub static NOTIFICATION_DISMISSED_EVENT: BusEventDef = BusEventDef::new("notification.dismissed");

/// Owns the queue of transient status alerts.
///
/// Notifications are kept in publish order. Each one with a finite expiry
/// gets exactly one timer task, registered under the notification id so a
/// manual dismissal can cancel it; the timer and `dismiss` share one removal
/// path, and whichever runs first wins while the loser is a no-op.
#[derive(Clone)]
pub struct NotificationCenter {
    items: Arc<RwLock<Vec<Notification>>>,
    timers: Arc<TaskRegistry>,
    bus: Option<Arc<Bus>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            timers: Arc::new(TaskRegistry::new()),
            bus: None,
        }
    }

    pub fn with_bus(mut self, bus: Arc<Bus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Appends a notification at the tail and returns its id. A finite
    /// `auto_expire_after` schedules the expiry timer.
    pub async fn publish(
        &self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        auto_expire_after: Option<Duration>,
    ) -> String {
        let notification = Notification::new(
            id::create(Prefix::Notification, None),
            kind,
            title,
            message,
            auto_expire_after,
        );
        let id = notification.id.clone();

        {
            let mut items = self.items.write().await;
            items.push(notification.clone());
        }
        tracing::debug!(id = %id, ?kind, "notification published");
        if let Some(bus) = &self.bus {
            if let Ok(properties) = serde_json::to_value(&notification) {
                bus.publish(&NOTIFICATION_PUBLISHED_EVENT, properties);
            }
        }

        if let Some(ttl) = auto_expire_after {
            self.schedule_expiry(id.clone(), ttl);
        }

        id
    }

    /// Removes the notification with `id` if still present, cancelling its
    /// expiry timer. Dismissing an unknown or already-removed id is a no-op,
    /// never an error, so dismissal can race expiry safely.
    pub async fn dismiss(&self, id: &str) {
        self.timers.cancel(id);
        self.remove(id).await;
    }

    /// Notifications in publish order, newest last.
    pub async fn list(&self) -> Vec<Notification> {
        self.items.read().await.clone()
    }

    /// Cancels every outstanding expiry timer. Already-listed notifications
    /// stay listed; nothing fires after this returns.
    pub fn shutdown(&self) {
        self.timers.cancel_all();
    }

    fn schedule_expiry(&self, id: String, ttl: Duration) {
        let items = Arc::clone(&self.items);
        let timers = Arc::clone(&self.timers);
        let bus = self.bus.clone();

        let handle = tokio::spawn({
            let id = id.clone();
            async move {
                tokio::time::sleep(ttl).await;
                // Deregister first so a concurrent dismiss cannot abort a
                // future task registered under a reused id.
                timers.complete(&id);
                Self::remove_from(&items, &bus, &id).await;
            }
        });
        self.timers.insert(id, handle);
    }

    async fn remove(&self, id: &str) {
        Self::remove_from(&self.items, &self.bus, id).await;
    }

    async fn remove_from(
        items: &Arc<RwLock<Vec<Notification>>>,
        bus: &Option<Arc<Bus>>,
        id: &str,
    ) {
        let removed = {
            let mut items = items.write().await;
            let before = items.len();
            items.retain(|n| n.id != id);
            items.len() != before
        };

        if removed {
            tracing::debug!(id = %id, "notification removed");
            if let Some(bus) = bus {
                bus.publish(
                    &NOTIFICATION_DISMISSED_EVENT,
                    serde_json::json!({ "id": id }),
                );
            }
        }
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> NotificationCenter {
        NotificationCenter::new()
    }

    #[tokio::test(start_paused = true)]
    async fn notifications_list_in_publish_order() {
        let center = center();
        center
            .publish(NotificationKind::Success, "Account Secured", "2FA on", None)
            .await;
        center
            .publish(NotificationKind::Info, "Market Update", "Rates moved", None)
            .await;

        let titles: Vec<String> = center.list().await.into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["Account Secured", "Market Update"]);
    }

    #[tokio::test(start_paused = true)]
    async fn dismissing_unknown_or_repeated_ids_is_a_no_op() {
        let center = center();
        let id = center
            .publish(NotificationKind::Info, "Market Update", "...", None)
            .await;

        center.dismiss("ntf_does_not_exist").await;
        center.dismiss(&id).await;
        center.dismiss(&id).await;

        assert!(center.list().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn auto_expiry_removes_at_the_deadline_and_never_before() {
        let center = center();
        let id = center
            .publish(
                NotificationKind::Info,
                "Market Update",
                "USD/EUR exchange rate is favorable for transfers",
                Some(Duration::from_secs(5)),
            )
            .await;

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert!(center.list().await.iter().any(|n| n.id == id));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(center.list().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn manual_dismissal_cancels_the_expiry_timer() {
        let center = center();
        let first = center
            .publish(
                NotificationKind::Success,
                "Account Secured",
                "...",
                Some(Duration::from_secs(5)),
            )
            .await;

        tokio::time::sleep(Duration::from_secs(1)).await;
        center.dismiss(&first).await;

        // A later notification must be untouched when the cancelled timer's
        // deadline passes.
        let second = center
            .publish(NotificationKind::Info, "Market Update", "...", None)
            .await;
        tokio::time::sleep(Duration::from_secs(10)).await;

        let remaining = center.list().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_after_dismissal_does_not_raise_or_remove_anything_else() {
        let center = center();
        let id = center
            .publish(
                NotificationKind::Warning,
                "Card Frozen",
                "...",
                Some(Duration::from_secs(2)),
            )
            .await;
        center
            .publish(NotificationKind::Info, "Market Update", "...", None)
            .await;

        center.dismiss(&id).await;
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(center.list().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_outstanding_timers() {
        let center = center();
        center
            .publish(
                NotificationKind::Info,
                "Market Update",
                "...",
                Some(Duration::from_secs(5)),
            )
            .await;

        center.shutdown();
        tokio::time::sleep(Duration::from_secs(10)).await;

        // Timer was cancelled, so the notification is still listed.
        assert_eq!(center.list().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dismissal_publishes_a_bus_event() {
        let bus = Arc::new(Bus::new());
        let mut rx = bus.subscribe_channel();
        let center = NotificationCenter::new().with_bus(Arc::clone(&bus));

        let id = center
            .publish(NotificationKind::Info, "Market Update", "...", None)
            .await;
        center.dismiss(&id).await;

        assert_eq!(rx.recv().await.unwrap().event_type, "notification.published");
        let dismissed = rx.recv().await.unwrap();
        assert_eq!(dismissed.event_type, "notification.dismissed");
        assert_eq!(dismissed.properties["id"], id.as_str());
    }
}
