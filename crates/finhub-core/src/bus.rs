use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::broadcast;

/// An event delivered through the [`Bus`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusEvent {
    pub event_type: String,
    pub properties: serde_json::Value,
}

/// Static definition of an event type. Controllers declare these as
/// `pub static` items so producers and consumers share one name.
pub struct BusEventDef {
    pub event_type: &'static str,
}

impl BusEventDef {
    pub const fn new(event_type: &'static str) -> Self {
        Self { event_type }
    }
}

type BoxedCallback = Box<dyn Fn(&BusEvent) + Send + Sync>;

struct Subscription {
    id: u64,
    callback: BoxedCallback,
}

/// In-process event bus connecting the state controllers to the rendering
/// layer. Consumers either register a callback for one event type or take a
/// broadcast receiver that sees every event.
pub struct Bus {
    next_id: RwLock<u64>,
    subscribers: RwLock<HashMap<String, Vec<Subscription>>>,
    tx: broadcast::Sender<BusEvent>,
}

impl Bus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self {
            next_id: RwLock::new(0),
            subscribers: RwLock::new(HashMap::new()),
            tx,
        }
    }

    pub fn publish(&self, def: &BusEventDef, properties: serde_json::Value) {
        tracing::debug!(event_type = def.event_type, "publishing event");

        let event = BusEvent {
            event_type: def.event_type.to_string(),
            properties,
        };

        let _ = self.tx.send(event.clone());

        let subscribers = self.subscribers.read();
        if let Some(subs) = subscribers.get(def.event_type) {
            for sub in subs {
                (sub.callback)(&event);
            }
        }
    }

    pub fn subscribe<F>(&self, def: &BusEventDef, callback: F) -> u64
    where
        F: Fn(&BusEvent) + Send + Sync + 'static,
    {
        let id = {
            let mut next = self.next_id.write();
            *next += 1;
            *next
        };

        let mut subscribers = self.subscribers.write();
        subscribers
            .entry(def.event_type.to_string())
            .or_default()
            .push(Subscription {
                id,
                callback: Box::new(callback),
            });

        id
    }

    pub fn unsubscribe(&self, event_type: &str, id: u64) {
        let mut subscribers = self.subscribers.write();
        if let Some(subs) = subscribers.get_mut(event_type) {
            subs.retain(|s| s.id != id);
        }
    }

    /// A receiver over every event published after this call.
    pub fn subscribe_channel(&self) -> broadcast::Receiver<BusEvent> {
        self.tx.subscribe()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
