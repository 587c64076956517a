//! Registry of scheduled asynchronous tasks owned by a controller.
//!
//! Controllers register every timer or delayed completion they spawn, keyed
//! by an id, so teardown can cancel all outstanding work deterministically.
//! After a task is cancelled its callback can no longer run, so no late
//! mutation can reach a discarded controller.

use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::task::JoinHandle;

pub struct TaskRegistry {
    tasks: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a spawned task under `id`. A task already registered under
    /// the same id is aborted first, so at most one task per key is live.
    pub fn insert(&self, id: impl Into<String>, handle: JoinHandle<()>) {
        let mut tasks = self.tasks.lock();
        if let Some(previous) = tasks.insert(id.into(), handle) {
            previous.abort();
        }
    }

    /// Aborts and removes the task registered under `id`. Returns whether a
    /// task was still registered; cancelling an unknown id is a no-op.
    pub fn cancel(&self, id: &str) -> bool {
        let handle = self.tasks.lock().remove(id);
        match handle {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Removes the entry for `id` without aborting. Called by the task itself
    /// once it has run, so a later `cancel` cannot touch an unrelated task
    /// registered under a reused key.
    pub fn complete(&self, id: &str) {
        self.tasks.lock().remove(id);
    }

    /// Aborts every outstanding task.
    pub fn cancel_all(&self) {
        let mut tasks = self.tasks.lock();
        for (_, handle) in tasks.drain() {
            handle.abort();
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_the_task_from_running() {
        let registry = TaskRegistry::new();
        let fired = Arc::new(AtomicBool::new(false));
        let fired_clone = Arc::clone(&fired);

        registry.insert(
            "timer",
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                fired_clone.store(true, Ordering::SeqCst);
            }),
        );

        assert!(registry.cancel("timer"));
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!fired.load(Ordering::SeqCst));
        assert!(registry.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn completed_tasks_deregister_themselves() {
        let registry = Arc::new(TaskRegistry::new());
        let registry_clone = Arc::clone(&registry);

        registry.insert(
            "timer",
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                registry_clone.complete("timer");
            }),
        );

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(registry.is_empty());
        assert!(!registry.cancel("timer"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_clears_every_outstanding_task() {
        let registry = TaskRegistry::new();
        for i in 0..3 {
            registry.insert(
                format!("timer-{i}"),
                tokio::spawn(async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                }),
            );
        }

        assert_eq!(registry.len(), 3);
        registry.cancel_all();
        assert!(registry.is_empty());
    }
}
