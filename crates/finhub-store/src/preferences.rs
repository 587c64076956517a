use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

const PREFERENCES_FILE: &str = "preferences.json";

/// Key-value store for local user preferences, backed by a JSON file.
///
/// Writes are best-effort: the in-memory value is always updated first and a
/// failed persist is logged, never surfaced to the caller. Controllers treat
/// the in-memory state as authoritative.
pub struct PreferenceStore {
    values: Arc<RwLock<HashMap<String, String>>>,
    filepath: Option<PathBuf>,
}

impl PreferenceStore {
    /// A store with no backing file; values live for the process only.
    pub fn in_memory() -> Self {
        Self {
            values: Arc::new(RwLock::new(HashMap::new())),
            filepath: None,
        }
    }

    pub fn with_filepath(filepath: PathBuf) -> Self {
        Self {
            values: Arc::new(RwLock::new(HashMap::new())),
            filepath: Some(filepath),
        }
    }

    /// Loads `preferences.json` from `data_dir`. A missing or unreadable
    /// file yields an empty store.
    pub async fn load_from_dir(data_dir: &Path) -> Self {
        let filepath = data_dir.join(PREFERENCES_FILE);
        let store = Self::with_filepath(filepath.clone());
        if let Ok(content) = tokio::fs::read_to_string(&filepath).await {
            if let Ok(data) = serde_json::from_str::<HashMap<String, String>>(&content) {
                let mut values = store.values.write().await;
                *values = data;
            }
        }
        store
    }

    /// The default per-user data directory for FinHub.
    pub fn default_data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("finhub"))
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let values = self.values.read().await;
        values.get(key).cloned()
    }

    pub async fn set(&self, key: &str, value: impl Into<String>) {
        {
            let mut values = self.values.write().await;
            values.insert(key.to_string(), value.into());
        }
        if let Err(error) = self.persist().await {
            tracing::warn!(%error, key, "failed to persist preferences");
        }
    }

    pub async fn remove(&self, key: &str) {
        {
            let mut values = self.values.write().await;
            values.remove(key);
        }
        if let Err(error) = self.persist().await {
            tracing::warn!(%error, key, "failed to persist preferences");
        }
    }

    async fn persist(&self) -> anyhow::Result<()> {
        let Some(path) = self.filepath.as_ref() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let values = self.values.read().await;
        let json = serde_json::to_vec_pretty(&*values)?;
        tokio::fs::write(path, json).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_persists_and_reloads_values() {
        let dir = tempfile::tempdir().expect("create temp data dir");
        let store = PreferenceStore::load_from_dir(dir.path()).await;

        store.set("theme.preference", "dark").await;
        assert!(dir.path().join(PREFERENCES_FILE).exists());

        let reloaded = PreferenceStore::load_from_dir(dir.path()).await;
        assert_eq!(
            reloaded.get("theme.preference").await.as_deref(),
            Some("dark")
        );
    }

    #[tokio::test]
    async fn remove_persists_the_deletion() {
        let dir = tempfile::tempdir().expect("create temp data dir");
        let store = PreferenceStore::load_from_dir(dir.path()).await;
        store.set("theme.preference", "light").await;

        store.remove("theme.preference").await;

        let reloaded = PreferenceStore::load_from_dir(dir.path()).await;
        assert!(reloaded.get("theme.preference").await.is_none());
    }

    #[tokio::test]
    async fn missing_file_yields_an_empty_store() {
        let dir = tempfile::tempdir().expect("create temp data dir");
        let store = PreferenceStore::load_from_dir(dir.path()).await;
        assert!(store.get("theme.preference").await.is_none());
    }

    #[tokio::test]
    async fn corrupt_file_yields_an_empty_store() {
        let dir = tempfile::tempdir().expect("create temp data dir");
        std::fs::write(dir.path().join(PREFERENCES_FILE), b"not json").expect("write");

        let store = PreferenceStore::load_from_dir(dir.path()).await;
        assert!(store.get("theme.preference").await.is_none());
    }

    #[tokio::test]
    async fn in_memory_store_never_touches_disk() {
        let store = PreferenceStore::in_memory();
        store.set("theme.preference", "dark").await;
        assert_eq!(
            store.get("theme.preference").await.as_deref(),
            Some("dark")
        );
    }
}
