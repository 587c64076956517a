use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "finhub.json";

/// Application configuration. Every field has a default, so a missing or
/// partial config file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Simulated assistant round-trip latency in milliseconds.
    pub reply_delay_ms: u64,
    /// How long the startup notifications stay before auto-expiry.
    pub welcome_notification_ttl_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1_000,
            welcome_notification_ttl_secs: 5,
            data_dir: None,
            log_level: None,
        }
    }
}

impl AppConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {:?}", path))
    }

    /// Loads `finhub.json` from `dir`; an unreadable or invalid file is
    /// logged and the defaults are used.
    pub fn load_or_default(dir: &Path) -> Self {
        match Self::load_from_file(dir.join(CONFIG_FILE)) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(%error, "falling back to default config");
                Self::default()
            }
        }
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn welcome_notification_ttl(&self) -> Duration {
        Duration::from_secs(self.welcome_notification_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = AppConfig::load_or_default(dir.path());
        assert_eq!(config.reply_delay_ms, 1_000);
        assert_eq!(config.welcome_notification_ttl_secs, 5);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "replyDelayMs": 250, "logLevel": "debug" }"#,
        )
        .expect("write config");

        let config = AppConfig::load_or_default(dir.path());
        assert_eq!(config.reply_delay(), Duration::from_millis(250));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        // Unspecified fields keep their defaults.
        assert_eq!(config.welcome_notification_ttl_secs, 5);
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join(CONFIG_FILE), b"{ not json").expect("write config");

        let config = AppConfig::load_or_default(dir.path());
        assert_eq!(config.reply_delay_ms, 1_000);
    }
}
