use chrono::Local;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// With `print` set, log lines go to stderr and no file is created.
/// Otherwise a timestamped log file is opened under `log_dir` and the path is
/// returned. `level` overrides the default filter; `RUST_LOG` wins over both.
/// Calling this a second time is a no-op.
pub fn init_tracing(level: Option<&str>, log_dir: Option<PathBuf>, print: bool) -> Option<PathBuf> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("info")));

    if print {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init();
        return None;
    }

    let log_dir = log_dir.unwrap_or_else(|| PathBuf::from("."));
    let timestamp = Local::now().format("%Y-%m-%dT%H%M%S").to_string();
    let log_path = log_dir.join(format!("{}.log", timestamp));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)
        .ok()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    // Keep the appender worker alive for the life of the process.
    std::mem::forget(guard);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .try_init();

    Some(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_mode_creates_a_log_file_in_the_requested_dir() {
        let dir = tempfile::tempdir().expect("create temp log dir");
        let path = init_tracing(Some("debug"), Some(dir.path().to_path_buf()), false);

        let path = path.expect("log path");
        assert!(path.starts_with(dir.path()));
        assert!(path.extension().is_some_and(|e| e == "log"));
        assert!(path.exists());
    }
}
