//! Logging Infrastructure
//!
//! Structured logging with an env filter, optional JSON lines and an
//! optional daily-rolling log file.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional JSON output and file output.
///
/// `RUST_LOG` overrides `log_level` when set. Calling this twice is a no-op
/// for the second call.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},tower_http=info,sqlx=warn")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    let file_appender = log_dir.and_then(|dir| {
        let path = Path::new(dir);
        match std::fs::create_dir_all(path) {
            Ok(()) => Some(tracing_appender::rolling::daily(path, "restaurant-server")),
            Err(e) => {
                eprintln!("Log directory {dir} unavailable ({e}), logging to stdout");
                None
            }
        }
    });

    let result = match (json.unwrap_or(false), file_appender) {
        (true, Some(appender)) => builder.json().with_writer(appender).try_init(),
        (true, None) => builder.json().try_init(),
        (false, Some(appender)) => builder.with_ansi(false).with_writer(appender).try_init(),
        (false, None) => builder.try_init(),
    };

    if let Err(e) = result {
        tracing::debug!("Logger already initialized: {}", e);
    }
}
