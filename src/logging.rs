use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file prefix.
pub const LOG_VAR: &str = "REDERR_LOG";

/// Initialize tracing with optional file output.
///
/// Logging is disabled by default: rederr's own stdout and stderr carry the
/// child's output and must not be mixed with diagnostics.
/// Set `REDERR_LOG` to a path prefix to enable it; `RUST_LOG` filters it.
///
/// Returns the log file path when logging was enabled.
pub fn init_tracing() -> Option<PathBuf> {
    let log_path = std::env::var_os(LOG_VAR)?;
    if log_path.is_empty() {
        return None;
    }
    let unique_path = unique_log_path(Path::new(&log_path), std::process::id());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match std::fs::File::create(&unique_path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!(
                "rederr: warning: failed to create log file {}: {err}",
                unique_path.display()
            );
            return None;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Some(unique_path)
}

/// `{prefix}.{unix_seconds}.{pid}`, so concurrent runs never share a file.
pub fn unique_log_path(prefix: &Path, pid: u32) -> PathBuf {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut name = prefix.as_os_str().to_owned();
    name.push(format!(".{timestamp}.{pid}"));
    PathBuf::from(name)
}
