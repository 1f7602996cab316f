use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a log file path.
pub const LOG_PATH_ENV_VAR: &str = "PRIME_COUNTER_LOG";

/// Initialize tracing.
///
/// Logs go to stderr unless `PRIME_COUNTER_LOG` names a file path. Log files
/// get a unique suffix so concurrent runs never share one: `{path}.{timestamp}.{pid}`
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(log_path) = std::env::var(LOG_PATH_ENV_VAR).ok() else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
            .init();
        return;
    };

    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let unique_path = format!("{}.{}.{}", log_path, timestamp, pid);

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
