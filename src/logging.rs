use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming a log file path.
pub const LOG_PATH_ENV: &str = "MAESTRANZA_LOG";

/// Initialize tracing.
///
/// - `MAESTRANZA_LOG=<path>`: log to `{path}.{timestamp}.{pid}` (filter from
///   `RUST_LOG`, default `info`).
/// - otherwise, when `RUST_LOG` is set: log to stderr so table output on
///   stdout stays clean.
/// - neither: logging stays off.
pub fn init_tracing() {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Ok(log_path) = std::env::var(LOG_PATH_ENV) {
        let pid = std::process::id();
        let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
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
            .with(filter())
            .with(file_layer)
            .init();
        return;
    }

    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter())
        .with(stderr_layer)
        .init();
}
