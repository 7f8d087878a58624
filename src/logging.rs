use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var holding the filter directive (e.g. `debug`, `gatecfg=trace`).
pub const LOG_LEVEL_ENV: &str = "GATECFG_LOG_LEVEL";
/// Env var naming a log file; when unset logs go to stderr.
pub const LOG_FILE_ENV: &str = "GATECFG_LOG";

/// Initialize tracing.
///
/// Logs go to stderr so stdout stays clean for `list` and `show` output.
/// Set `GATECFG_LOG` to a file path to write logs there instead.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let file = std::env::var(LOG_FILE_ENV)
        .ok()
        .and_then(|path| match std::fs::File::create(&path) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("Warning: Failed to create log file {}: {}", path, e);
                None
            }
        });

    let registry = tracing_subscriber::registry().with(filter);
    match file {
        Some(file) => registry
            .with(
                fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .with_level(true),
            )
            .init(),
        None => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_timer(fmt::time::UtcTime::rfc_3339()),
            )
            .init(),
    }
}
