use tracing_subscriber::EnvFilter;

use modelpin_config::constants::RUST_LOG;

use crate::config::LogLevel;

/// Build the log filter: `RUST_LOG` when set, otherwise the configured level
pub fn env_filter(level: LogLevel) -> EnvFilter {
    if std::env::var(RUST_LOG).is_ok() {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
    }
    EnvFilter::new(level.as_str())
}

/// Initialize tracing for the CLI
///
/// Logs go to stderr so `--json` output on stdout stays machine readable.
pub fn init_tracing(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
