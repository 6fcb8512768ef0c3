//! Tracing initialization and subscriber setup.

use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::file_writer::FileWriter;
use crate::infrastructure::paths::expand_tilde;
use crate::Config;

/// Initializes the tracing subscriber.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable, when set and valid
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// # Output
///
/// Log lines go to `config.log_file` through a [`FileWriter`] when one is set
/// (rotated at 10MB, 3 backups kept), otherwise to stderr so stdout stays free
/// for rendered HTML.
///
/// If the log file cannot be prepared the subscriber falls back to stderr.
/// Calling this more than once is harmless; only the first call installs a
/// subscriber.
///
/// # Example
///
/// ```rust
/// use videotheque::observability::init_tracing;
/// use videotheque::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_writer = config.log_file.as_deref().and_then(|path| {
        FileWriter::new(expand_tilde(path).into())
            .map_err(|e| eprintln!("videotheque: cannot open log file {path}: {e}"))
            .ok()
    });

    let registry = tracing_subscriber::registry().with(filter);
    let _ = match file_writer {
        Some(writer) => registry
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(Arc::new(writer)),
            )
            .try_init(),
        None => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
}
