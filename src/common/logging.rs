//! Tracing initialization.

use tracing_subscriber::{fmt, EnvFilter};


/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
