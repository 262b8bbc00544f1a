use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingSettings;

/// `RUST_LOG` wins over the configured filter.
fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new(LoggingSettings::default().filter))
}

/// Install the global subscriber. Logs go to stderr; stdout belongs to the
/// command loop.
pub fn init_logging(settings: &LoggingSettings) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
