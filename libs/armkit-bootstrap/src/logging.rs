use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Build the filter: `RUST_LOG` when set and valid, otherwise the configured level.
#[must_use]
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init_logging(config: &LoggingConfig) {
    let filter = env_filter(config);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn configured_level_is_used_without_rust_log() {
        temp_env::with_var_unset("RUST_LOG", || {
            let config = LoggingConfig {
                level: "armkit=debug,warn".to_owned(),
                format: LogFormat::Json,
            };
            assert_eq!(
                env_filter(&config).max_level_hint(),
                Some(LevelFilter::DEBUG)
            );
        });
    }

    #[test]
    fn rust_log_overrides_configured_level() {
        temp_env::with_var("RUST_LOG", Some("trace"), || {
            let filter = env_filter(&LoggingConfig::default());
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
        });
    }
}
