//! Tracing subscriber setup
//!
//! Diagnostics go to stderr so they never interleave with rendered output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::config::LoggingConfig;

/// Build the filter, falling back to `warn` when the directive does not parse
pub fn filter_for(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(config: &LoggingConfig) {
    let _ = tracing_subscriber::registry()
        .with(filter_for(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_directive_falls_back() {
        let config = LoggingConfig {
            filter: "cratchit=loudest".to_string(),
            ansi: false,
        };
        assert_eq!(filter_for(&config).to_string(), "warn");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = LoggingConfig {
            filter: "debug".to_string(),
            ansi: false,
        };
        init(&config);
        init(&config);
    }
}
