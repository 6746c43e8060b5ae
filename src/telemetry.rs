//! Tracing subscriber setup shared by the binaries

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "inventory_ranker=info,tower_http=debug,warn";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}': {source}")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("telemetry error: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Build the filter: `RUST_LOG` wins, otherwise `default_filter`
pub fn env_filter(default_filter: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_filter).map_err(|source| TelemetryError::EnvFilter {
            value: default_filter.to_string(),
            source,
        }),
    }
}

/// Install the global subscriber; fails if one is already set
pub fn init(default_filter: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(env_filter(default_filter)?)
        .with(fmt::layer())
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_invalid_filter_reports_value() {
        let err = EnvFilter::try_new("inventory_ranker=loud")
            .map_err(|source| TelemetryError::EnvFilter { value: "inventory_ranker=loud".into(), source })
            .unwrap_err();
        assert!(err.to_string().contains("inventory_ranker=loud"));
    }
}
