//! Log subscriber setup for the `facets` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is
//! left to the application.

use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Failed to initialize logger: {0}")]
    Init(String),
}

/// Configuration for logging behavior.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Number of `-v` flags given on the command line.
    pub verbosity: u8,
    /// Explicit filter directive (e.g. "facets=trace"), overriding both
    /// `RUST_LOG` and `verbosity`.
    pub filter: Option<String>,
}

impl LogConfig {
    pub fn verbose(verbosity: u8) -> Self {
        Self {
            verbosity,
            filter: None,
        }
    }

    /// Directive used when neither `filter` nor `RUST_LOG` is set.
    pub fn default_directive(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info,facets=debug",
            _ => "debug,facets=trace",
        }
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        if let Some(filter) = &self.filter {
            return Ok(EnvFilter::try_new(filter)?);
        }
        if self.verbosity == 0 {
            if let Ok(filter) = EnvFilter::try_from_default_env() {
                return Ok(filter);
            }
        }
        Ok(EnvFilter::try_new(self.default_directive())?)
    }
}

/// Install a compact stderr subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_writer(std::io::stderr)
        .with_target(config.verbosity > 1)
        .compact()
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::debug!(verbosity = config.verbosity, "logging initialized");
    Ok(())
}
