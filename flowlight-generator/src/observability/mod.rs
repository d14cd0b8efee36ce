//! Observability (logging)
//!
//! Structured logging for generation runs. Diagnostics go to stderr so that
//! `--dry-run` output on stdout stays clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable compact lines
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub default_directive: String,

    /// Output format
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            default_directive: "warn,flowlight_generator=info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl ObservabilityConfig {
    /// Raise the default level to `debug` for the generator crates
    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.default_directive =
            "info,flowlight_generator=debug,flowlight=debug".to_string();
        self
    }

    /// Emit JSON lines
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Initialize the logging stack
///
/// Sets up:
/// - Environment-based log level filtering (`RUST_LOG` wins over the default)
/// - Compact or JSON formatting on stderr
///
/// # Example
///
/// ```rust,no_run
/// use flowlight_generator::observability::{self, ObservabilityConfig};
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init(&ObservabilityConfig::default())?;
/// tracing::info!("Generator started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_directive));

    match config.format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}
