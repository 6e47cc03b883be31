use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::{SubscriberInitExt as _, TryInitError};
use tracing_subscriber::{EnvFilter, Layer as _};

pub const DEFAULT_LOG_LEVEL: &str = "info,mentorhub_core=debug,mentorhub_store=info";

#[derive(thiserror::Error, Debug)]
pub enum TelemetryError {
    #[error("invalid log filter {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("a global subscriber is already installed {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// `RUST_LOG` wins, then `configured`, then [`DEFAULT_LOG_LEVEL`].
pub fn env_filter(configured: Option<&str>) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    Ok(EnvFilter::try_new(configured.unwrap_or(DEFAULT_LOG_LEVEL))?)
}

/// Installs the global `tracing` subscriber. Log events from the `log` crate
/// are not bridged.
pub fn setup_telemetry(configured: Option<&str>) -> Result<(), TelemetryError> {
    let stdout_log = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(stdout_log.with_filter(env_filter(configured)?))
        .try_init()?;

    tracing::debug!("telemetry initialized");
    Ok(())
}
