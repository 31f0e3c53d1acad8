//! Optional log output for enumeration and layout events.
//!
//! The library only emits `tracing` events; binaries and demos call
//! [`init_tracing`] to see them.

use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "repr_core=debug";

static INSTALLED: OnceLock<()> = OnceLock::new();

#[derive(Debug, Error)]
pub enum TelemetryInitError {
    #[error("invalid tracing directive `{directive}`: {source}")]
    InvalidDirective {
        directive: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("another tracing subscriber is already installed: {0}")]
    Install(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Installs a compact, process-global subscriber filtered by `RUST_LOG`,
/// or by [`DEFAULT_DIRECTIVE`] when it is unset or invalid.
///
/// Calls after the first successful one do nothing.
pub fn init_tracing() -> Result<(), TelemetryInitError> {
    init_tracing_with(DEFAULT_DIRECTIVE)
}

/// Like [`init_tracing`] with a caller-chosen fallback directive.
pub fn init_tracing_with(fallback: &str) -> Result<(), TelemetryInitError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(fallback).map_err(|source| TelemetryInitError::InvalidDirective {
            directive: fallback.to_string(),
            source,
        })
    })?;

    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_target(true)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let _ = INSTALLED.set(());
    tracing::debug!(fallback, "tracing installed");
    Ok(())
}
