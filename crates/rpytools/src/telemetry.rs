//! Opt-in log output for embedders.
//!
//! The library only emits `tracing` events; nothing is printed until a host
//! calls [`init_tracing`]. Each `rpytools.signature` span reports on close,
//! so a binding generator can see which callables were slow to render or
//! came back absent.

use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "RPYTOOLS_LOG";

const DEFAULT_FILTER: &str = "warn,rpytools=debug";
static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

#[derive(Debug, Error)]
pub enum TelemetryInitError {
    #[error("invalid tracing filter directive `{directive}`: {source}")]
    InvalidFilter {
        directive: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("failed to install tracing subscriber: {0}")]
    SetGlobalDefault(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Installs process-global tracing output on stderr.
///
/// The filter comes from `RPYTOOLS_LOG`, then `RUST_LOG`, then
/// `warn,rpytools=debug`. A malformed `RPYTOOLS_LOG` is an error; a malformed
/// `RUST_LOG` is ignored since it is shared with the rest of the process.
pub fn init_tracing() -> Result<(), TelemetryInitError> {
    install(filter_from_env()?)
}

/// Like [`init_tracing`], with an explicit filter directive.
///
/// The directive is validated even when a subscriber is already installed.
pub fn init_tracing_with(directive: &str) -> Result<(), TelemetryInitError> {
    install(parse_filter(directive)?)
}

fn install(filter: EnvFilter) -> Result<(), TelemetryInitError> {
    if TRACING_INITIALIZED.get().is_some() {
        return Ok(());
    }

    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    let _ = TRACING_INITIALIZED.set(());
    Ok(())
}

fn filter_from_env() -> Result<EnvFilter, TelemetryInitError> {
    if let Ok(directive) = std::env::var(LOG_ENV) {
        if !directive.trim().is_empty() {
            return parse_filter(&directive);
        }
    }
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => parse_filter(DEFAULT_FILTER),
    }
}

fn parse_filter(directive: &str) -> Result<EnvFilter, TelemetryInitError> {
    EnvFilter::try_new(directive).map_err(|source| TelemetryInitError::InvalidFilter {
        directive: directive.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing().unwrap();
        init_tracing().unwrap();
        init_tracing_with("rpytools=trace").unwrap();
        assert!(TRACING_INITIALIZED.get().is_some());
    }

    #[test]
    fn default_filter_parses() {
        assert!(parse_filter(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn malformed_directive_is_rejected() {
        let err = init_tracing_with("rpytools=loud").unwrap_err();
        match err {
            TelemetryInitError::InvalidFilter { directive, .. } => {
                assert_eq!(directive, "rpytools=loud");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
