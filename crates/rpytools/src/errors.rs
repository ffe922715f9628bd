//! Error types for introspection and settings.

use thiserror::Error;

/// Why metadata for a callable could not be produced.
///
/// The public extraction functions collapse every variant into `None`; the
/// `try_*` variants hand it back so callers can log or report the cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntrospectError {
    /// The callable is implemented natively and exposes no signature.
    #[error("`{name}` is a native callable with no introspectable metadata")]
    Native { name: String },

    /// The host refused to produce a signature for the callable.
    #[error("signature of `{name}` is unavailable: {reason}")]
    SignatureUnavailable { name: String, reason: String },

    /// A chain of transparent wrappers was longer than allowed, or cyclic.
    #[error("gave up unwrapping after {depth} nested wrappers")]
    UnwrapDepthExceeded { depth: usize },
}

impl IntrospectError {
    pub fn native(name: impl Into<String>) -> Self {
        Self::Native { name: name.into() }
    }

    pub fn unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SignatureUnavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Failure while loading [`RenderSettings`](crate::RenderSettings).
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse render settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("rewrite rule #{index} is invalid: {reason}")]
    InvalidRule { index: usize, reason: String },
}
