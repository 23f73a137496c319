// ── Core error types ──
//
// Domain errors for configlet assignment. `From<cvpctl_api::Error>`
// sorts transport-layer failures into the lookup / rejection / transport
// buckets; `PartialCommit` only ever originates here.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session ──────────────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Lookups ──────────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Remote outcomes ──────────────────────────────────────────────
    /// The controller answered with a non-empty `errorCode`.
    #[error("Rejected by controller ({code}): {message}")]
    RemoteRejected { code: String, message: String },

    /// Staging succeeded but the commit did not. The staged action may
    /// still be pending on the controller.
    #[error("Change for device {device} was staged but not committed: {source}")]
    PartialCommit {
        device: String,
        #[source]
        source: Box<CoreError>,
    },

    /// Network, HTTP, or decoding failure, passed through unchanged.
    #[error("Transport failure: {source}")]
    Transport {
        #[source]
        source: cvpctl_api::Error,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` for lookups that matched nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if remote state may have changed despite the error.
    pub fn is_partial_commit(&self) -> bool {
        matches!(self, Self::PartialCommit { .. })
    }

    /// The controller's `errorCode`, looking through `PartialCommit`.
    pub fn remote_code(&self) -> Option<&str> {
        match self {
            Self::RemoteRejected { code, .. } => Some(code),
            Self::PartialCommit { source, .. } => source.remote_code(),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cvpctl_api::Error> for CoreError {
    fn from(err: cvpctl_api::Error) -> Self {
        match err {
            cvpctl_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            cvpctl_api::Error::NotFound { entity, identifier } => CoreError::NotFound {
                entity_type: entity,
                identifier,
            },
            cvpctl_api::Error::Rejected { code, message } => {
                CoreError::RemoteRejected { code, message }
            }
            cvpctl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            other => CoreError::Transport { source: other },
        }
    }
}
