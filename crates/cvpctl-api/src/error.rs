use thiserror::Error;

/// Top-level error type for the `cvpctl-api` crate.
///
/// Covers every failure mode of a CVP call: session login, transport,
/// HTTP status, the `{errorCode, errorMessage}` envelope, and decoding.
/// `cvpctl-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed or the session cookie was rejected.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-success HTTP status that is not an auth failure.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── CVP envelope ────────────────────────────────────────────────
    /// The response body carried a non-empty `errorCode`.
    #[error("CVP returned error code: {code}, {message}")]
    Rejected { code: String, message: String },

    /// A name-based lookup yielded no matching record.
    #[error("{entity} '{identifier}' not found")]
    NotFound { entity: String, identifier: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if re-authenticating might resolve this error.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a "not found" error, either from a
    /// lookup or from an HTTP 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::Http { status: 404, .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// The remote `errorCode`, if the controller rejected the request.
    pub fn remote_code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }
}
