// ── Runtime connection configuration ──
//
// How to reach and authenticate with one CVP instance. Carries credential
// data but never touches disk; the CLI builds a `ControllerConfig` and
// hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Username/password for the CVP session login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs). Default for lab CVP instances.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single CVP instance.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// CVP root URL (e.g., `https://cvp.example.com`).
    pub url: Url,
    /// Session credentials. `None` skips login (pre-authenticated proxies, tests).
    pub credentials: Option<Credentials>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ControllerConfig {
    /// Config for `url` with no credentials and default TLS/timeout.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            credentials: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}
