// reqwest::Client construction for CvpClient.
//
// CVP keeps the login session in a cookie, so a built client always has a
// jar: the caller's, if it supplied one, otherwise a fresh one.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;
use reqwest::cookie::Jar;

use crate::error::Error;

/// How the server certificate is checked.
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Platform trust roots.
    System,
    /// Trust roots plus the PEM certificate at this path.
    CustomCa(PathBuf),
    /// No verification. CVP appliances ship a self-signed certificate.
    DangerAcceptInvalid,
}

impl TlsMode {
    fn configure(&self, builder: ClientBuilder) -> Result<ClientBuilder, Error> {
        Ok(match self {
            Self::System => builder,
            Self::CustomCa(path) => {
                let pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("cannot read CA bundle {}: {e}", path.display())))?;
                let cert = reqwest::Certificate::from_pem(&pem)
                    .map_err(|e| Error::Tls(format!("CA bundle {} is not PEM: {e}", path.display())))?;
                builder.add_root_certificate(cert)
            }
            Self::DangerAcceptInvalid => builder.danger_accept_invalid_certs(true),
        })
    }
}

/// Connection settings for one CVP instance.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Session cookie store to share between clients.
    pub cookie_jar: Option<Arc<Jar>>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(30),
            cookie_jar: None,
        }
    }
}

impl TransportConfig {
    /// Build the HTTP client.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let jar = self.cookie_jar.clone().unwrap_or_default();
        let builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("cvpctl/", env!("CARGO_PKG_VERSION")))
            .cookie_provider(jar);

        self.tls
            .configure(builder)?
            .build()
            .map_err(|e| Error::Tls(format!("HTTP client setup failed: {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_ca_bundle_is_a_tls_error() {
        let config = TransportConfig {
            tls: TlsMode::CustomCa("/nonexistent/cvp-ca.pem".into()),
            ..TransportConfig::default()
        };
        let err = config.build_client().unwrap_err();
        assert!(
            matches!(err, Error::Tls(ref msg) if msg.contains("/nonexistent/cvp-ca.pem")),
            "{err:?}"
        );
    }
}
