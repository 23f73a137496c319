// Session authentication
//
// `login/authenticate.do` sets the session cookie in the client's jar;
// every later request carries it automatically.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::{CvpClient, check_envelope};
use crate::error::Error;

impl CvpClient {
    /// Authenticate with username/password.
    ///
    /// `POST /web/login/authenticate.do` with `{"userId", "password"}`.
    /// CVP answers a bad password with HTTP 200 and an `errorCode`, which
    /// is surfaced as [`Error::Authentication`].
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.web_url("/login/authenticate.do")?;
        debug!("logging in at {}", url);

        let resp = self
            .http()
            .post(url)
            .json(&json!({
                "userId": username,
                "password": password.expose_secret(),
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {body}"),
            });
        }

        let body = resp.bytes().await?;
        check_envelope(&body).map_err(|e| match e {
            Error::Rejected { code, message } => Error::Authentication {
                message: format!("login rejected ({code}): {message}"),
            },
            other => other,
        })?;

        debug!("login successful");
        Ok(())
    }

    /// End the current session.
    ///
    /// `POST /web/login/logout.do`
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.web_url("/login/logout.do")?;
        debug!("logging out at {}", url);
        let _ = self.post_url(url, &json!({})).await?;
        debug!("logout complete");
        Ok(())
    }
}
