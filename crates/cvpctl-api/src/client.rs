// CVP HTTP client
//
// Wraps `reqwest::Client` with `/web`-prefixed URL construction, HTTP status
// mapping, and `errorCode` envelope checking. Endpoint groups (configlets,
// inventory, provisioning) are inherent methods in separate files so this
// module stays focused on transport mechanics.

use bytes::Bytes;
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::ResponseEnvelope;
use crate::transport::TransportConfig;

/// Path prefix under which every CVP web service lives.
const WEB_PREFIX: &str = "/web";

/// Raw HTTP client for the CVP web services.
///
/// Holds the session cookie (set by [`login`](Self::login)) in its jar.
/// Every endpoint method checks the `{errorCode, errorMessage}` envelope
/// before decoding.
#[derive(Debug, Clone)]
pub struct CvpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CvpClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the CVP root, e.g. `https://cvp.example.com`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/web{path}`. `path` may carry a fixed query string.
    pub(crate) fn web_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{WEB_PREFIX}{path}"))?)
    }

    /// Build a web URL and append caller-supplied query pairs, encoded.
    pub(crate) fn web_url_with_query(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Url, Error> {
        let mut url = self.web_url(path)?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    // ── Raw calls ────────────────────────────────────────────────────

    pub(crate) async fn get_url(&self, url: Url) -> Result<Bytes, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        read_body(resp).await
    }

    pub(crate) async fn post_url(
        &self,
        url: Url,
        payload: &(impl Serialize + Sync),
    ) -> Result<Bytes, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(payload).send().await?;
        read_body(resp).await
    }

    // ── Checked + decoded calls ──────────────────────────────────────

    /// GET, reject on `errorCode`, then decode into `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let body = self.get_url(url).await?;
        check_envelope(&body)?;
        decode(&body)
    }

    /// POST and reject on `errorCode`; the body is otherwise ignored.
    pub(crate) async fn post_checked(
        &self,
        url: Url,
        payload: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let body = self.post_url(url, payload).await?;
        trace!(body = %String::from_utf8_lossy(&body), "response");
        check_envelope(&body)
    }
}

/// Map the HTTP status, then hand back the body bytes.
///
/// A non-2xx body carrying an `errorCode` is reported as [`Error::Rejected`].
async fn read_body(resp: reqwest::Response) -> Result<Bytes, Error> {
    let status = resp.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(Error::Authentication {
            message: format!("session expired or invalid credentials (HTTP {status})"),
        });
    }

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        // CVP reports most failures in the envelope, whatever the status
        check_envelope(body.as_bytes())?;
        return Err(Error::Http {
            status: status.as_u16(),
            body: preview(&body).to_owned(),
        });
    }

    Ok(resp.bytes().await?)
}

/// Fail with [`Error::Rejected`] if `body` is a JSON object carrying a
/// non-empty `errorCode`.
///
/// Bodies that are not an envelope (arrays, empty bodies, plain objects
/// without the field) pass.
pub fn check_envelope(body: &[u8]) -> Result<(), Error> {
    let Ok(envelope) = serde_json::from_slice::<ResponseEnvelope<IgnoredAny>>(body) else {
        return Ok(());
    };
    if envelope.error_code.is_empty() {
        return Ok(());
    }
    debug!(
        code = %envelope.error_code,
        message = %envelope.error_message,
        "error from CVP"
    );
    Err(Error::Rejected {
        code: envelope.error_code,
        message: envelope.error_message,
    })
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|e| {
        let text = String::from_utf8_lossy(body).into_owned();
        Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&text)),
            body: text,
        }
    })
}

fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
