//! Hawk request signing
//!
//! `SigningTransport` decorates any `Transport` and adds a Hawk
//! `Authorization` header to every request. Each request is signed with the
//! current wall-clock second and a fresh nonce; nothing else is kept between
//! requests.
//!
//! MAC input (header type, no payload hash unless given):
//! ```text
//! hawk.1.header\n{ts}\n{nonce}\n{METHOD}\n{path?query}\n{host}\n{port}\n{hash}\n{ext}\n
//! ```

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::infrastructure::error::TransportResult;
use crate::infrastructure::traits::{HttpRequest, HttpResponse, Transport};

type HmacSha256 = Hmac<Sha256>;

pub const AUTHORIZATION: &str = "Authorization";

/// API user and shared key.
///
/// Empty values are still used for signing; the server decides.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub id: String,
    pub key: String,
}

impl Credentials {
    pub fn new(id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Per-request signing inputs besides method and URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts<'a> {
    pub ts: i64,
    pub nonce: &'a str,
    pub hash: Option<&'a str>,
    pub ext: Option<&'a str>,
}

/// Build the normalized string the MAC is computed over.
pub fn normalized_string(method: &str, url: &Url, artifacts: &Artifacts<'_>) -> String {
    let mut resource = url.path().to_string();
    if let Some(query) = url.query() {
        resource.push('?');
        resource.push_str(query);
    }
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let port = url.port_or_known_default().unwrap_or(80);

    format!(
        "hawk.1.header\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n",
        artifacts.ts,
        artifacts.nonce,
        method.to_ascii_uppercase(),
        resource,
        host,
        port,
        artifacts.hash.unwrap_or_default(),
        artifacts.ext.unwrap_or_default(),
    )
}

/// base64(HMAC-SHA256(key, normalized string))
pub fn mac(credentials: &Credentials, method: &str, url: &Url, artifacts: &Artifacts<'_>) -> String {
    let mut hmac = HmacSha256::new_from_slice(credentials.key.as_bytes())
        .expect("HMAC accepts keys of any length");
    hmac.update(normalized_string(method, url, artifacts).as_bytes());
    BASE64.encode(hmac.finalize().into_bytes())
}

/// Full `Authorization` header value.
pub fn authorization_header(
    credentials: &Credentials,
    method: &str,
    url: &Url,
    artifacts: &Artifacts<'_>,
) -> String {
    let mut header = format!(
        "Hawk id=\"{}\", ts=\"{}\", nonce=\"{}\"",
        credentials.id, artifacts.ts, artifacts.nonce
    );
    if let Some(hash) = artifacts.hash {
        header.push_str(&format!(", hash=\"{}\"", hash));
    }
    if let Some(ext) = artifacts.ext {
        header.push_str(&format!(", ext=\"{}\"", ext));
    }
    header.push_str(&format!(
        ", mac=\"{}\"",
        mac(credentials, method, url, artifacts)
    ));
    header
}

/// Fresh request-unique nonce.
pub fn new_nonce() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Transport decorator that signs every request before delegating.
#[derive(Debug)]
pub struct SigningTransport<T> {
    inner: T,
    credentials: Credentials,
}

impl<T: Transport> SigningTransport<T> {
    pub fn new(inner: T, credentials: Credentials) -> Self {
        Self { inner, credentials }
    }

    /// Sign `request` with the given timestamp and nonce.
    pub fn sign(&self, mut request: HttpRequest, ts: i64, nonce: &str) -> HttpRequest {
        let artifacts = Artifacts {
            ts,
            nonce,
            hash: None,
            ext: None,
        };
        let header =
            authorization_header(&self.credentials, &request.method, &request.url, &artifacts);
        request
            .headers
            .retain(|(name, _)| !name.eq_ignore_ascii_case(AUTHORIZATION));
        request.headers.push((AUTHORIZATION.to_string(), header));
        request
    }
}

impl<T: Transport> Transport for SigningTransport<T> {
    fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        let ts = Utc::now().timestamp();
        let nonce = new_nonce();
        debug!(user = %self.credentials.id, ts, nonce = %nonce, "signing request");
        let signed = self.sign(request, ts, &nonce);
        self.inner.send(signed)
    }
}
