//! I/O boundary traits for testability
//!
//! The HTTP transport is abstracted so the signing decorator and the
//! service client can be tested without a network.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::infrastructure::error::{TransportError, TransportResult};

/// Outbound HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: Url) -> Self {
        Self {
            method: method.into(),
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// First header with `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response as seen by the caller; any status code is a valid response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Request-sending primitive.
pub trait Transport: Send + Sync {
    /// Send the request and block until a response or a network error.
    fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        (**self).send(request)
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Blocking HTTP transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let mut call = self.agent.request_url(&request.method, &request.url);
        for (name, value) in &request.headers {
            call = call.set(name, value);
        }
        let result = match &request.body {
            Some(body) => call.send_bytes(body),
            None => call.call(),
        };
        let response = match result {
            Ok(response) => response,
            // Error statuses still carry a body the caller wants to see
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(t)) => {
                return Err(TransportError::Network {
                    url: request.url.to_string(),
                    message: t.to_string(),
                })
            }
        };
        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| TransportError::io(format!("read response body from {}", request.url), e))?;
        debug!(status, "response received");
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_headers_when_lookup_then_case_insensitive() {
        let url = Url::parse("http://localhost:8000/x").unwrap();
        let req = HttpRequest::new("GET", url).with_header("Authorization", "Hawk id=\"a\"");
        assert_eq!(req.header("authorization"), Some("Hawk id=\"a\""));
        assert_eq!(req.header("x-missing"), None);
    }
}
