//! Update service client
//!
//! Minimal JSON client for the update API. All requests go through the
//! transport it was built with, which is the Hawk signing decorator in
//! production.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::application::error::{ServiceError, ServiceResult};
use crate::infrastructure::{HttpRequest, Transport};

pub struct UpdateService {
    transport: Arc<dyn Transport>,
    base: Url,
}

impl std::fmt::Debug for UpdateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateService")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl UpdateService {
    /// Create a client rooted at `base_path`; a trailing slash is added if missing.
    pub fn new(transport: Arc<dyn Transport>, base_path: &str) -> ServiceResult<Self> {
        let mut base = Url::parse(base_path).map_err(|source| ServiceError::InvalidBasePath {
            base: base_path.to_string(),
            source,
        })?;
        if base.cannot_be_a_base() {
            return Err(ServiceError::NotABase(base_path.to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        debug!(base = %base, "service client ready");
        Ok(Self { transport, base })
    }

    pub fn base_path(&self) -> &Url {
        &self.base
    }

    /// URL of an endpoint below the base path; each segment is percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> ServiceResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::NotABase(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET an endpoint and decode its JSON body.
    ///
    /// An empty body decodes to `Value::Null`.
    pub fn get_json(&self, segments: &[&str]) -> ServiceResult<Value> {
        let url = self.endpoint(segments)?;
        self.exchange(HttpRequest::new("GET", url))
    }

    /// POST a JSON body to an endpoint and decode the JSON reply.
    pub fn post_json(&self, segments: &[&str], body: &Value) -> ServiceResult<Value> {
        let url = self.endpoint(segments)?;
        let request = HttpRequest::new("POST", url)
            .with_header("Content-Type", "application/json")
            .with_body(serde_json::to_vec(body)?);
        self.exchange(request)
    }

    fn exchange(&self, request: HttpRequest) -> ServiceResult<Value> {
        let request = request.with_header("Accept", "application/json");
        let response = self.transport.send(request)?;
        if response.status >= 400 {
            return Err(ServiceError::Status {
                status: response.status,
                body: response.body,
            });
        }
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}
