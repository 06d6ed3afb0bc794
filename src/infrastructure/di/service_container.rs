//! Service container for dependency injection
//!
//! Holds the startup configuration and the base transport, and builds the
//! signed service client on demand.

use std::sync::Arc;

use crate::application::error::ServiceResult;
use crate::application::service::UpdateService;
use crate::config::GlobalConfig;
use crate::infrastructure::hawk::{Credentials, SigningTransport};
use crate::infrastructure::traits::{HttpTransport, Transport};

pub struct ServiceContainer {
    /// Effective configuration, read-only after startup
    pub config: Arc<GlobalConfig>,

    /// Unsigned base transport; signing is layered on per client
    pub transport: Arc<dyn Transport>,
}

impl ServiceContainer {
    /// Create a new service container with the real HTTP transport.
    pub fn new(config: GlobalConfig) -> Self {
        Self::with_deps(config, Arc::new(HttpTransport::default()))
    }

    /// Create a service container with a custom transport (for testing).
    pub fn with_deps(config: GlobalConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Build a client whose requests are Hawk-signed with the configured credentials.
    pub fn service(&self) -> ServiceResult<UpdateService> {
        let credentials = Credentials::new(self.config.user.clone(), self.config.key.clone());
        let signed = SigningTransport::new(Arc::clone(&self.transport), credentials);
        UpdateService::new(Arc::new(signed), &self.config.base_path())
    }
}
