//! Application layer: resolution, dispatch and the service client
//!
//! This layer walks the command tree and runs handlers against I/O boundary traits.

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod registry;
pub mod resolver;
pub mod service;
pub mod usage;

pub use dispatch::Runner;
pub use error::{ApplicationError, ApplicationResult, ServiceError, ServiceResult};
pub use resolver::{resolve, Resolution, Resolved, UsageError};
pub use service::UpdateService;
