//! Application-level errors (wrap transport errors)

use thiserror::Error;

use crate::infrastructure::TransportError;

/// Errors from talking to the update service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("invalid service base path {base:?}: {source}")]
    InvalidBasePath {
        base: String,
        #[source]
        source: url::ParseError,
    },

    #[error("service base path cannot carry a path: {0}")]
    NotABase(String),

    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors that abort dispatch before or after a handler runs.
#[derive(Error, Debug)]
pub enum ApplicationError {
    /// Startup-class failure; the process cannot talk to any server.
    #[error("cannot construct service client: {0}")]
    Client(#[source] ServiceError),

    #[error("write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
