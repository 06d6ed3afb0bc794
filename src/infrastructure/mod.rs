//! Infrastructure layer: HTTP transport, request signing, DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod di;
pub mod error;
pub mod hawk;
pub mod traits;

pub use error::{TransportError, TransportResult};
pub use hawk::{Credentials, SigningTransport};
pub use traits::{HttpRequest, HttpResponse, HttpTransport, Transport};
