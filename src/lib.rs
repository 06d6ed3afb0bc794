//! updatectl: command-line client for the update service.
//!
//! Nested commands with per-command flag sets, resolved against a static
//! command tree and dispatched to handlers that talk to the service over
//! Hawk-signed HTTP.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
