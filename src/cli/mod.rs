//! CLI layer: global argument parsing and top-level dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::GlobalArgs;
pub use commands::App;
pub use error::{CliError, CliResult};
