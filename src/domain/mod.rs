//! Domain layer: command tree and flag binding
//!
//! No I/O here; handlers receive their I/O handles from the application layer.

pub mod command;
pub mod error;
pub mod flags;
pub mod values;

pub use command::{join_name, walk, Body, Command, Handler, Invocation};
pub use error::{FlagError, FlagValueError};
pub use flags::{long_form, FlagKind, FlagSet, FlagSpec, FlagValue, FlagValues};
pub use values::{LiteralSet, NullableString, TriStateBool};
