//! Process exit codes

/// Successful termination
pub const OK: i32 = 0;

/// Remote API call failed
pub const API: i32 = 1;

/// Command line usage error (bad flags/arguments, grouping command invoked directly)
pub const USAGE: i32 = 2;

/// No command matched the given arguments
pub const NO_COMMAND: i32 = 3;

/// Internal software error (service client could not be constructed)
pub const SOFTWARE: i32 = 70;
