//! Global argument definitions using clap
//!
//! Only the process-wide flags are declared here. Everything from the first
//! positional token on is collected verbatim and resolved against the
//! command tree.

use clap::{ArgAction, Parser};

use crate::domain::{FlagValueError, LiteralSet};

/// updatectl is a command line driven interface to the roller.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "updatectl")]
#[command(disable_help_flag = true, disable_version_flag = true, args_override_self = true)]
pub struct GlobalArgs {
    /// Update server to connect to
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Output debugging info to stderr
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, require_equals = true,
          default_missing_value = "true", default_value = "false", value_parser = bool_literal)]
    pub debug: bool,

    /// Print version information and exit.
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, require_equals = true,
          default_missing_value = "true", default_value = "false", value_parser = bool_literal)]
    pub version: bool,

    /// Print usage information and exit.
    #[arg(short = 'h', long, action = ArgAction::Set, num_args = 0..=1, require_equals = true,
          default_missing_value = "true", default_value = "false", value_parser = bool_literal)]
    pub help: bool,

    /// API Username
    #[arg(long, value_name = "USER")]
    pub user: Option<String>,

    /// API Key
    #[arg(long, value_name = "KEY")]
    pub key: Option<String>,

    /// Command, subcommands, command flags and positional arguments
    #[arg(trailing_var_arg = true, num_args = 1.., value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Boolean globals accept the same literals as boolean command flags (`--debug=false`).
fn bool_literal(value: &str) -> Result<bool, FlagValueError> {
    LiteralSet::STANDARD.parse(value)
}
