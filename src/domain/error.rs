//! Domain-level errors (no external dependencies beyond the flag tokenizer)

use thiserror::Error;

/// A flag value was rejected by its adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagValueError {
    #[error("invalid value {value:?}: value must be one of {truthy:?}, {falsy:?}")]
    NotABool {
        value: String,
        truthy: Vec<String>,
        falsy: Vec<String>,
    },
}

/// Flags of a single command could not be bound.
#[derive(Error, Debug)]
pub enum FlagError {
    /// Unknown flag, missing value, or other tokenizer failure.
    #[error("{}", clap_summary(.0))]
    Parse(#[from] clap::Error),

    #[error("invalid value for flag --{flag}: {source}")]
    InvalidValue {
        flag: String,
        #[source]
        source: FlagValueError,
    },
}

/// clap renders a multi-line report with its own usage section; only the
/// diagnostic line is kept since usage is printed from the command tree.
pub(crate) fn clap_summary(e: &clap::Error) -> String {
    let rendered = e.to_string();
    rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}
