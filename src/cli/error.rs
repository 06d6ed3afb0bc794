//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("load settings: {0}")]
    Config(#[from] config::ConfigError),

    #[error("write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Application(_) | CliError::Config(_) | CliError::Output(_) => {
                crate::exitcode::SOFTWARE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ServiceError;
    use crate::exitcode;

    #[test]
    fn given_invalid_args_then_usage_code() {
        assert_eq!(CliError::InvalidArgs("x".into()).exit_code(), exitcode::USAGE);
    }

    #[test]
    fn given_client_construction_failure_then_software_code() {
        let err = CliError::from(ApplicationError::Client(ServiceError::NotABase("x".into())));
        assert_eq!(err.exit_code(), exitcode::SOFTWARE);
        assert!(err.to_string().contains("cannot construct service client"));
    }
}
