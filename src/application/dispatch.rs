//! Dispatch runner
//!
//! Builds the signed service client and runs the resolved command's handler.

use std::io::Write;

use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::resolver::Resolved;
use crate::application::usage::print_command_usage;
use crate::domain::{Command, Invocation};
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;

pub struct Runner<'a> {
    container: &'a ServiceContainer,
}

impl<'a> Runner<'a> {
    pub fn new(container: &'a ServiceContainer) -> Self {
        Self { container }
    }

    /// Run `resolved` and return the process exit code.
    ///
    /// The handler's return value is passed through unchanged; a usage code
    /// additionally prints the command's usage block. A grouping command
    /// without a handler is a usage error and never builds a client.
    #[instrument(level = "debug", skip_all, fields(command = %resolved.name))]
    pub fn run(
        &self,
        resolved: &Resolved<'_>,
        commands: &[Command],
        out: &mut dyn Write,
    ) -> ApplicationResult<i32> {
        let Some(handler) = resolved.command.handler() else {
            debug!("grouping command invoked directly");
            print_command_usage(out, &resolved.name, resolved.command)?;
            out.flush()?;
            return Ok(exitcode::USAGE);
        };

        let service = self.container.service().map_err(ApplicationError::Client)?;
        let invocation = Invocation {
            name: &resolved.name,
            flags: &resolved.flags,
            commands,
        };
        let code = handler(&invocation, &service, out);
        debug!(code, "handler finished");

        if code == exitcode::USAGE {
            print_command_usage(out, &resolved.name, resolved.command)?;
        }
        out.flush()?;
        Ok(code)
    }
}
