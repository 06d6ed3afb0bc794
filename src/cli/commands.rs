//! Top-level execution: global flags, short-circuits, resolution, dispatch

use std::ffi::OsString;
use std::io::Write;

use clap::{CommandFactory, Parser};
use tracing::debug;

use crate::application::registry;
use crate::application::usage::{
    print_command_usage, print_global_usage, print_unknown_command, print_version, CLI_NAME,
};
use crate::application::{resolve, Resolution, Runner};
use crate::cli::args::GlobalArgs;
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{GlobalConfig, Settings};
use crate::domain::error::clap_summary;
use crate::domain::{long_form, Command};
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;

/// Command tree plus the services handlers run against.
pub struct App {
    commands: Vec<Command>,
    container: ServiceContainer,
}

impl App {
    /// Registry commands with the real HTTP transport.
    pub fn new(config: GlobalConfig) -> Self {
        Self::with_parts(registry::commands(), ServiceContainer::new(config))
    }

    /// Custom tree and container (for testing).
    pub fn with_parts(commands: Vec<Command>, container: ServiceContainer) -> Self {
        Self {
            commands,
            container,
        }
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.container.config
    }

    /// Execute the command vector (everything after the global flags).
    ///
    /// `--version` and `--help` win over any command. An empty vector runs `help`.
    pub fn execute(&self, command: &[String], out: &mut dyn Write) -> CliResult<i32> {
        let config = self.config();
        if config.version {
            print_version(out)?;
            out.flush()?;
            return Ok(exitcode::OK);
        }
        if config.help {
            print_global_usage(out, &self.commands)?;
            out.flush()?;
            return Ok(exitcode::OK);
        }

        let args: Vec<String> = if command.is_empty() {
            vec!["help".to_string()]
        } else {
            command.to_vec()
        };

        let resolved = match resolve("", &args, &self.commands) {
            Ok(Resolution::Found(resolved)) => resolved,
            Ok(Resolution::Unknown { name }) => {
                debug!(name = %name, "unknown command");
                print_unknown_command(out, &name)?;
                out.flush()?;
                return Ok(exitcode::NO_COMMAND);
            }
            Err(e) => {
                debug!(command = %e.name, error = %e.source, "flag parsing failed");
                output::error(&e);
                print_command_usage(out, &e.name, e.command)?;
                out.flush()?;
                return Ok(exitcode::USAGE);
            }
        };

        Ok(Runner::new(&self.container).run(&resolved, &self.commands, out)?)
    }
}

/// Parse global flags from a full argv (program name first).
///
/// Single-dash spellings of the long flags (`-server x`, `-version`) are
/// accepted as well.
pub fn parse_global<I, T>(argv: I) -> CliResult<GlobalArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut argv = argv.into_iter().map(|arg| {
        let arg: OsString = arg.into();
        arg.into_string()
            .map_err(|raw| CliError::InvalidArgs(format!("invalid UTF-8 argument: {:?}", raw)))
    });
    let bin = argv.next().transpose()?.unwrap_or_else(|| CLI_NAME.to_string());
    let rest = argv.collect::<CliResult<Vec<String>>>()?;

    let mut full = vec![bin];
    full.extend(long_form(&GlobalArgs::command(), &rest));
    GlobalArgs::try_parse_from(full).map_err(|e| CliError::InvalidArgs(clap_summary(&e)))
}

/// Report malformed global flags: diagnostic on stderr, global usage on `out`.
pub fn report_invalid_args(err: &CliError, out: &mut dyn Write) -> i32 {
    output::error(err);
    if let Err(e) = print_global_usage(out, &registry::commands()).and_then(|_| out.flush()) {
        output::error(&format!("write output: {}", e));
    }
    err.exit_code()
}

/// Load environment settings, overlay `args` and execute.
pub fn execute_command(args: &GlobalArgs, out: &mut dyn Write) -> CliResult<i32> {
    let settings = Settings::load()?;
    let config = GlobalConfig::new(settings, args);
    debug!(?config, "effective configuration");
    App::new(config).execute(&args.command, out)
}
