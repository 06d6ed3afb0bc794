//! Usage and version text
//!
//! Everything is written to the caller's output sink; nothing here flushes.

use std::io::{self, Write};

use clap::CommandFactory;

use crate::cli::args::GlobalArgs;
use crate::domain::{walk, Command};

pub const CLI_NAME: &str = "updatectl";
pub const CLI_DESCRIPTION: &str = "updatectl is a command line driven interface to the roller.";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_version(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{} version {}", CLI_NAME, VERSION)
}

/// Top-level usage: every command (nested ones by full name) and the global flags.
pub fn print_global_usage(out: &mut dyn Write, commands: &[Command]) -> io::Result<()> {
    writeln!(out, "NAME:")?;
    writeln!(out, "\t{} - {}", CLI_NAME, CLI_DESCRIPTION)?;
    writeln!(out)?;
    writeln!(out, "USAGE:")?;
    writeln!(
        out,
        "\t{} [global options] <command> [command options] [arguments...]",
        CLI_NAME
    )?;
    writeln!(out)?;
    writeln!(out, "VERSION:")?;
    writeln!(out, "\t{}", VERSION)?;
    writeln!(out)?;

    writeln!(out, "COMMANDS:")?;
    let rows: Vec<(String, String)> = walk(commands)
        .into_iter()
        .map(|(name, cmd)| (name, cmd.summary.to_string()))
        .collect();
    write_rows(out, &rows)?;
    writeln!(out)?;

    writeln!(out, "GLOBAL OPTIONS:")?;
    write_rows(out, &global_flag_rows())?;
    writeln!(out)?;
    writeln!(
        out,
        "Run \"{} help <command>\" for more details on a specific command.",
        CLI_NAME
    )
}

/// Usage block of a single command, labelled with its full name.
pub fn print_command_usage(out: &mut dyn Write, name: &str, command: &Command) -> io::Result<()> {
    writeln!(out, "NAME:")?;
    writeln!(out, "\t{} {} - {}", CLI_NAME, name, command.summary)?;
    writeln!(out)?;
    writeln!(out, "USAGE:")?;
    writeln!(out, "\t{}", format!("{} {} {}", CLI_NAME, name, command.usage).trim_end())?;

    if !command.description.is_empty() {
        writeln!(out)?;
        writeln!(out, "DESCRIPTION:")?;
        for line in command.description.lines() {
            writeln!(out, "\t{}", line)?;
        }
    }

    if !command.children().is_empty() {
        writeln!(out)?;
        writeln!(out, "SUBCOMMANDS:")?;
        let rows: Vec<(String, String)> = command
            .children()
            .iter()
            .map(|c| (c.name.to_string(), c.summary.to_string()))
            .collect();
        write_rows(out, &rows)?;
    }

    if !command.flags.is_empty() {
        writeln!(out)?;
        writeln!(out, "OPTIONS:")?;
        let rows: Vec<(String, String)> = command
            .flags
            .specs()
            .iter()
            .map(|f| (format!("--{}{}", f.name, f.value_hint()), f.help.to_string()))
            .collect();
        write_rows(out, &rows)?;
    }
    Ok(())
}

/// Diagnostic for a command path that matched nothing.
pub fn print_unknown_command(out: &mut dyn Write, name: &str) -> io::Result<()> {
    writeln!(out, "{}: unknown subcommand: {:?}", CLI_NAME, name)?;
    writeln!(out, "Run '{} help' for usage.", CLI_NAME)
}

fn global_flag_rows() -> Vec<(String, String)> {
    GlobalArgs::command()
        .get_arguments()
        .filter_map(|arg| {
            let long = arg.get_long()?;
            let hint = arg
                .get_value_names()
                .and_then(|names| names.first())
                .map(|v| format!(" <{}>", v))
                .unwrap_or_default();
            let help = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
            Some((format!("--{}{}", long, hint), help))
        })
        .collect()
}

fn write_rows(out: &mut dyn Write, rows: &[(String, String)]) -> io::Result<()> {
    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    for (left, right) in rows {
        writeln!(out, "\t{:<width$}  {}", left, right, width = width)?;
    }
    Ok(())
}
