//! `help [command ...]`

use std::io::{self, Write};

use crate::application::handlers::output_failure;
use crate::application::service::UpdateService;
use crate::application::usage::{print_command_usage, print_global_usage, print_unknown_command};
use crate::domain::{walk, Invocation};
use crate::exitcode;

/// Without arguments prints the global usage; otherwise the usage of the
/// command named by the arguments (`help app list`).
pub fn help(invocation: &Invocation<'_>, _service: &UpdateService, out: &mut dyn Write) -> i32 {
    match render(invocation, out) {
        Ok(code) => code,
        Err(e) => output_failure(&e),
    }
}

fn render(invocation: &Invocation<'_>, out: &mut dyn Write) -> io::Result<i32> {
    let args = invocation.args();
    if args.is_empty() {
        print_global_usage(out, invocation.commands)?;
        return Ok(exitcode::OK);
    }

    let wanted = args.join(" ");
    match walk(invocation.commands)
        .into_iter()
        .find(|(name, _)| *name == wanted)
    {
        Some((name, command)) => {
            print_command_usage(out, &name, command)?;
            Ok(exitcode::OK)
        }
        None => {
            print_unknown_command(out, &wanted)?;
            Ok(exitcode::NO_COMMAND)
        }
    }
}
