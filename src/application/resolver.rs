//! Command resolution
//!
//! Walks argument tokens against the command tree, parsing each matched
//! node's flags and descending while the next token names a child. The
//! deepest match wins.

use thiserror::Error;
use tracing::{debug, trace};

use crate::domain::{join_name, Command, FlagError, FlagValues};

/// A matched command together with its bound flags.
#[derive(Debug)]
pub struct Resolved<'a> {
    pub command: &'a Command,
    /// Space-joined path of `command`, e.g. `"app list"`
    pub name: String,
    pub flags: FlagValues,
}

#[derive(Debug)]
pub enum Resolution<'a> {
    Found(Resolved<'a>),
    /// Nothing matched; `name` is the path that was searched for.
    Unknown { name: String },
}

impl<'a> Resolution<'a> {
    pub fn found(self) -> Option<Resolved<'a>> {
        match self {
            Resolution::Found(resolved) => Some(resolved),
            Resolution::Unknown { .. } => None,
        }
    }
}

/// Flags of a matched command did not parse.
#[derive(Error, Debug)]
#[error("{name}: {source}")]
pub struct UsageError<'a> {
    /// The command whose usage should be shown
    pub command: &'a Command,
    pub name: String,
    #[source]
    pub source: FlagError,
}

/// Resolve `args` against `candidates`.
///
/// `path` is the space-joined name consumed so far ("" at the root).
/// Candidate names are compared to the current token only; the earliest
/// registration wins on duplicates.
pub fn resolve<'a>(
    path: &str,
    args: &[String],
    candidates: &'a [Command],
) -> Result<Resolution<'a>, UsageError<'a>> {
    let Some((token, rest)) = args.split_first() else {
        return Ok(Resolution::Unknown {
            name: path.to_string(),
        });
    };
    let name = join_name(path, token);

    let Some(command) = candidates.iter().find(|c| c.name == token.as_str()) else {
        trace!(name = %name, "no command matched");
        return Ok(Resolution::Unknown { name });
    };

    let flags = command
        .flags
        .parse(&name, rest)
        .map_err(|source| UsageError {
            command,
            name: name.clone(),
            source,
        })?;

    if !command.children().is_empty() {
        if let Resolution::Found(deeper) = resolve(&name, flags.args(), command.children())? {
            return Ok(Resolution::Found(deeper));
        }
    }

    debug!(command = %name, args = ?flags.args(), "resolved command");
    Ok(Resolution::Found(Resolved {
        command,
        name,
        flags,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::service::UpdateService;
    use crate::domain::{FlagSet, Invocation};
    use crate::exitcode;
    use std::io::Write;

    fn noop(_: &Invocation<'_>, _: &UpdateService, _: &mut dyn Write) -> i32 {
        exitcode::OK
    }

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn tree() -> Vec<Command> {
        vec![
            Command::group(
                "app",
                "Manage applications",
                vec![
                    Command::leaf("list", "List applications", noop)
                        .with_flags(FlagSet::new().switch("all", "all apps")),
                ],
            )
            .with_flags(FlagSet::new().string("format", "output format")),
            Command::leaf("help", "Show help", noop),
            Command::leaf("help", "Duplicate help", noop),
        ]
    }

    #[test]
    fn given_empty_args_when_resolve_then_unknown_with_path() {
        let cmds = tree();
        match resolve("app", &[], &cmds).unwrap() {
            Resolution::Unknown { name } => assert_eq!(name, "app"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn given_unknown_first_token_when_resolve_then_unknown_name_is_token() {
        let cmds = tree();
        match resolve("", &args(&["bogus", "list"]), &cmds).unwrap() {
            Resolution::Unknown { name } => assert_eq!(name, "bogus"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn given_two_level_path_when_resolve_then_child_with_full_name() {
        let cmds = tree();
        let resolved = resolve("", &args(&["app", "list", "--all", "x"]), &cmds)
            .unwrap()
            .found()
            .unwrap();
        assert_eq!(resolved.name, "app list");
        assert_eq!(resolved.command.name, "list");
        assert!(resolved.flags.switch("all"));
        assert_eq!(resolved.flags.args(), &args(&["x"])[..]);
    }

    #[test]
    fn given_parent_flags_before_child_when_resolve_then_scoped_separately() {
        let cmds = tree();
        let resolved = resolve("", &args(&["app", "--format", "json", "list"]), &cmds)
            .unwrap()
            .found()
            .unwrap();
        assert_eq!(resolved.name, "app list");
        // Parent flags are not visible on the child
        assert!(!resolved.flags.string("format").is_set());
    }

    #[test]
    fn given_unmatched_child_token_when_resolve_then_parent_keeps_token() {
        let cmds = tree();
        let resolved = resolve("", &args(&["app", "frobnicate"]), &cmds)
            .unwrap()
            .found()
            .unwrap();
        assert_eq!(resolved.name, "app");
        assert_eq!(resolved.flags.args(), &args(&["frobnicate"])[..]);
    }

    #[test]
    fn given_bad_child_flag_when_resolve_then_usage_error_names_child() {
        let cmds = tree();
        let err = resolve("", &args(&["app", "list", "--format", "json"]), &cmds).unwrap_err();
        assert_eq!(err.name, "app list");
        assert_eq!(err.command.name, "list");
    }

    #[test]
    fn given_bad_parent_flag_when_resolve_then_usage_error_names_parent() {
        let cmds = tree();
        let err = resolve("", &args(&["app", "--all", "list"]), &cmds).unwrap_err();
        assert_eq!(err.name, "app");
    }

    #[test]
    fn given_duplicate_names_when_resolve_then_first_registration_wins() {
        let cmds = tree();
        let resolved = resolve("", &args(&["help"]), &cmds).unwrap().found().unwrap();
        assert_eq!(resolved.command.summary, "Show help");
    }
}
