//! Command tree nodes

use std::io::Write;

use crate::application::service::UpdateService;
use crate::domain::flags::{FlagSet, FlagValues};

/// Everything a handler gets besides the client and the output sink.
#[derive(Debug)]
pub struct Invocation<'a> {
    /// Space-joined path of the resolved command, e.g. `"app list"`
    pub name: &'a str,
    /// Bound flags of the resolved command, including remaining positionals
    pub flags: &'a FlagValues,
    /// Dispatch root, for commands that introspect the tree (`help`)
    pub commands: &'a [Command],
}

impl Invocation<'_> {
    /// Positional arguments left after the command's flags.
    pub fn args(&self) -> &[String] {
        self.flags.args()
    }
}

/// Terminal action of a command. The return value is the process exit code.
pub type Handler = fn(&Invocation<'_>, &UpdateService, &mut dyn Write) -> i32;

/// What a node does when it is the deepest match.
#[derive(Debug, Clone)]
pub enum Body {
    /// Runs a handler; has no subcommands.
    Leaf(Handler),
    /// Namespace only; invoking it directly is a usage error.
    Group(Vec<Command>),
    /// Subcommands take precedence when the next token names one of them;
    /// otherwise the handler runs with that token as a positional argument.
    Hybrid {
        handler: Handler,
        children: Vec<Command>,
    },
}

/// A node of the command tree.
#[derive(Debug, Clone)]
pub struct Command {
    /// Own token only, never the parent prefix
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    pub flags: FlagSet,
    pub body: Body,
}

impl Command {
    pub fn leaf(name: &'static str, summary: &'static str, handler: Handler) -> Self {
        Self::new(name, summary, Body::Leaf(handler))
    }

    pub fn group(name: &'static str, summary: &'static str, children: Vec<Command>) -> Self {
        Self::new(name, summary, Body::Group(children))
    }

    pub fn hybrid(
        name: &'static str,
        summary: &'static str,
        handler: Handler,
        children: Vec<Command>,
    ) -> Self {
        Self::new(name, summary, Body::Hybrid { handler, children })
    }

    fn new(name: &'static str, summary: &'static str, body: Body) -> Self {
        Self {
            name,
            summary,
            usage: "",
            description: "",
            flags: FlagSet::new(),
            body,
        }
    }

    pub fn with_usage(mut self, usage: &'static str) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn with_flags(mut self, flags: FlagSet) -> Self {
        self.flags = flags;
        self
    }

    pub fn handler(&self) -> Option<Handler> {
        match &self.body {
            Body::Leaf(handler) | Body::Hybrid { handler, .. } => Some(*handler),
            Body::Group(_) => None,
        }
    }

    pub fn children(&self) -> &[Command] {
        match &self.body {
            Body::Group(children) | Body::Hybrid { children, .. } => children.as_slice(),
            Body::Leaf(_) => &[],
        }
    }
}

/// Depth-first walk yielding `(full name, command)`, parents before children.
pub fn walk(commands: &[Command]) -> Vec<(String, &Command)> {
    fn visit<'a>(prefix: &str, commands: &'a [Command], out: &mut Vec<(String, &'a Command)>) {
        for cmd in commands {
            let name = join_name(prefix, cmd.name);
            out.push((name.clone(), cmd));
            visit(&name, cmd.children(), out);
        }
    }
    let mut out = Vec::new();
    visit("", commands, &mut out);
    out
}

/// Join a parent path and a child token with a single space.
pub fn join_name(prefix: &str, token: &str) -> String {
    if prefix.is_empty() {
        token.to_string()
    } else {
        format!("{} {}", prefix, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exitcode;

    fn noop(_: &Invocation<'_>, _: &UpdateService, _: &mut dyn Write) -> i32 {
        exitcode::OK
    }

    #[test]
    fn given_group_when_queried_then_no_handler_and_children() {
        let cmd = Command::group("app", "apps", vec![Command::leaf("list", "list", noop)]);
        assert!(cmd.handler().is_none());
        assert_eq!(cmd.children().len(), 1);
    }

    #[test]
    fn given_hybrid_when_queried_then_handler_and_children() {
        let cmd = Command::hybrid("x", "x", noop, vec![Command::leaf("y", "y", noop)]);
        assert!(cmd.handler().is_some());
        assert_eq!(cmd.children()[0].name, "y");
    }

    #[test]
    fn given_tree_when_walk_then_full_names_parents_first() {
        let tree = vec![
            Command::group(
                "app",
                "apps",
                vec![
                    Command::leaf("list", "list", noop),
                    Command::leaf("create", "create", noop),
                ],
            ),
            Command::leaf("help", "help", noop),
        ];
        let names: Vec<String> = walk(&tree).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["app", "app list", "app create", "help"]);
    }

    #[test]
    fn given_prefix_when_join_name_then_space_separated() {
        assert_eq!(join_name("", "app"), "app");
        assert_eq!(join_name("app", "list"), "app list");
    }
}
