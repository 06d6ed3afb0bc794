//! Command tree registry
//!
//! The ordered top-level commands forming the dispatch root.

use crate::application::handlers::{admin, app, channel, group, help, package};
use crate::domain::{Command, FlagSet};

/// Build the command tree. Called once at startup.
pub fn commands() -> Vec<Command> {
    vec![
        Command::group(
            "admin-user",
            "Manage administrative users.",
            vec![Command::leaf("list", "List all admin users.", admin::list_users)
                .with_description("Lists the users allowed to use the administrative API.")],
        )
        .with_usage("<command> [options]"),
        Command::group(
            "app",
            "Manage applications.",
            vec![Command::leaf("list", "List all applications.", app::list_apps)
                .with_description("Lists every application known to the update service.")],
        )
        .with_usage("<command> [options]"),
        Command::group(
            "channel",
            "Manage channels for an application.",
            vec![Command::leaf("list", "List channels for an application.", channel::list_channels)
                .with_usage("--app-id <appId>")
                .with_flags(app_id())],
        )
        .with_usage("<command> [options]"),
        Command::group(
            "group",
            "Manage groups of an application.",
            vec![Command::leaf("list", "List groups for an application.", group::list_groups)
                .with_usage("--app-id <appId> [--updates-paused <bool>]")
                .with_description(
                    "Lists the groups of an application.\n\
                     --updates-paused restricts the list to paused (true) or active (false) groups.",
                )
                .with_flags(app_id().tristate(
                    "updates-paused",
                    "Only list groups whose updates are paused (true) or not (false)",
                ))],
        )
        .with_usage("<command> [options]"),
        Command::leaf("help", "Show a list of commands or help for one command.", help::help)
            .with_usage("[command ...]")
            .with_description(
                "Without arguments lists every command and the global options.\n\
                 With a command name prints that command's usage, e.g. 'help app list'.",
            ),
        Command::group(
            "package",
            "Manage packages for an application.",
            vec![Command::leaf("list", "List packages for an application.", package::list_packages)
                .with_usage("--app-id <appId>")
                .with_flags(app_id())],
        )
        .with_usage("<command> [options]"),
    ]
}

fn app_id() -> FlagSet {
    FlagSet::new().string("app-id", "Application id")
}
