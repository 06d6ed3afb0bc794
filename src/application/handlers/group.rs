//! `group` commands

use std::io::Write;

use serde_json::Value;

use crate::application::handlers::{list, required};
use crate::application::service::UpdateService;
use crate::domain::Invocation;
use crate::exitcode;

const COLUMNS: &[(&str, &str)] = &[
    ("Id", "id"),
    ("Label", "label"),
    ("Channel", "channelId"),
    ("UpdatesPaused", "updatesPaused"),
];

/// `group list --app-id <id> [--updates-paused <bool>]`
///
/// Without `--updates-paused` every group is listed; with it only groups
/// whose paused state matches.
pub fn list_groups(invocation: &Invocation<'_>, service: &UpdateService, out: &mut dyn Write) -> i32 {
    let Some(app_id) = required(invocation, "app-id") else {
        return exitcode::USAGE;
    };
    let paused = invocation.flags.tristate("updates-paused").get();
    list(
        invocation,
        service,
        out,
        &["apps", app_id.as_str(), "groups"],
        COLUMNS,
        |group| matches_paused(group, paused),
    )
}

fn matches_paused(group: &Value, wanted: Option<bool>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => group.get("updatesPaused").and_then(Value::as_bool).unwrap_or(false) == wanted,
    }
}
