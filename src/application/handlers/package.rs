//! `package` commands

use std::io::Write;

use crate::application::handlers::{list, required};
use crate::application::service::UpdateService;
use crate::domain::Invocation;
use crate::exitcode;

const COLUMNS: &[(&str, &str)] = &[
    ("Version", "version"),
    ("Url", "url"),
    ("Size", "size"),
];

/// `package list --app-id <id>`
pub fn list_packages(
    invocation: &Invocation<'_>,
    service: &UpdateService,
    out: &mut dyn Write,
) -> i32 {
    let Some(app_id) = required(invocation, "app-id") else {
        return exitcode::USAGE;
    };
    list(invocation, service, out, &["apps", app_id.as_str(), "packages"], COLUMNS, |_| true)
}
