//! `app` commands

use std::io::Write;

use crate::application::handlers::list;
use crate::application::service::UpdateService;
use crate::domain::Invocation;

const COLUMNS: &[(&str, &str)] = &[
    ("Id", "id"),
    ("Label", "label"),
    ("Description", "description"),
];

/// `app list`
pub fn list_apps(invocation: &Invocation<'_>, service: &UpdateService, out: &mut dyn Write) -> i32 {
    list(invocation, service, out, &["apps"], COLUMNS, |_| true)
}
