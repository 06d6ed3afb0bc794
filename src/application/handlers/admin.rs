//! `admin-user` commands

use std::io::Write;

use crate::application::handlers::list;
use crate::application::service::UpdateService;
use crate::domain::Invocation;

/// `admin-user list`
pub fn list_users(invocation: &Invocation<'_>, service: &UpdateService, out: &mut dyn Write) -> i32 {
    list(invocation, service, out, &["admin", "user"], &[("User", "user")], |_| true)
}
