//! Leaf command handlers
//!
//! Each handler gets its invocation, a signed service client and the output
//! sink, and returns the process exit code.

pub mod admin;
pub mod app;
pub mod channel;
pub mod group;
pub mod help;
pub mod package;

use std::io::{self, Write};

use serde_json::Value;
use tracing::error;

use crate::application::error::ServiceError;
use crate::application::service::UpdateService;
use crate::cli::output;
use crate::domain::Invocation;
use crate::exitcode;

/// Report a failed service call and map it to the API error code.
pub(crate) fn api_failure(invocation: &Invocation<'_>, err: &ServiceError) -> i32 {
    error!(command = invocation.name, error = %err, "service call failed");
    output::error(err);
    exitcode::API
}

/// Report a failed write to the output sink.
pub(crate) fn output_failure(err: &io::Error) -> i32 {
    output::error(&format!("write output: {}", err));
    exitcode::API
}

/// Value of a required string flag, or `None` if it was never given.
pub(crate) fn required(invocation: &Invocation<'_>, flag: &str) -> Option<String> {
    let value = invocation.flags.string(flag);
    if !value.is_set() {
        output::error(&format!("--{} is required", flag));
        return None;
    }
    value.get().map(str::to_string)
}

/// Print `items` of a list response as tab-separated rows under a header.
///
/// Non-string fields are printed as JSON; missing fields as empty cells.
pub(crate) fn print_items(
    out: &mut dyn Write,
    response: &Value,
    header: &[&str],
    fields: &[&str],
    keep: impl Fn(&Value) -> bool,
) -> io::Result<()> {
    writeln!(out, "{}", header.join("\t"))?;
    let items = response
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for item in items.iter().filter(|item| keep(item)) {
        let row: Vec<String> = fields.iter().map(|f| cell(item.get(*f))).collect();
        writeln!(out, "{}", row.join("\t"))?;
    }
    Ok(())
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// GET `segments` and print the listed items; shared by the `list` commands.
pub(crate) fn list(
    invocation: &Invocation<'_>,
    service: &UpdateService,
    out: &mut dyn Write,
    segments: &[&str],
    columns: &[(&str, &str)],
    keep: impl Fn(&Value) -> bool,
) -> i32 {
    let response = match service.get_json(segments) {
        Ok(response) => response,
        Err(e) => return api_failure(invocation, &e),
    };
    let header: Vec<&str> = columns.iter().map(|(h, _)| *h).collect();
    let fields: Vec<&str> = columns.iter().map(|(_, f)| *f).collect();
    match print_items(out, &response, &header, &fields, keep) {
        Ok(()) => exitcode::OK,
        Err(e) => output_failure(&e),
    }
}
