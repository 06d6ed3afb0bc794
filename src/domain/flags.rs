//! Per-command flag declarations and binding
//!
//! Each command owns a `FlagSet`. Parsing tokenizes with clap, stops at the
//! first positional token, then routes every raw value through its adapter.
//! Tokens after the first positional are handed back untouched so the next
//! tree level (or the handler) can consume them.

use std::collections::BTreeMap;

use clap::{Arg, ArgAction, ArgMatches};
use tracing::trace;

use crate::domain::error::FlagError;
use crate::domain::values::{LiteralSet, NullableString, TriStateBool};

/// Internal id of the catch-all positional argument.
const REST: &str = "__rest";

/// How a flag takes its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Presence flag (`--force`); an attached literal may turn it off (`--force=false`)
    Switch,
    /// Free-form string (`--app-id abc`)
    String,
    /// Boolean literal with an unset state (`--paused=false`)
    TriState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: &'static str,
    pub kind: FlagKind,
    pub help: &'static str,
}

impl FlagSpec {
    /// Placeholder shown after the flag name in usage output.
    pub fn value_hint(&self) -> &'static str {
        match self.kind {
            FlagKind::Switch => "",
            FlagKind::String => " <string>",
            FlagKind::TriState => " <bool>",
        }
    }
}

/// Flag declarations of one command. Flags are never inherited by children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    specs: Vec<FlagSpec>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn switch(self, name: &'static str, help: &'static str) -> Self {
        self.with(name, FlagKind::Switch, help)
    }

    pub fn string(self, name: &'static str, help: &'static str) -> Self {
        self.with(name, FlagKind::String, help)
    }

    pub fn tristate(self, name: &'static str, help: &'static str) -> Self {
        self.with(name, FlagKind::TriState, help)
    }

    fn with(mut self, name: &'static str, kind: FlagKind, help: &'static str) -> Self {
        self.specs.push(FlagSpec { name, kind, help });
        self
    }

    pub fn specs(&self) -> &[FlagSpec] {
        &self.specs
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Bind `args` against this flag set.
    ///
    /// `command` only labels trace output.
    pub fn parse(&self, command: &str, args: &[String]) -> Result<FlagValues, FlagError> {
        let tokenizer = self.tokenizer();
        let args = long_form(&tokenizer, args);
        let matches = tokenizer.try_get_matches_from(args.iter().map(String::as_str))?;

        let mut values = BTreeMap::new();
        for spec in &self.specs {
            let value = bind(spec, &matches)?;
            values.insert(spec.name, value);
        }
        let rest: Vec<String> = matches
            .get_many::<String>(REST)
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default();
        trace!(command, flags = values.len(), remaining = rest.len(), "flags bound");

        Ok(FlagValues { values, rest })
    }

    fn tokenizer(&self) -> clap::Command {
        let mut cmd = clap::Command::new("flags")
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .arg(
                Arg::new(REST)
                    .num_args(1..)
                    .trailing_var_arg(true)
                    .action(ArgAction::Set),
            );
        for spec in &self.specs {
            let arg = Arg::new(spec.name).long(spec.name);
            let arg = match spec.kind {
                FlagKind::Switch => arg
                    .action(ArgAction::Append)
                    .num_args(0..=1)
                    .require_equals(true)
                    .default_missing_value("true"),
                FlagKind::String | FlagKind::TriState => arg
                    .action(ArgAction::Append)
                    .num_args(1)
                    .allow_hyphen_values(true),
            };
            cmd = cmd.arg(arg);
        }
        cmd
    }
}

/// Occurrences are applied in command-line order, so the last one wins and
/// every one of them is validated.
fn bind(spec: &FlagSpec, matches: &ArgMatches) -> Result<FlagValue, FlagError> {
    let raw = || {
        matches
            .get_many::<String>(spec.name)
            .into_iter()
            .flatten()
            .map(String::as_str)
    };
    match spec.kind {
        FlagKind::Switch => {
            let mut on = false;
            for v in raw() {
                on = LiteralSet::STANDARD
                    .parse(v)
                    .map_err(|source| FlagError::InvalidValue {
                        flag: spec.name.to_string(),
                        source,
                    })?;
            }
            Ok(FlagValue::Switch(on))
        }
        FlagKind::String => {
            let mut value = NullableString::new();
            raw().for_each(|v| value.set(v));
            Ok(FlagValue::String(value))
        }
        FlagKind::TriState => {
            let mut value = TriStateBool::new();
            for v in raw() {
                value.set(v).map_err(|source| FlagError::InvalidValue {
                    flag: spec.name.to_string(),
                    source,
                })?;
            }
            Ok(FlagValue::TriState(value))
        }
    }
}

/// Rewrite single-dash spellings of declared long flags (`-app-id x`,
/// `-version`) to their double-dash form.
///
/// Only the flag region is touched: rewriting stops at `--` or at the first
/// positional token, and values of flags that take a separate argument are
/// skipped. Undeclared names and short flags pass through unchanged.
pub fn long_form(cmd: &clap::Command, args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut tokens = args.iter();
    while let Some(token) = tokens.next() {
        if token == "--" || token == "-" || !token.starts_with('-') {
            out.push(token.clone());
            out.extend(tokens.cloned());
            break;
        }
        let (body, single) = match token.strip_prefix("--") {
            Some(body) => (body, false),
            None => (&token[1..], true),
        };
        let (name, attached) = match body.split_once('=') {
            Some((name, _)) => (name, true),
            None => (body, false),
        };
        let Some(arg) = cmd.get_arguments().find(|a| a.get_long() == Some(name)) else {
            out.push(token.clone());
            continue;
        };
        out.push(if single {
            format!("-{}", token)
        } else {
            token.clone()
        });
        if !attached && arg.get_action().takes_values() && !arg.is_require_equals_set() {
            if let Some(value) = tokens.next() {
                out.push(value.clone());
            }
        }
    }
    out
}

/// A bound flag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Switch(bool),
    String(NullableString),
    TriState(TriStateBool),
}

/// Result of parsing one command's flags: bound values plus the tokens left over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagValues {
    values: BTreeMap<&'static str, FlagValue>,
    rest: Vec<String>,
}

impl FlagValues {
    /// Tokens after the last flag, starting at the first positional.
    pub fn args(&self) -> &[String] {
        &self.rest
    }

    /// Value of a string flag; unset if undeclared or never given.
    pub fn string(&self, name: &str) -> NullableString {
        match self.values.get(name) {
            Some(FlagValue::String(v)) => v.clone(),
            _ => NullableString::new(),
        }
    }

    pub fn tristate(&self, name: &str) -> TriStateBool {
        match self.values.get(name) {
            Some(FlagValue::TriState(v)) => *v,
            _ => TriStateBool::new(),
        }
    }

    pub fn switch(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(FlagValue::Switch(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn flags() -> FlagSet {
        FlagSet::new()
            .string("app-id", "application id")
            .tristate("paused", "paused state")
            .switch("force", "force it")
    }

    #[test]
    fn given_flags_then_positional_when_parse_then_stops_at_positional() {
        let values = flags()
            .parse("t", &args(&["--app-id", "abc", "list", "--force"]))
            .unwrap();
        assert_eq!(values.string("app-id").get(), Some("abc"));
        assert!(!values.switch("force"));
        assert_eq!(values.args(), &args(&["list", "--force"])[..]);
    }

    #[test]
    fn given_equals_syntax_when_parse_then_binds_value() {
        let values = flags()
            .parse("t", &args(&["--paused=False", "--force"]))
            .unwrap();
        assert_eq!(values.tristate("paused").get(), Some(false));
        assert!(values.switch("force"));
        assert!(values.args().is_empty());
    }

    #[test]
    fn given_no_args_when_parse_then_everything_unset() {
        let values = flags().parse("t", &[]).unwrap();
        assert!(!values.string("app-id").is_set());
        assert!(!values.tristate("paused").is_set());
        assert!(!values.switch("force"));
    }

    #[test]
    fn given_empty_string_value_when_parse_then_set_but_empty() {
        let values = flags().parse("t", &args(&["--app-id="])).unwrap();
        let app = values.string("app-id");
        assert!(app.is_set());
        assert_eq!(app.to_string(), "");
    }

    #[test]
    fn given_repeated_flag_when_parse_then_last_wins() {
        let values = flags()
            .parse("t", &args(&["--app-id", "a", "--app-id", "b"]))
            .unwrap();
        assert_eq!(values.string("app-id").get(), Some("b"));
    }

    #[test]
    fn given_unknown_flag_when_parse_then_parse_error() {
        let err = flags().parse("t", &args(&["--bogus"])).unwrap_err();
        assert!(matches!(err, FlagError::Parse(_)));
        assert!(err.to_string().contains("--bogus"));
    }

    #[test]
    fn given_missing_value_when_parse_then_parse_error() {
        let err = flags().parse("t", &args(&["--app-id"])).unwrap_err();
        assert!(matches!(err, FlagError::Parse(_)));
    }

    #[test]
    fn given_invalid_tristate_when_parse_then_invalid_value() {
        let err = flags().parse("t", &args(&["--paused", "yes"])).unwrap_err();
        match err {
            FlagError::InvalidValue { flag, .. } => assert_eq!(flag, "paused"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn given_double_dash_when_parse_then_rest_is_positional() {
        let values = flags().parse("t", &args(&["--", "--force"])).unwrap();
        assert!(!values.switch("force"));
        assert_eq!(values.args(), &args(&["--force"])[..]);
    }

    #[test]
    fn given_help_flag_when_parse_then_rejected_as_unknown() {
        assert!(flags().parse("t", &args(&["--help"])).is_err());
    }

    #[rstest]
    #[case("--force=false", false)]
    #[case("--force=True", true)]
    #[case("--force=1", true)]
    #[case("--force", true)]
    fn given_switch_literal_when_parse_then_bound(#[case] token: &str, #[case] expected: bool) {
        let values = flags().parse("t", &args(&[token])).unwrap();
        assert_eq!(values.switch("force"), expected);
    }

    #[test]
    fn given_switch_with_bad_literal_when_parse_then_invalid_value() {
        let err = flags().parse("t", &args(&["--force=yes"])).unwrap_err();
        match err {
            FlagError::InvalidValue { flag, .. } => assert_eq!(flag, "force"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn given_switch_then_positional_when_parse_then_positional_not_consumed() {
        let values = flags().parse("t", &args(&["--force", "false"])).unwrap();
        assert!(values.switch("force"));
        assert_eq!(values.args(), &args(&["false"])[..]);
    }

    #[test]
    fn given_repeated_switch_when_parse_then_last_wins() {
        let values = flags()
            .parse("t", &args(&["--force", "--force=false"]))
            .unwrap();
        assert!(!values.switch("force"));
    }

    #[test]
    fn given_single_dash_long_flags_when_parse_then_bound() {
        let values = flags()
            .parse("t", &args(&["-app-id", "-x", "-paused=t", "-force", "list", "-force"]))
            .unwrap();
        assert_eq!(values.string("app-id").get(), Some("-x"));
        assert_eq!(values.tristate("paused").get(), Some(true));
        assert!(values.switch("force"));
        assert_eq!(values.args(), &args(&["list", "-force"])[..]);
    }

    #[test]
    fn given_single_dash_unknown_flag_when_parse_then_parse_error() {
        let err = flags().parse("t", &args(&["-bogus"])).unwrap_err();
        assert!(matches!(err, FlagError::Parse(_)));
    }
}
