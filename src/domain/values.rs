//! Flag value adapters
//!
//! Settable values for flags where "never set" must stay distinguishable
//! from "set to the default".

use std::fmt;

use crate::domain::error::FlagValueError;

/// Accepted literals for the tri-state boolean adapter.
pub const FALSY_LITERALS: &[&str] = &["0", "f", "false", "FALSE", "False"];
pub const TRUTHY_LITERALS: &[&str] = &["1", "t", "true", "TRUE", "True"];

/// Validator mapping an explicit set of string literals to booleans.
///
/// Matching is case-sensitive and exact; the falsy list is checked first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralSet {
    pub falsy: &'static [&'static str],
    pub truthy: &'static [&'static str],
}

impl LiteralSet {
    /// The literal table accepted by `TriStateBool`.
    pub const STANDARD: LiteralSet = LiteralSet {
        falsy: FALSY_LITERALS,
        truthy: TRUTHY_LITERALS,
    };

    /// Map `value` to a boolean, or reject it naming both literal sets.
    pub fn parse(&self, value: &str) -> Result<bool, FlagValueError> {
        let mut parsed = None;
        if self.falsy.contains(&value) {
            parsed = Some(false);
        }
        if self.truthy.contains(&value) {
            parsed = Some(true);
        }
        parsed.ok_or_else(|| FlagValueError::NotABool {
            value: value.to_string(),
            truthy: self.truthy.iter().map(|s| s.to_string()).collect(),
            falsy: self.falsy.iter().map(|s| s.to_string()).collect(),
        })
    }
}

/// String flag that remembers whether it was ever set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NullableString {
    value: Option<String>,
}

impl NullableString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`. Never fails.
    pub fn set(&mut self, value: &str) {
        self.value = Some(value.to_string());
    }

    pub fn get(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

/// Prints the stored value, or the empty string if never set.
///
/// Use `is_set()` to tell "unset" from "set to empty".
impl fmt::Display for NullableString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.as_deref().unwrap_or(""))
    }
}

/// Boolean flag with an explicit "unset" state and lenient literal parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriStateBool {
    value: Option<bool>,
    literals: LiteralSet,
}

impl Default for TriStateBool {
    fn default() -> Self {
        Self {
            value: None,
            literals: LiteralSet::STANDARD,
        }
    }
}

impl TriStateBool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter validating against a custom literal table.
    pub fn with_literals(literals: LiteralSet) -> Self {
        Self {
            value: None,
            literals,
        }
    }

    /// Parse and store `value`.
    ///
    /// On error the previous state is kept, so a fresh adapter stays unset.
    pub fn set(&mut self, value: &str) -> Result<(), FlagValueError> {
        let parsed = self.literals.parse(value)?;
        self.value = Some(parsed);
        Ok(())
    }

    pub fn get(&self) -> Option<bool> {
        self.value
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

impl fmt::Display for TriStateBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{}", v),
            None => Ok(()),
        }
    }
}
