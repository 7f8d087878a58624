//! Flag parser — raw builder args → resolved flag values.
//!
//! Accepts `-key value`, `--key value` and `-key=value`. A repeated flag keeps
//! its last value.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::args::registry::{FlagDef, Requirement};

/// Errors produced while parsing builder arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    #[error("flag provided but not defined: -{0}")]
    UnknownFlag(String),

    #[error("flag needs an argument: -{0}")]
    MissingValue(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("missing required flag: -{0}")]
    MissingRequired(String),

    #[error("help requested")]
    HelpRequested,
}

/// Flag values after defaults are applied. Optional flags that were not given
/// resolve to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFlags {
    values: BTreeMap<&'static str, String>,
}

impl ResolvedFlags {
    /// Value of `name`, empty when the flag is optional and absent.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: &'static str, value: String) {
        self.values.insert(name, value);
    }

    /// Whether `name` resolved to a non-empty value.
    pub fn is_set(&self, name: &str) -> bool {
        !self.get(name).is_empty()
    }
}

/// Parses `raw_args` against `defs` and applies defaults and requiredness.
pub fn parse_flags(raw_args: &[String], defs: &[FlagDef]) -> Result<ResolvedFlags, ArgError> {
    let mut given: BTreeMap<&'static str, String> = BTreeMap::new();
    let mut iter = raw_args.iter();

    while let Some(arg) = iter.next() {
        let Some(key) = flag_key(arg) else {
            return Err(ArgError::UnexpectedArgument(arg.clone()));
        };

        // Inline `-key=value` form
        let (key, inline) = match key.split_once('=') {
            Some((k, v)) => (k, Some(v.to_string())),
            None => (key, None),
        };

        if key == "h" || key == "help" {
            return Err(ArgError::HelpRequested);
        }

        let def = defs
            .iter()
            .find(|d| d.matches(key))
            .ok_or_else(|| ArgError::UnknownFlag(key.to_string()))?;

        let value = match inline {
            Some(v) => v,
            None => iter
                .next()
                .cloned()
                .ok_or_else(|| ArgError::MissingValue(key.to_string()))?,
        };

        given.insert(def.name, value);
    }

    let mut resolved = ResolvedFlags::default();
    for def in defs {
        let value = given.remove(def.name);
        let value = match (def.requirement, value) {
            (Requirement::Required, Some(v)) if !blank(&v) => v,
            (Requirement::Required, _) => {
                return Err(ArgError::MissingRequired(def.name.to_string()))
            }
            (Requirement::Default(default), v) => match v {
                Some(v) if !blank(&v) => v,
                _ => default.to_string(),
            },
            (Requirement::Optional, v) => v.unwrap_or_default(),
        };
        resolved.set(def.name, value);
    }

    Ok(resolved)
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Strips one or two leading dashes. Returns `None` for positionals and bare dashes.
fn flag_key(arg: &str) -> Option<&str> {
    let key = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))?;
    if key.is_empty() || key.starts_with('-') {
        return None;
    }
    Some(key)
}
