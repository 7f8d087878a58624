//! Flag definitions shared by every provider builder.

/// How a flag's value is post-processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Taken verbatim.
    Text,
    /// Normalized with [`normalize_domain`](crate::catalog::normalize_domain).
    Domain,
    /// Non-negative integer (rate limits).
    Count,
}

/// Whether a flag must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Must be present and non-empty.
    Required,
    /// May be absent; resolves to an empty value.
    Optional,
    /// Falls back to the given value when absent or blank.
    Default(&'static str),
}

/// A single flag definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDef {
    /// Flag name without dashes (e.g. "signing-secret").
    pub name: &'static str,
    pub kind: FlagKind,
    pub requirement: Requirement,
    /// Human-readable description (for usage text).
    pub description: &'static str,
}

impl FlagDef {
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: FlagKind::Text,
            requirement: Requirement::Required,
            description,
        }
    }

    pub const fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: FlagKind::Text,
            requirement: Requirement::Optional,
            description,
        }
    }

    pub const fn defaulted(
        name: &'static str,
        default: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind: FlagKind::Text,
            requirement: Requirement::Default(default),
            description,
        }
    }

    /// Marks the flag as a domain to be normalized.
    pub const fn domain(self) -> Self {
        Self {
            kind: FlagKind::Domain,
            ..self
        }
    }

    /// Marks the flag as a non-negative integer.
    pub const fn count(self) -> Self {
        Self {
            kind: FlagKind::Count,
            ..self
        }
    }

    /// Check if this definition matches the given flag key (dashes stripped).
    pub fn matches(&self, key: &str) -> bool {
        self.name == key
    }

    pub fn is_required(&self) -> bool {
        self.requirement == Requirement::Required
    }
}

/// Renders flag usage in the familiar `-name value` layout.
pub fn usage(command: &str, defs: &[FlagDef]) -> String {
    let mut out = format!("Usage of {}:\n", command);
    for def in defs {
        let suffix = match def.requirement {
            Requirement::Required => " (required)".to_string(),
            Requirement::Optional => String::new(),
            Requirement::Default(value) => format!(" (default \"{}\")", value),
        };
        let value_name = match def.kind {
            FlagKind::Count => "int",
            FlagKind::Text | FlagKind::Domain => "string",
        };
        out.push_str(&format!(
            "  -{} {}{}\n    \t{}\n",
            def.name, value_name, suffix, def.description
        ));
    }
    out
}
