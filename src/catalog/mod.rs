//! Static templates for supported third-party APIs.
//!
//! Each provider is a [`ProviderDescriptor`]: its flags, a destination
//! template and the auth plugins it attaches. Templates reference flag values
//! as `{flag-name}`. Adding a provider means adding one descriptor to
//! [`PROVIDERS`]; no builder code changes.

mod domain;
mod providers;
mod template;

pub use domain::{has_host, normalize_domain};
pub use providers::PROVIDERS;
pub use template::{interpolate, placeholders};

use crate::args::{FlagDef, ResolvedFlags};
use crate::config::{AuthPluginSpec, ParamValue};

/// Default per-direction rate limit for catalog providers.
pub const DEFAULT_RATE_LIMIT: u64 = 100;

/// Declarative description of one provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderDescriptor {
    /// Registry key and default integration name.
    pub name: &'static str,
    /// One-line description shown by `gatecfg providers`.
    pub summary: &'static str,
    /// Provider-specific flags. `name` and the rate-limit flags are added by
    /// [`ProviderDescriptor::flag_defs`].
    pub flags: &'static [FlagDef],
    pub destination: &'static str,
    pub in_rate_limit: u64,
    pub out_rate_limit: u64,
    pub incoming: &'static [AuthTemplate],
    pub outgoing: &'static [AuthTemplate],
}

impl ProviderDescriptor {
    /// Full flag set: `name`, rate-limit overrides, then provider flags.
    pub fn flag_defs(&self) -> Vec<FlagDef> {
        let mut defs = vec![
            FlagDef::defaulted("name", self.name, "Integration name"),
            FlagDef::optional("in-rate-limit", "Inbound requests allowed per minute").count(),
            FlagDef::optional("out-rate-limit", "Outbound requests allowed per minute").count(),
        ];
        defs.extend_from_slice(self.flags);
        defs
    }

    /// Every template string in the descriptor, for consistency checks.
    pub fn templates(&self) -> Vec<&'static str> {
        let mut out = vec![self.destination];
        for auth in self.incoming.iter().chain(self.outgoing.iter()) {
            for (_, param) in auth.params {
                match param {
                    ParamTemplate::Text(t) => out.push(*t),
                    ParamTemplate::List(items) => out.extend(items.iter().copied()),
                    ParamTemplate::Integer(_) | ParamTemplate::Bool(_) => {}
                }
            }
        }
        out
    }
}

/// Template for one auth plugin spec.
#[derive(Debug, Clone, Copy)]
pub struct AuthTemplate {
    pub kind: &'static str,
    /// Only attached when this flag resolved to a non-empty value.
    pub when: Option<&'static str>,
    pub params: &'static [(&'static str, ParamTemplate)],
}

impl AuthTemplate {
    pub const fn new(kind: &'static str, params: &'static [(&'static str, ParamTemplate)]) -> Self {
        Self {
            kind,
            when: None,
            params,
        }
    }

    pub const fn when(self, flag: &'static str) -> Self {
        Self {
            when: Some(flag),
            ..self
        }
    }

    /// Materializes the template, or `None` when its `when` flag is unset.
    pub fn render(&self, flags: &ResolvedFlags) -> Option<AuthPluginSpec> {
        if let Some(flag) = self.when {
            if !flags.is_set(flag) {
                return None;
            }
        }

        let mut spec = AuthPluginSpec::new(self.kind);
        for (key, param) in self.params {
            spec.params.insert(key.to_string(), param.render(flags));
        }
        Some(spec)
    }
}

/// Template for one auth plugin parameter.
#[derive(Debug, Clone, Copy)]
pub enum ParamTemplate {
    Text(&'static str),
    List(&'static [&'static str]),
    Integer(i64),
    Bool(bool),
}

impl ParamTemplate {
    pub fn render(&self, flags: &ResolvedFlags) -> ParamValue {
        match self {
            Self::Text(t) => ParamValue::Text(interpolate(t, flags)),
            Self::List(items) => {
                ParamValue::List(items.iter().map(|t| interpolate(t, flags)).collect())
            }
            Self::Integer(n) => ParamValue::Integer(*n),
            Self::Bool(b) => ParamValue::Bool(*b),
        }
    }
}

/// Looks up a catalog descriptor by case-insensitive name.
pub fn find(name: &str) -> Option<&'static ProviderDescriptor> {
    let name = name.to_lowercase();
    PROVIDERS.iter().find(|p| p.name == name)
}
