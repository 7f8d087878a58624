use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

/// Root document of the backing file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationsFile {
    #[serde(default)]
    pub integrations: Vec<IntegrationRecord>,
    /// Top-level keys this tool does not manage, written back unchanged.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// One named integration entry consumed by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationRecord {
    /// Identity, compared case-insensitively and persisted lowercase.
    pub name: String,
    /// Base URL outbound traffic is proxied to (e.g. "https://slack.com/api").
    pub destination: String,
    #[serde(default)]
    pub in_rate_limit: u64,
    #[serde(default)]
    pub out_rate_limit: u64,
    #[serde(default)]
    pub incoming_auth: Vec<AuthPluginSpec>,
    #[serde(default)]
    pub outgoing_auth: Vec<AuthPluginSpec>,
    /// Opaque allow-list owned by the consuming service.
    #[serde(
        default,
        rename = "allowlist",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub allowed_callers: Vec<serde_yaml::Value>,
    /// Any other per-record keys, carried through load and save.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl IntegrationRecord {
    /// Record with no auth and zero rate limits.
    pub fn new(name: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            destination: destination.into(),
            in_rate_limit: 0,
            out_rate_limit: 0,
            incoming_auth: Vec::new(),
            outgoing_auth: Vec::new(),
            allowed_callers: Vec::new(),
            extra: Mapping::new(),
        }
    }

    /// Case-insensitive identity check.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Checks the structural invariants this tool is responsible for.
    ///
    /// Mechanism-specific parameter shape is left to the consuming service.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("integration name must not be empty".to_string());
        }

        let specs = self.incoming_auth.iter().chain(self.outgoing_auth.iter());
        for spec in specs {
            if spec.kind.trim().is_empty() {
                return Err(format!(
                    "integration '{}' has an auth plugin with an empty type",
                    self.name
                ));
            }
        }

        Ok(())
    }
}

/// One authentication mechanism attached to a traffic direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPluginSpec {
    /// Mechanism tag (e.g. "header_token", "hmac_signature").
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

impl AuthPluginSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: BTreeMap::new(),
        }
    }

    /// Builder-style param insertion.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }
}

/// Value of an auth plugin parameter.
///
/// The shapes builders emit get typed variants. Anything else a hand-edited
/// file carries (floats, maps, mixed lists, null) is kept as raw YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Text(String),
    List(Vec<String>),
    Other(serde_yaml::Value),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
