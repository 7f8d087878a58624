//! The one generic builder: descriptor + args → IntegrationRecord.

use thiserror::Error;

use crate::args::{parse_flags, usage, ArgError, FlagKind, ResolvedFlags};
use crate::catalog::{has_host, interpolate, normalize_domain, ProviderDescriptor};
use crate::config::IntegrationRecord;

/// Validation failures raised by a builder before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("{provider}: {source}")]
    Flags {
        provider: String,
        #[source]
        source: ArgError,
    },

    #[error("{provider}: invalid value '{value}' for -{flag}: expected a non-negative integer")]
    InvalidNumber {
        provider: String,
        flag: String,
        value: String,
    },

    #[error("{provider}: -{flag} must name a host")]
    EmptyDomain { provider: String, flag: String },

    /// `-h` / `-help` was passed; carries the rendered usage text.
    #[error("{usage}")]
    HelpRequested { usage: String },
}

/// Builds a record from `descriptor` and builder-style `args`.
///
/// Pure: no I/O, no global state.
pub fn materialize(
    descriptor: &ProviderDescriptor,
    args: &[String],
) -> Result<IntegrationRecord, BuildError> {
    let defs = descriptor.flag_defs();
    let mut flags = parse_flags(args, &defs).map_err(|e| match e {
        ArgError::HelpRequested => BuildError::HelpRequested {
            usage: usage(descriptor.name, &defs),
        },
        other => BuildError::Flags {
            provider: descriptor.name.to_string(),
            source: other,
        },
    })?;

    for def in &defs {
        if def.kind == FlagKind::Domain && flags.is_set(def.name) {
            let normalized = normalize_domain(flags.get(def.name));
            if !has_host(&normalized) {
                return Err(BuildError::EmptyDomain {
                    provider: descriptor.name.to_string(),
                    flag: def.name.to_string(),
                });
            }
            flags.set(def.name, normalized);
        }
    }

    let in_rate_limit = rate_limit(descriptor, &flags, "in-rate-limit", descriptor.in_rate_limit)?;
    let out_rate_limit =
        rate_limit(descriptor, &flags, "out-rate-limit", descriptor.out_rate_limit)?;

    Ok(IntegrationRecord {
        name: flags.get("name").to_string(),
        destination: interpolate(descriptor.destination, &flags),
        in_rate_limit,
        out_rate_limit,
        incoming_auth: descriptor
            .incoming
            .iter()
            .filter_map(|t| t.render(&flags))
            .collect(),
        outgoing_auth: descriptor
            .outgoing
            .iter()
            .filter_map(|t| t.render(&flags))
            .collect(),
        allowed_callers: Vec::new(),
        extra: Default::default(),
    })
}

fn rate_limit(
    descriptor: &ProviderDescriptor,
    flags: &ResolvedFlags,
    flag: &str,
    default: u64,
) -> Result<u64, BuildError> {
    let raw = flags.get(flag).trim();
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse().map_err(|_| BuildError::InvalidNumber {
        provider: descriptor.name.to_string(),
        flag: flag.to_string(),
        value: raw.to_string(),
    })
}
