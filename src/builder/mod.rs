//! Builder registry — provider name → record builder.
//!
//! The registry is an explicit object built once in `main` and handed to the
//! CRUD engine. Lookup is case-insensitive; names are stored lowercase.

mod materialize;

pub use materialize::{materialize, BuildError};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::catalog::{ProviderDescriptor, PROVIDERS};
use crate::config::IntegrationRecord;

/// Pure function from builder args to a validated record.
pub type Builder = Arc<dyn Fn(&[String]) -> Result<IntegrationRecord, BuildError> + Send + Sync>;

/// Registry of provider builders keyed by lowercase name.
#[derive(Clone, Default)]
pub struct BuilderRegistry {
    builders: BTreeMap<String, Builder>,
}

impl BuilderRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a builder for every catalog provider.
    pub fn with_catalog() -> Self {
        let mut registry = Self::new();
        for descriptor in PROVIDERS {
            registry.register(descriptor.name, descriptor_builder(descriptor));
        }
        registry
    }

    /// Register `builder` under the lowercased `name`. Re-registration replaces.
    pub fn register(&mut self, name: &str, builder: Builder) {
        let key = name.to_lowercase();
        if self.builders.insert(key.clone(), builder).is_some() {
            tracing::debug!(provider = %key, "replaced registered builder");
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<Builder> {
        self.builders.get(&name.to_lowercase()).cloned()
    }

    /// Registered names, sorted and unique.
    pub fn list_names(&self) -> Vec<String> {
        self.builders.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

impl fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderRegistry")
            .field("providers", &self.builders.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Wraps a catalog descriptor as a [`Builder`].
pub fn descriptor_builder(descriptor: &'static ProviderDescriptor) -> Builder {
    Arc::new(move |args: &[String]| materialize(descriptor, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(destination: &'static str) -> Builder {
        Arc::new(move |_: &[String]| {
            Ok::<_, BuildError>(IntegrationRecord::new("fixed", destination))
        })
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut registry = BuilderRegistry::new();
        registry.register("Slack", fixed("https://slack.com/api"));

        for name in ["slack", "SLACK", "sLaCk"] {
            let builder = registry.get(name).expect("registered");
            assert_eq!(builder(&[]).unwrap().destination, "https://slack.com/api");
        }
        assert!(registry.get("slackbot").is_none());
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = BuilderRegistry::new();
        registry.register("github", fixed("https://one"));
        registry.register("GitHub", fixed("https://two"));

        assert_eq!(registry.len(), 1);
        let builder = registry.get("github").unwrap();
        assert_eq!(builder(&[]).unwrap().destination, "https://two");
    }

    #[test]
    fn catalog_registry_covers_every_provider() {
        let registry = BuilderRegistry::with_catalog();
        assert_eq!(registry.len(), PROVIDERS.len());
        let names = registry.list_names();
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }
}
