//! CRUD engine over the integrations file.
//!
//! Every mutation is lock → load → mutate → save; the name-uniqueness
//! invariant is enforced here. Builders are only consulted by the
//! argument-driven paths.

use thiserror::Error;

use crate::builder::{BuildError, BuilderRegistry};
use crate::config::{ConfigStore, IntegrationRecord, StoreError, StoreLock};

/// Errors surfaced by CRUD operations.
#[derive(Debug, Error)]
pub enum CrudError {
    #[error("unknown provider '{name}' (available: {})", .available.join(", "))]
    UnknownProvider { name: String, available: Vec<String> },

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("integration '{name}' already exists; use `update` to replace it")]
    Duplicate { name: String },

    #[error("invalid integration: {0}")]
    Invalid(String),

    #[error("integration '{name}' not found")]
    NotFound { name: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Replaced,
    Inserted,
}

/// Dispatches CRUD operations to the store and the builder registry.
pub struct CrudEngine<'a> {
    store: &'a ConfigStore,
    registry: &'a BuilderRegistry,
    locking: bool,
}

impl<'a> CrudEngine<'a> {
    pub fn new(store: &'a ConfigStore, registry: &'a BuilderRegistry) -> Self {
        Self {
            store,
            registry,
            locking: true,
        }
    }

    /// Enable or disable the advisory lock held across load and save.
    pub fn with_locking(mut self, locking: bool) -> Self {
        self.locking = locking;
        self
    }

    /// Runs the named provider's builder. Touches no files.
    pub fn build(&self, provider: &str, args: &[String]) -> Result<IntegrationRecord, CrudError> {
        let builder = self
            .registry
            .get(provider)
            .ok_or_else(|| CrudError::UnknownProvider {
                name: provider.to_string(),
                available: self.registry.list_names(),
            })?;
        Ok(builder(args)?)
    }

    /// Builds a record with `provider` and adds it.
    pub fn add_from_args(
        &self,
        provider: &str,
        args: &[String],
    ) -> Result<IntegrationRecord, CrudError> {
        let record = self.build(provider, args)?;
        self.add(record)
    }

    /// Builds a record with `provider` and upserts it.
    pub fn update_from_args(
        &self,
        provider: &str,
        args: &[String],
    ) -> Result<(IntegrationRecord, UpdateOutcome), CrudError> {
        let record = self.build(provider, args)?;
        self.update(record)
    }

    /// Appends `record`; fails with [`CrudError::Duplicate`] on a name clash.
    pub fn add(&self, record: IntegrationRecord) -> Result<IntegrationRecord, CrudError> {
        let record = prepare(record)?;
        let _lock = self.lock()?;

        let mut records = self.store.load()?;
        insert_unique(&mut records, record.clone())?;
        self.store.save(&records)?;

        tracing::info!(name = %record.name, total = records.len(), "added integration");
        Ok(record)
    }

    /// Replaces the matching record in place, or appends it.
    pub fn update(
        &self,
        record: IntegrationRecord,
    ) -> Result<(IntegrationRecord, UpdateOutcome), CrudError> {
        let record = prepare(record)?;
        let _lock = self.lock()?;

        let mut records = self.store.load()?;
        let outcome = upsert(&mut records, record.clone());
        self.store.save(&records)?;

        tracing::info!(name = %record.name, ?outcome, "updated integration");
        Ok((record, outcome))
    }

    /// Removes the matching record. Absent names are a no-op; the
    /// collection is saved either way. Returns whether a record was removed.
    pub fn delete(&self, name: &str) -> Result<bool, CrudError> {
        let _lock = self.lock()?;

        let mut records = self.store.load()?;
        let removed = remove(&mut records, name);
        self.store.save(&records)?;

        match &removed {
            Some(record) => tracing::info!(name = %record.name, "deleted integration"),
            None => tracing::warn!(name = %name.to_lowercase(), "no integration to delete"),
        }
        Ok(removed.is_some())
    }

    /// Record names in stored order.
    pub fn list(&self) -> Result<Vec<String>, CrudError> {
        let records = self.store.load()?;
        Ok(records.into_iter().map(|r| r.name).collect())
    }

    /// A single record by case-insensitive name.
    pub fn show(&self, name: &str) -> Result<IntegrationRecord, CrudError> {
        self.store
            .load()?
            .into_iter()
            .find(|r| r.is_named(name))
            .ok_or_else(|| CrudError::NotFound {
                name: name.to_lowercase(),
            })
    }

    fn lock(&self) -> Result<Option<StoreLock>, CrudError> {
        if !self.locking {
            return Ok(None);
        }
        Ok(Some(self.store.lock()?))
    }
}

/// Lowercases the name and checks record invariants.
fn prepare(mut record: IntegrationRecord) -> Result<IntegrationRecord, CrudError> {
    record.name = record.name.trim().to_lowercase();
    record.validate().map_err(CrudError::Invalid)?;
    Ok(record)
}

/// Appends `record` unless a record with the same name exists.
pub fn insert_unique(
    records: &mut Vec<IntegrationRecord>,
    record: IntegrationRecord,
) -> Result<(), CrudError> {
    if records.iter().any(|r| r.is_named(&record.name)) {
        return Err(CrudError::Duplicate { name: record.name });
    }
    records.push(record);
    Ok(())
}

/// Replaces the first record with the same name, or appends.
pub fn upsert(records: &mut Vec<IntegrationRecord>, record: IntegrationRecord) -> UpdateOutcome {
    match records.iter_mut().find(|r| r.is_named(&record.name)) {
        Some(existing) => {
            *existing = record;
            UpdateOutcome::Replaced
        }
        None => {
            records.push(record);
            UpdateOutcome::Inserted
        }
    }
}

/// Removes and returns the first record named `name`.
pub fn remove(records: &mut Vec<IntegrationRecord>, name: &str) -> Option<IntegrationRecord> {
    let index = records.iter().position(|r| r.is_named(name))?;
    Some(records.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, destination: &str) -> IntegrationRecord {
        IntegrationRecord::new(name, destination)
    }

    #[test]
    fn insert_unique_rejects_case_variant() {
        let mut records = vec![record("slack", "https://a")];
        let err = insert_unique(&mut records, record("SLACK", "https://b")).unwrap_err();
        assert!(matches!(err, CrudError::Duplicate { .. }));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut records = vec![
            record("a", "https://a"),
            record("b", "https://b"),
            record("c", "https://c"),
        ];
        let outcome = upsert(&mut records, record("b", "https://new"));
        assert_eq!(outcome, UpdateOutcome::Replaced);
        assert_eq!(records[1].destination, "https://new");
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn upsert_appends_when_absent() {
        let mut records = vec![record("a", "https://a")];
        assert_eq!(upsert(&mut records, record("z", "https://z")), UpdateOutcome::Inserted);
        assert_eq!(records.last().unwrap().name, "z");
    }

    #[test]
    fn remove_shifts_left() {
        let mut records = vec![
            record("a", "https://a"),
            record("b", "https://b"),
            record("c", "https://c"),
        ];
        let removed = remove(&mut records, "B").unwrap();
        assert_eq!(removed.name, "b");
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert!(remove(&mut records, "missing").is_none());
    }

    #[test]
    fn prepare_lowercases_and_validates() {
        let prepared = prepare(record(" Slack ", "https://slack.com/api")).unwrap();
        assert_eq!(prepared.name, "slack");
        assert!(matches!(prepare(record("", "https://x")), Err(CrudError::Invalid(_))));
    }
}
