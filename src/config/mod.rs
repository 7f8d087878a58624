//! Integration records, their backing file, and tool settings.

mod settings;
mod store;
mod types;

pub use settings::{Settings, SettingsError, StoreSettings, DEFAULT_STORE_FILE};
pub use store::{ConfigStore, StoreError, StoreLock};
pub use types::{AuthPluginSpec, IntegrationRecord, IntegrationsFile, ParamValue};
