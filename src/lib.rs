//! Authoring tool for gateway integration records.
//!
//! ```text
//! provider args → BuilderRegistry → IntegrationRecord → CrudEngine → ConfigStore
//! ```

pub mod args;
pub mod builder;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod crud;
pub mod logging;
