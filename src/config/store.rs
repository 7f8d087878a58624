//! File-backed storage for the integration collection.
//!
//! The whole collection is read and rewritten on every operation. Writes go
//! through a temp file in the target directory and are renamed into place, so
//! a failed save leaves the previous content untouched. Mutating callers hold
//! an advisory lock on a sidecar `<file>.lock` across load and save.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde_yaml::Mapping;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::config::types::{IntegrationRecord, IntegrationsFile};

/// Errors raised while reading or writing the backing file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read integrations file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse integrations file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid integrations file '{path}': {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("Failed to serialize integrations: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("Failed to write integrations file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to lock '{path}': {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Integrations file '{path}' is locked by another gatecfg process")]
    Locked { path: PathBuf },
}

/// Read-modify-write access to the integrations file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the sidecar lock file.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Loads the full collection.
    ///
    /// - A missing file yields an empty collection.
    /// - An empty or whitespace-only file yields an empty collection.
    /// - Unreadable, malformed or invariant-violating content is an error.
    pub fn load(&self) -> Result<Vec<IntegrationRecord>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "integrations file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let file: IntegrationsFile =
            serde_yaml::from_str(&content).map_err(|e| StoreError::Parse {
                path: self.path.clone(),
                source: e,
            })?;

        self.validate(&file.integrations)?;
        tracing::debug!(
            path = %self.path.display(),
            count = file.integrations.len(),
            "loaded integrations"
        );
        Ok(file.integrations)
    }

    /// Replaces the backing file with the serialized collection.
    pub fn save(&self, records: &[IntegrationRecord]) -> Result<(), StoreError> {
        let file = IntegrationsFile {
            integrations: records.to_vec(),
            extra: self.preserved_keys(),
        };
        let content = serde_yaml::to_string(&file).map_err(StoreError::Serialize)?;

        let dir = self.parent_dir();
        fs::create_dir_all(&dir).map_err(|e| self.write_error(e))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.write_error(e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| self.write_error(e))?;
        // The temp file starts out 0600; keep the target's mode across the rename.
        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| self.write_error(e))?;
        }
        tmp.as_file().sync_all().map_err(|e| self.write_error(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;

        tracing::debug!(
            path = %self.path.display(),
            count = records.len(),
            "saved integrations"
        );
        Ok(())
    }

    /// Takes the exclusive advisory lock without blocking.
    ///
    /// Returns [`StoreError::Locked`] when another process holds it.
    pub fn lock(&self) -> Result<StoreLock, StoreError> {
        let path = self.lock_path();
        fs::create_dir_all(self.parent_dir()).map_err(|e| StoreError::Lock {
            path: path.clone(),
            source: e,
        })?;

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| StoreError::Lock {
                path: path.clone(),
                source: e,
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "acquired store lock");
                Ok(StoreLock { file, path })
            }
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => Err(StoreError::Locked {
                path: self.path.clone(),
            }),
            Err(e) => Err(StoreError::Lock { path, source: e }),
        }
    }

    fn validate(&self, records: &[IntegrationRecord]) -> Result<(), StoreError> {
        let mut seen = HashSet::new();
        for record in records {
            record.validate().map_err(|message| StoreError::Invalid {
                path: self.path.clone(),
                message,
            })?;
            if !seen.insert(record.name.to_lowercase()) {
                return Err(StoreError::Invalid {
                    path: self.path.clone(),
                    message: format!("duplicate integration name '{}'", record.name),
                });
            }
        }
        Ok(())
    }

    /// Top-level keys of the current file other than `integrations`.
    fn preserved_keys(&self) -> Mapping {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_yaml::from_str::<IntegrationsFile>(&content).ok())
            .map(|file| file.extra)
            .unwrap_or_default()
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

/// Held advisory lock; released on drop.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release store lock");
        }
    }
}
