//! File-backed spawn document.
//!
//! Layout of the document (YAML, one flat mapping):
//! ```text
//! overworld:            - world name -> location
//!   world: overworld
//!   x: 0.5
//!   y: 64.0
//!   z: 0.5
//!   yaw: 0.0
//!   pitch: 0.0
//! Global_Spawn:         - reserved key -> hub location
//!   world: lobby
//!   ...
//! ```

use crate::config::StoreConfig;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use spawnpoint_common::Location;

/// Reserved document key holding the global (hub) spawn.
pub const GLOBAL_SPAWN_KEY: &str = "Global_Spawn";

/// Errors from file-backed persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("malformed spawn document {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
}

/// Everything the store could interpret from the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnDocument {
    pub overrides: HashMap<String, Location>,
    pub global: Option<Location>,
}

/// Reads and writes the spawn document.
///
/// The parsed document is retained between calls so a save only replaces one
/// key and writes everything else back as it was read.
pub struct ConfigStore {
    config: StoreConfig,
    document: Option<Mapping>,
}

impl ConfigStore {
    /// Create a store for the configured path. Does not touch the disk.
    pub fn open(config: StoreConfig) -> Self {
        Self {
            config,
            document: None,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Path of the spawn document.
    pub fn path(&self) -> PathBuf {
        self.config.path()
    }

    /// Read the document from disk and extract every well-formed location.
    ///
    /// A missing file yields an empty document. Entries that are not
    /// locations are skipped with a warning.
    pub fn load(&mut self) -> Result<SpawnDocument, StoreError> {
        let path = self.path();
        let _span = tracing::info_span!("spawn_store_load", path = %path.display()).entered();

        let document = read_document(&path)?;
        let parsed = interpret(&document);
        self.document = Some(document);
        Ok(parsed)
    }

    /// Set one key and persist the entire document synchronously.
    ///
    /// If nothing has been loaded yet, the file on disk is read first so its
    /// other keys survive the rewrite.
    pub fn save(&mut self, key: &str, location: &Location) -> Result<(), StoreError> {
        let path = self.path();
        let value = serde_yaml::to_value(location)?;

        if self.document.is_none() {
            self.document = Some(read_document(&path)?);
        }
        let document = self.document.get_or_insert_with(Mapping::new);
        document.insert(Value::String(key.to_owned()), value);

        write_document(&path, document)
    }
}

fn read_document(path: &Path) -> Result<Mapping, StoreError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no spawn document yet");
            return Ok(Mapping::new());
        }
        Err(e) => return Err(e.into()),
    };

    match serde_yaml::from_str::<Value>(&text)? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        other => Err(StoreError::Malformed {
            path: path.to_path_buf(),
            reason: format!("expected a mapping at the top level, found {}", kind_of(&other)),
        }),
    }
}

fn write_document(path: &Path, document: &Mapping) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let text = serde_yaml::to_string(document)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

fn interpret(document: &Mapping) -> SpawnDocument {
    let mut parsed = SpawnDocument::default();
    for (key, value) in document {
        let Some(key) = key.as_str() else {
            tracing::warn!(?key, "skipping spawn entry with a non-string key");
            continue;
        };
        let location = match serde_yaml::from_value::<Location>(value.clone()) {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!(key, error = %e, "skipping malformed spawn entry");
                continue;
            }
        };
        if key == GLOBAL_SPAWN_KEY {
            parsed.global = Some(location);
        } else {
            parsed.overrides.insert(key.to_owned(), location);
        }
    }
    parsed
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
