//! Persistence: the spawn file mirrored as a flat key/value document.
//!
//! # Invariants
//! - A missing file is an empty document, never an error.
//! - Every save rewrites the whole document; the file is opened per call.
//! - Keys the store cannot interpret are kept and written back untouched.

mod config;
mod store;

pub use config::{DEFAULT_FILE_NAME, StoreConfig};
pub use store::{ConfigStore, GLOBAL_SPAWN_KEY, SpawnDocument, StoreError};
