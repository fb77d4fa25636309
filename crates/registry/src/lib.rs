//! Spawn registry: the lookup and mutation surface for spawn points.
//!
//! # Invariants
//! - An explicit override always wins over the host's default spawn.
//! - Set operations mutate the cache first, then persist; a failed persist
//!   leaves the cache ahead of the file until the next load.
//! - The persisted document is loaded into the cache at most once.

pub mod provider;
pub mod registry;
pub mod trigger;

pub use provider::{StaticWorlds, WorldProvider};
pub use registry::{LoadOutcome, RegistryError, SpawnRegistry};
pub use trigger::{ReadyTrigger, Trigger};
