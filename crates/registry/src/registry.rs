use crate::provider::WorldProvider;
use spawnpoint_common::Location;
use spawnpoint_persist::{ConfigStore, GLOBAL_SPAWN_KEY, StoreError};
use std::collections::HashMap;

/// Errors surfaced by registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("world name {0:?} is reserved for the global spawn")]
    ReservedWorldName(String),
}

/// Result of asking the registry to load the persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The document was read. Counts are what the cache holds afterwards.
    Loaded { overrides: usize, global: bool },
    /// A previous load already populated the cache; nothing was read.
    AlreadyLoaded,
}

/// Spawn points for every world plus the server-wide global spawn.
///
/// Starts empty. Call [`SpawnRegistry::load`] once the host is ready; until
/// then lookups fall back to the host defaults and no global spawn is known.
/// Every mutation takes `&mut self`, so the cache-and-persist sequence is
/// never interleaved. Hosts sharing a registry across threads should hold one
/// lock across each whole set call.
pub struct SpawnRegistry<P> {
    store: ConfigStore,
    provider: P,
    overrides: HashMap<String, Location>,
    global: Option<Location>,
    loaded: bool,
}

impl<P: WorldProvider> SpawnRegistry<P> {
    /// Create an empty, not yet loaded registry.
    pub fn new(store: ConfigStore, provider: P) -> Self {
        Self {
            store,
            provider,
            overrides: HashMap::new(),
            global: None,
            loaded: false,
        }
    }

    /// Whether the persisted document has been merged into the cache.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Read the persisted document into the cache.
    ///
    /// Only the first successful call reads from disk. Anything set before
    /// the load is newer than the file and is kept over the loaded value.
    pub fn load(&mut self) -> Result<LoadOutcome, RegistryError> {
        if self.loaded {
            tracing::debug!("spawn points already loaded, skipping");
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        let document = self.store.load()?;
        for (world, location) in document.overrides {
            self.overrides.entry(world).or_insert(location);
        }
        if self.global.is_none() {
            self.global = document.global;
        }
        self.loaded = true;

        tracing::info!(
            overrides = self.overrides.len(),
            global = self.global.is_some(),
            "spawn points loaded"
        );
        Ok(LoadOutcome::Loaded {
            overrides: self.overrides.len(),
            global: self.global.is_some(),
        })
    }

    /// Spawn point of a world: its override if one is set, else the host default.
    ///
    /// `None` means the world does not exist in the host, which is distinct
    /// from having no override.
    pub fn spawn_point(&self, world_name: &str) -> Option<Location> {
        if let Some(location) = self.overrides.get(world_name) {
            return Some(location.clone());
        }
        if !self.provider.world_exists(world_name) {
            return None;
        }
        self.provider.default_spawn_of(world_name)
    }

    /// Spawn point of a world the caller already holds, using `default` when
    /// no override is set. Does not consult the provider.
    pub fn spawn_point_or_else(
        &self,
        world_name: &str,
        default: impl FnOnce() -> Location,
    ) -> Location {
        self.overrides
            .get(world_name)
            .cloned()
            .unwrap_or_else(default)
    }

    /// Set a world's spawn point and persist it.
    ///
    /// The cache is updated before the write. If the write fails the error is
    /// returned and the cache keeps the new value.
    pub fn set_spawn_point(
        &mut self,
        world_name: &str,
        location: Location,
    ) -> Result<(), RegistryError> {
        if world_name == GLOBAL_SPAWN_KEY {
            return Err(RegistryError::ReservedWorldName(world_name.to_owned()));
        }

        self.overrides.insert(world_name.to_owned(), location);
        tracing::debug!(world = world_name, "spawn point set");

        let location = &self.overrides[world_name];
        self.store.save(world_name, location).map_err(|e| {
            tracing::warn!(world = world_name, error = %e, "failed to persist spawn point");
            RegistryError::from(e)
        })
    }

    /// The server's hub location, if one has been set or loaded.
    pub fn global_spawn(&self) -> Option<&Location> {
        self.global.as_ref()
    }

    /// Set the global spawn and persist it, with the same ordering as
    /// [`SpawnRegistry::set_spawn_point`].
    pub fn set_global_spawn(&mut self, location: Location) -> Result<(), RegistryError> {
        let location = &*self.global.insert(location);
        tracing::debug!(world = %location.world, "global spawn set");

        self.store.save(GLOBAL_SPAWN_KEY, location).map_err(|e| {
            tracing::warn!(error = %e, "failed to persist global spawn");
            RegistryError::from(e)
        })
    }

    /// Whether an explicit override exists for the world.
    pub fn has_override(&self, world_name: &str) -> bool {
        self.overrides.contains_key(world_name)
    }

    /// All explicit overrides, sorted by world name.
    pub fn overrides(&self) -> Vec<(&str, &Location)> {
        let mut entries: Vec<_> = self
            .overrides
            .iter()
            .map(|(world, location)| (world.as_str(), location))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
