use serde::Deserialize;
use spawnpoint_common::Location;
use std::collections::BTreeMap;

/// The host's view of which worlds exist and where they spawn players by default.
pub trait WorldProvider {
    fn world_exists(&self, name: &str) -> bool;

    /// Default spawn of an existing world. `None` if the host cannot produce one.
    fn default_spawn_of(&self, name: &str) -> Option<Location>;
}

/// A fixed set of worlds and their default spawns.
///
/// Deserializes from a mapping of world name to location, the same shape as
/// the spawn document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct StaticWorlds {
    worlds: BTreeMap<String, Location>,
}

impl StaticWorlds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a world with its default spawn, replacing any earlier entry.
    pub fn with_world(mut self, name: impl Into<String>, default_spawn: Location) -> Self {
        self.worlds.insert(name.into(), default_spawn);
        self
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.worlds.keys().map(String::as_str)
    }
}

impl WorldProvider for StaticWorlds {
    fn world_exists(&self, name: &str) -> bool {
        self.worlds.contains_key(name)
    }

    fn default_spawn_of(&self, name: &str) -> Option<Location> {
        self.worlds.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn static_worlds_lookup() {
        let worlds = StaticWorlds::new().with_world("overworld", Location::new("overworld", DVec3::ZERO));
        assert!(worlds.world_exists("overworld"));
        assert!(!worlds.world_exists("Overworld"));
        assert_eq!(worlds.default_spawn_of("overworld").unwrap().world, "overworld");
        assert!(worlds.default_spawn_of("ghostworld").is_none());
    }

    #[test]
    fn static_worlds_from_manifest() {
        let manifest = "overworld:\n  world: overworld\n  x: 0.5\n  y: 64.0\n  z: 0.5\n\
                        nether:\n  world: nether\n  x: 0.0\n  y: 32.0\n  z: 0.0\n";
        let worlds: StaticWorlds = serde_yaml::from_str(manifest).unwrap();
        assert_eq!(worlds.len(), 2);
        assert_eq!(worlds.names().collect::<Vec<_>>(), ["nether", "overworld"]);
    }
}
