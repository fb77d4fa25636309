//! One-shot bridge from the host's "ready" notification to the registry load.

use crate::provider::WorldProvider;
use crate::registry::{LoadOutcome, RegistryError, SpawnRegistry};

/// What a delivery of the ready signal did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// First delivery: the registry load ran.
    Fired(LoadOutcome),
    /// The trigger had already fired; the delivery was dropped.
    Ignored,
}

/// Fires the registry load on the first ready signal and never again.
///
/// The bootstrap calls [`ReadyTrigger::on_ready`] every time the host reports
/// it is ready; only the first call does anything.
#[derive(Debug)]
pub struct ReadyTrigger {
    armed: bool,
}

impl Default for ReadyTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadyTrigger {
    /// An armed trigger, waiting for the first ready signal.
    pub fn new() -> Self {
        Self { armed: true }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Handle one delivery of the ready signal.
    ///
    /// The trigger disarms before loading, so a failed load is reported once
    /// and not retried by later deliveries.
    pub fn on_ready<P: WorldProvider>(
        &mut self,
        registry: &mut SpawnRegistry<P>,
    ) -> Result<Trigger, RegistryError> {
        if !self.armed {
            tracing::trace!("ready signal after initialization, ignoring");
            return Ok(Trigger::Ignored);
        }
        self.armed = false;

        let outcome = registry.load()?;
        Ok(Trigger::Fired(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StaticWorlds;
    use glam::DVec3;
    use spawnpoint_common::Location;
    use spawnpoint_persist::{ConfigStore, StoreConfig};

    fn entry(world: &str, x: f64) -> String {
        format!("{world}:\n  world: {world}\n  x: {x}\n  y: 64.0\n  z: 0.0\n")
    }

    #[test]
    fn fires_exactly_once() {
        let tmp = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(tmp.path());
        std::fs::write(config.path(), entry("overworld", 1.0)).unwrap();

        let mut registry = SpawnRegistry::new(ConfigStore::open(config.clone()), StaticWorlds::new());
        let mut trigger = ReadyTrigger::new();
        assert!(trigger.is_armed());

        let first = trigger.on_ready(&mut registry).unwrap();
        assert_eq!(
            first,
            Trigger::Fired(LoadOutcome::Loaded {
                overrides: 1,
                global: false
            })
        );
        assert!(!trigger.is_armed());

        // Re-emitted signals must not reload, even if the file changed.
        std::fs::write(config.path(), entry("nether", 2.0)).unwrap();
        for _ in 0..5 {
            assert_eq!(trigger.on_ready(&mut registry).unwrap(), Trigger::Ignored);
        }
        assert!(registry.has_override("overworld"));
        assert!(!registry.has_override("nether"));
    }

    #[test]
    fn get_and_set_work_before_signal() {
        let tmp = tempfile::tempdir().unwrap();
        let default_spawn = Location::new("overworld", DVec3::new(0.5, 64.0, 0.5));
        let worlds = StaticWorlds::new().with_world("overworld", default_spawn.clone());
        let mut registry =
            SpawnRegistry::new(ConfigStore::open(StoreConfig::new(tmp.path())), worlds);

        assert_eq!(registry.spawn_point("overworld"), Some(default_spawn));
        let hub = Location::new("overworld", DVec3::ZERO);
        registry.set_global_spawn(hub.clone()).unwrap();

        let mut trigger = ReadyTrigger::default();
        trigger.on_ready(&mut registry).unwrap();
        assert_eq!(registry.global_spawn(), Some(&hub));
    }

    #[test]
    fn failed_load_disarms() {
        let tmp = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(tmp.path());
        std::fs::write(config.path(), "just a string\n").unwrap();

        let mut registry = SpawnRegistry::new(ConfigStore::open(config.clone()), StaticWorlds::new());
        let mut trigger = ReadyTrigger::new();
        assert!(trigger.on_ready(&mut registry).is_err());
        assert!(!registry.is_loaded());

        std::fs::write(config.path(), entry("overworld", 1.0)).unwrap();
        assert_eq!(trigger.on_ready(&mut registry).unwrap(), Trigger::Ignored);
        assert!(!registry.has_override("overworld"));
    }
}
