use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A point inside a named world, with the facing a player is given on arrival.
///
/// Serializes as a flat `{world, x, y, z, yaw, pitch}` mapping. `yaw` and
/// `pitch` may be omitted in a document and default to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LocationDoc", into = "LocationDoc")]
pub struct Location {
    pub world: String,
    pub position: DVec3,
    /// Horizontal facing in degrees.
    pub yaw: f32,
    /// Vertical facing in degrees.
    pub pitch: f32,
}

impl Location {
    /// A location facing yaw 0, pitch 0.
    pub fn new(world: impl Into<String>, position: DVec3) -> Self {
        Self {
            world: world.into(),
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn with_rotation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }
}

#[derive(Serialize, Deserialize)]
struct LocationDoc {
    world: String,
    x: f64,
    y: f64,
    z: f64,
    #[serde(default)]
    yaw: f32,
    #[serde(default)]
    pitch: f32,
}

impl From<LocationDoc> for Location {
    fn from(doc: LocationDoc) -> Self {
        Self {
            world: doc.world,
            position: DVec3::new(doc.x, doc.y, doc.z),
            yaw: doc.yaw,
            pitch: doc.pitch,
        }
    }
}

impl From<Location> for LocationDoc {
    fn from(loc: Location) -> Self {
        Self {
            world: loc.world,
            x: loc.position.x,
            y: loc.position.y,
            z: loc.position.z,
            yaw: loc.yaw,
            pitch: loc.pitch,
        }
    }
}
