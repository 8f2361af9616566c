//! Common types for the Wayline environment abstraction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an animated agent.
///
/// Uses UUID v4 for global uniqueness without coordination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl AgentId {
    /// Creates a new random AgentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an AgentId from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Creates a deterministic AgentId from a seed (for simulation).
    ///
    /// Expands the seed with splitmix64 so nearby seeds still produce
    /// visibly distinct identifiers.
    pub fn from_seed(seed: u64) -> Self {
        fn splitmix64(state: &mut u64) -> u64 {
            *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = *state;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            z ^ (z >> 31)
        }

        let mut state = seed;
        let high = splitmix64(&mut state);
        let low = splitmix64(&mut state);
        Self(Uuid::from_u64_pair(high, low))
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Show first 8 chars for readability
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A geographic coordinate as supplied by a routing collaborator.
///
/// Valid latitudes are [-90, 90] and longitudes [-180, 180]; range
/// validation happens at projection time in `wayline_core`, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a new GeoPoint.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Wire-level pose snapshot pushed to a render sink once per tick.
///
/// This is a transport-layer value - the sink only needs a position and
/// angles, never the engine's internal path or state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseUpdate {
    /// Owning agent
    pub agent_id: AgentId,

    /// Scene position
    pub x: f64,
    pub y: f64,
    pub z: f64,

    /// Yaw in radians, measured from +z toward +x
    pub heading: f64,

    /// Bank angle in radians, clamped by the engine
    pub tilt: f64,

    /// Normalized traversal progress in [0, 1]
    pub progress: f64,
}

/// Wire-level camera snapshot, derived from the agent pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraUpdate {
    /// Owning agent
    pub agent_id: AgentId,

    /// Camera position
    pub x: f64,
    pub y: f64,
    pub z: f64,

    /// Look-at target (the agent's position)
    pub target_x: f64,
    pub target_y: f64,
    pub target_z: f64,

    /// Map-style zoom level
    pub zoom: f64,

    /// Downward pitch in radians
    pub pitch: f64,
}
