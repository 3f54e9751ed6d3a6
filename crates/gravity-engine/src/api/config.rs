use serde::{Deserialize, Serialize};

use crate::api::error::{Result, SimError};

/// Configuration for a simulation session.
/// Every field is optional in JSON; missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Scales the gravitational constant (default: 1.0).
    pub gravity_multiplier: f64,
    /// Scales simulated time per frame (default: 1.0).
    pub speed_multiplier: f64,
    /// Whether trails are exported to the renderer (default: false).
    pub trails_enabled: bool,
    /// Lower zoom bound (default: 0.1).
    pub zoom_min: f64,
    /// Upper zoom bound (default: 5.0).
    pub zoom_max: f64,
    /// Viewport width in screen pixels (default: 800).
    pub viewport_width: f64,
    /// Viewport height in screen pixels (default: 600).
    pub viewport_height: f64,
    /// Maximum number of live bodies (default: 256).
    pub max_bodies: usize,
    /// Seed for preset randomness (default: 42).
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity_multiplier: 1.0,
            speed_multiplier: 1.0,
            trails_enabled: false,
            zoom_min: 0.1,
            zoom_max: 5.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
            max_bodies: 256,
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(SimError::Config)
    }
}
