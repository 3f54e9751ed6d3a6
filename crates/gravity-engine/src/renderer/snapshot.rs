use glam::DVec2;
use serde::Serialize;

use crate::api::error::{Result, SimError};
use crate::components::archetype::{Archetype, BodyColor};
use crate::components::body::Body;
use crate::renderer::camera::CameraView;

/// Read-only copy of one body for renderers and UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyView {
    pub id: u32,
    pub archetype: Archetype,
    pub name: &'static str,
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64,
    pub radius: f64,
    pub color: BodyColor,
    pub glow_color: BodyColor,
    pub has_glow: bool,
    pub special_render: bool,
    /// Oldest sample first.
    pub trail: Vec<DVec2>,
}

impl BodyView {
    /// `with_trail` false leaves `trail` empty.
    pub fn from_body(body: &Body, with_trail: bool) -> Self {
        let defaults = body.archetype().defaults();
        Self {
            id: body.id().0,
            archetype: body.archetype(),
            name: defaults.name,
            position: body.position,
            velocity: body.velocity,
            mass: body.mass(),
            radius: body.radius(),
            color: defaults.color,
            glow_color: defaults.glow_color,
            has_glow: defaults.has_glow,
            special_render: defaults.special_render,
            trail: if with_trail { body.trail().to_vec() } else { Vec::new() },
        }
    }
}

/// Everything a renderer may read after a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub bodies: Vec<BodyView>,
    pub camera: CameraView,
    pub gravity_multiplier: f64,
    pub speed_multiplier: f64,
    pub trails_enabled: bool,
    pub running: bool,
    /// Simulated seconds since the last reset.
    pub elapsed: f64,
    pub ticks: u64,
}

impl WorldSnapshot {
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(SimError::Serialize)
    }
}
