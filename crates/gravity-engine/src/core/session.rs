use glam::DVec2;

use crate::api::config::SimConfig;
use crate::api::error::Result;
use crate::api::types::BodyId;
use crate::components::archetype::Archetype;
use crate::core::time::SimClock;
use crate::core::world::World;
use crate::input::queue::SimCommand;
use crate::renderer::camera::Camera;
use crate::renderer::snapshot::{BodyView, WorldSnapshot};
use crate::scenario::presets::{spawn_preset, Preset};
use crate::systems::rng::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// A sandbox session: the world plus everything the host drives around it.
/// Starts stopped with an empty world.
pub struct Simulation {
    world: World,
    camera: Camera,
    clock: SimClock,
    state: RunState,
    trails_enabled: bool,
    rng: Rng,
    config: SimConfig,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let camera = Camera::new(config.viewport_width, config.viewport_height)
            .with_zoom_limits(config.zoom_min, config.zoom_max);
        Self {
            world: World::with_config(&config),
            camera,
            clock: SimClock::new(),
            state: RunState::Stopped,
            trails_enabled: config.trails_enabled,
            rng: Rng::new(config.seed),
            config,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    // -- Run state --

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn play(&mut self) {
        self.state = RunState::Running;
    }

    pub fn pause(&mut self) {
        self.state = RunState::Stopped;
    }

    pub fn toggle_running(&mut self) {
        self.state = match self.state {
            RunState::Running => RunState::Stopped,
            RunState::Stopped => RunState::Running,
        };
    }

    // -- Trails --

    pub fn trails_enabled(&self) -> bool {
        self.trails_enabled
    }

    /// Disabling drops every recorded trail.
    pub fn set_trails_enabled(&mut self, enabled: bool) {
        self.trails_enabled = enabled;
        if !enabled {
            self.world.clear_trails();
        }
    }

    // -- Frame --

    /// Run one tick for a host frame delta.
    /// Returns the simulated dt consumed; 0 when stopped or empty.
    pub fn advance(&mut self, frame_dt: f64) -> f64 {
        if !self.is_running() || self.world.is_empty() {
            return 0.0;
        }
        let dt = self.world.step(frame_dt);
        self.clock.advance(dt);
        dt
    }

    /// Remove every body, restore the default view and stop.
    pub fn reset(&mut self) {
        log::info!("reset: cleared {} bodies", self.world.len());
        self.world.clear();
        self.camera.reset();
        self.clock.reset();
        self.state = RunState::Stopped;
    }

    /// Look at the centroid of all bodies at zoom 1. No-op on an empty world.
    pub fn center_view(&mut self) {
        if let Some(centroid) = self.world.centroid() {
            self.camera.look_at(centroid);
            self.camera.set_zoom(1.0);
        }
    }

    /// Replace the world with `preset`, centred on the current view, and run.
    /// A preset that does not fit leaves the world empty and stopped.
    pub fn load_preset(&mut self, preset: Preset) -> Result<()> {
        self.world.clear();
        self.clock.reset();
        let center = self.camera.screen_to_world(self.camera.viewport_center());
        if let Err(err) = spawn_preset(&mut self.world, preset, center, &mut self.rng) {
            self.world.clear();
            self.state = RunState::Stopped;
            return Err(err);
        }
        log::info!("loaded preset {preset} ({} bodies)", self.world.len());
        self.state = RunState::Running;
        Ok(())
    }

    /// Spawn a body at a screen point with a world-space velocity.
    pub fn spawn_at_screen(
        &mut self,
        screen: DVec2,
        archetype: Archetype,
        velocity: DVec2,
    ) -> Result<BodyId> {
        let position = self.camera.screen_to_world(screen);
        self.world.spawn(position, archetype, velocity)
    }

    /// Apply one control command.
    pub fn apply_command(&mut self, command: SimCommand) -> Result<()> {
        match command {
            SimCommand::Play => self.play(),
            SimCommand::Pause => self.pause(),
            SimCommand::TogglePlay => self.toggle_running(),
            SimCommand::Reset => self.reset(),
            SimCommand::CenterView => self.center_view(),
            SimCommand::SetGravity(value) => self.world.set_gravity_multiplier(value),
            SimCommand::SetSpeed(value) => self.world.set_speed_multiplier(value),
            SimCommand::SetTrails(enabled) => self.set_trails_enabled(enabled),
            SimCommand::Pan { dx, dy } => self.camera.pan_by(DVec2::new(dx, dy)),
            SimCommand::ZoomAt { x, y, factor } => self.camera.zoom_at(DVec2::new(x, y), factor),
            SimCommand::Resize { width, height } => self.camera.resize(width, height),
            SimCommand::Spawn { x, y, archetype, vx, vy } => {
                self.spawn_at_screen(DVec2::new(x, y), archetype, DVec2::new(vx, vy))?;
            }
            SimCommand::LoadPreset(preset) => self.load_preset(preset)?,
        }
        Ok(())
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            bodies: self
                .world
                .bodies()
                .iter()
                .map(|b| BodyView::from_body(b, self.trails_enabled))
                .collect(),
            camera: self.camera.view(),
            gravity_multiplier: self.world.gravity_multiplier(),
            speed_multiplier: self.world.speed_multiplier(),
            trails_enabled: self.trails_enabled,
            running: self.is_running(),
            elapsed: self.clock.elapsed(),
            ticks: self.clock.ticks(),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
