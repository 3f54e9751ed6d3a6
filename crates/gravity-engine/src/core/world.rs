use glam::DVec2;

use crate::api::config::SimConfig;
use crate::api::error::{Result, SimError};
use crate::api::types::BodyId;
use crate::components::archetype::Archetype;
use crate::components::body::{Body, BodyDesc};
use crate::core::time::scaled_dt;
use crate::systems::gravity::Integrator;
use crate::systems::merge::{MergeEvent, MergeResolver};

/// Owns every body and runs the per-tick pipeline:
/// integrate, then resolve merges.
///
/// Bodies live in a flat Vec; order carries no meaning beyond the merge
/// tie-break and survives removals.
#[derive(Debug)]
pub struct World {
    bodies: Vec<Body>,
    gravity_multiplier: f64,
    speed_multiplier: f64,
    max_bodies: usize,
    next_id: u32,
    integrator: Integrator,
    resolver: MergeResolver,
    /// Merges performed by the most recent tick.
    merges: Vec<MergeEvent>,
}

impl World {
    pub fn new() -> Self {
        Self::with_config(&SimConfig::default())
    }

    pub fn with_config(config: &SimConfig) -> Self {
        Self {
            bodies: Vec::with_capacity(config.max_bodies),
            gravity_multiplier: config.gravity_multiplier.max(0.0),
            speed_multiplier: config.speed_multiplier.max(0.0),
            max_bodies: config.max_bodies,
            next_id: 1,
            integrator: Integrator::new(),
            resolver: MergeResolver::new(),
            merges: Vec::new(),
        }
    }

    // -- Spawning --

    /// Spawn a body with archetype defaults.
    pub fn spawn(&mut self, position: DVec2, archetype: Archetype, velocity: DVec2) -> Result<BodyId> {
        self.spawn_desc(
            BodyDesc::new(archetype)
                .with_position(position)
                .with_velocity(velocity),
        )
    }

    /// Spawn from an archetype name, rejecting unknown names.
    pub fn spawn_named(&mut self, position: DVec2, archetype: &str, velocity: DVec2) -> Result<BodyId> {
        let archetype: Archetype = archetype.parse()?;
        self.spawn(position, archetype, velocity)
    }

    /// Spawn from a full description, including mass/radius overrides.
    pub fn spawn_desc(&mut self, desc: BodyDesc) -> Result<BodyId> {
        if self.bodies.len() >= self.max_bodies {
            return Err(SimError::WorldFull(self.max_bodies));
        }
        let id = BodyId(self.next_id);
        let body = desc.build(id)?;
        self.next_id += 1;
        self.bodies.push(body);
        Ok(id)
    }

    /// Circular-orbit velocity of `body` around `target`, if both exist.
    pub fn orbital_velocity(&self, body: BodyId, target: BodyId) -> Option<DVec2> {
        let body = self.get(body)?;
        let target = self.get(target)?;
        Some(body.orbital_velocity(target))
    }

    // -- Ticking --

    /// Clamp and scale a host frame delta, then run one tick.
    /// Returns the simulated `dt` that was applied. This is the only way to
    /// advance the world.
    pub fn step(&mut self, frame_dt: f64) -> f64 {
        let dt = scaled_dt(frame_dt, self.speed_multiplier);
        self.tick(dt);
        dt
    }

    /// One tick with an already-scaled `dt`: one integrator pass over the
    /// full body set, then one resolver pass.
    fn tick(&mut self, dt: f64) {
        self.merges.clear();
        self.integrator
            .step(&mut self.bodies, self.gravity_multiplier, dt);
        self.resolver.resolve(&mut self.bodies, &mut self.merges);
    }

    /// Merges performed by the last tick.
    pub fn merges(&self) -> &[MergeEvent] {
        &self.merges
    }

    // -- Queries --

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn max_bodies(&self) -> usize {
        self.max_bodies
    }

    /// Unweighted mean position of all bodies.
    pub fn centroid(&self) -> Option<DVec2> {
        if self.bodies.is_empty() {
            return None;
        }
        let sum = self.bodies.iter().fold(DVec2::ZERO, |acc, b| acc + b.position);
        Some(sum / self.bodies.len() as f64)
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(Body::mass).sum()
    }

    pub fn total_momentum(&self) -> DVec2 {
        self.bodies.iter().fold(DVec2::ZERO, |acc, b| acc + b.momentum())
    }

    // -- Mutation --

    /// Remove every body.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.merges.clear();
    }

    pub fn clear_trails(&mut self) {
        for body in &mut self.bodies {
            body.trail_mut().clear();
        }
    }

    // -- Knobs --

    pub fn gravity_multiplier(&self) -> f64 {
        self.gravity_multiplier
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Negative values are clamped to zero.
    pub fn set_gravity_multiplier(&mut self, value: f64) {
        self.gravity_multiplier = sanitize_knob("gravity", value);
    }

    /// Negative values are clamped to zero.
    pub fn set_speed_multiplier(&mut self, value: f64) {
        self.speed_multiplier = sanitize_knob("speed", value);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitize_knob(name: &str, value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        log::warn!("{name} multiplier {value} out of range, using 0");
        return 0.0;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::trail::TRAIL_CAP;

    #[test]
    fn spawn_assigns_unique_ids() {
        let mut world = World::new();
        let a = world.spawn(DVec2::ZERO, Archetype::Rocky, DVec2::ZERO).unwrap();
        let b = world.spawn(DVec2::new(500.0, 0.0), Archetype::Star, DVec2::ZERO).unwrap();
        assert_ne!(a, b);
        assert_eq!(world.len(), 2);
        assert_eq!(world.get(b).unwrap().mass(), 1000.0);
    }

    #[test]
    fn spawn_named_rejects_unknown_archetype() {
        let mut world = World::new();
        let err = world.spawn_named(DVec2::ZERO, "neutron-star", DVec2::ZERO).unwrap_err();
        assert!(matches!(err, SimError::UnknownArchetype(_)));
        assert!(world.is_empty());
    }

    #[test]
    fn spawn_respects_capacity() {
        let config = SimConfig { max_bodies: 2, ..SimConfig::default() };
        let mut world = World::with_config(&config);
        world.spawn(DVec2::ZERO, Archetype::Rocky, DVec2::ZERO).unwrap();
        world.spawn(DVec2::new(100.0, 0.0), Archetype::Rocky, DVec2::ZERO).unwrap();
        let err = world.spawn(DVec2::new(200.0, 0.0), Archetype::Rocky, DVec2::ZERO).unwrap_err();
        assert!(matches!(err, SimError::WorldFull(2)));
    }

    #[test]
    fn close_pair_stays_finite_then_merges() {
        let mut world = World::new();
        world.spawn(DVec2::ZERO, Archetype::Star, DVec2::ZERO).unwrap();
        world
            .spawn_desc(
                BodyDesc::new(Archetype::Rocky)
                    .with_position(DVec2::new(10.0, 0.0))
                    .with_mass(5.0),
            )
            .unwrap();

        world.step(0.016);

        assert_eq!(world.len(), 1);
        let merged = &world.bodies()[0];
        assert!(merged.velocity.is_finite());
        assert_eq!(merged.mass(), 1005.0);
        assert!((merged.radius() - (35.0f64 * 35.0 + 12.0 * 12.0).sqrt()).abs() < 1e-9);
        assert!((merged.radius() - 37.0).abs() < 1e-9);
        assert!(merged.velocity.length() < 1e-9);
        assert_eq!(world.merges().len(), 1);
    }

    #[test]
    fn circular_orbit_is_stable() {
        let mut world = World::new();
        let star = world.spawn(DVec2::ZERO, Archetype::Star, DVec2::ZERO).unwrap();
        let planet = world.spawn(DVec2::new(150.0, 0.0), Archetype::Rocky, DVec2::ZERO).unwrap();
        let v = world.orbital_velocity(planet, star).unwrap();
        world.clear();
        world.spawn(DVec2::ZERO, Archetype::Star, DVec2::ZERO).unwrap();
        let planet = world.spawn(DVec2::new(150.0, 0.0), Archetype::Rocky, v).unwrap();

        for _ in 0..1000 {
            world.step(0.016);
            let star_pos = world.bodies()[0].position;
            let d = world.get(planet).unwrap().position.distance(star_pos);
            assert!((135.0..=165.0).contains(&d), "orbit drifted to {d}");
        }
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn step_clamps_frame_hitch() {
        let mut world = World::new();
        world.spawn(DVec2::ZERO, Archetype::Rocky, DVec2::new(10.0, 0.0)).unwrap();
        let dt = world.step(5.0);
        assert!((dt - 0.1).abs() < 1e-15);
        assert!((world.bodies()[0].position.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn hitch_is_clamped_before_speed_scaling() {
        let mut world = World::new();
        world.set_speed_multiplier(3.0);
        world.spawn(DVec2::ZERO, Archetype::Rocky, DVec2::new(10.0, 0.0)).unwrap();
        let dt = world.step(5.0);
        assert!((dt - 0.3).abs() < 1e-12);
        assert!((world.bodies()[0].position.x - 3.0).abs() < 1e-9);
    }

    #[test]
    fn speed_multiplier_scales_dt() {
        let mut world = World::new();
        world.set_speed_multiplier(2.0);
        world.spawn(DVec2::ZERO, Archetype::Rocky, DVec2::new(10.0, 0.0)).unwrap();
        let dt = world.step(0.05);
        assert!((dt - 0.1).abs() < 1e-15);
    }

    #[test]
    fn negative_knobs_clamp_to_zero() {
        let mut world = World::new();
        world.set_gravity_multiplier(-1.0);
        world.set_speed_multiplier(f64::NAN);
        assert_eq!(world.gravity_multiplier(), 0.0);
        assert_eq!(world.speed_multiplier(), 0.0);
    }

    #[test]
    fn trails_never_exceed_cap() {
        let mut world = World::new();
        world.spawn(DVec2::ZERO, Archetype::Star, DVec2::ZERO).unwrap();
        world.spawn(DVec2::new(200.0, 0.0), Archetype::Rocky, DVec2::new(0.0, 10.0)).unwrap();
        world.spawn(DVec2::new(-300.0, 0.0), Archetype::GasGiant, DVec2::new(0.0, -8.0)).unwrap();
        for _ in 0..400 {
            world.step(0.016);
            assert!(world.bodies().iter().all(|b| b.trail().len() <= TRAIL_CAP));
        }
        world.clear_trails();
        assert!(world.bodies().iter().all(|b| b.trail().is_empty()));
    }

    #[test]
    fn merging_conserves_total_momentum() {
        let mut world = World::new();
        world.spawn(DVec2::ZERO, Archetype::SuperGiant, DVec2::new(2.0, 1.0)).unwrap();
        world.spawn(DVec2::new(20.0, 0.0), Archetype::GasGiant, DVec2::new(-3.0, 0.5)).unwrap();
        let before = world.total_momentum();
        let mass_before = world.total_mass();
        world.step(0.0);
        assert_eq!(world.len(), 1);
        assert!((world.total_momentum() - before).length() <= 1e-9 * before.length());
        assert_eq!(world.total_mass(), mass_before);
    }

    #[test]
    fn centroid_of_empty_world_is_none() {
        let mut world = World::new();
        assert_eq!(world.centroid(), None);
        world.spawn(DVec2::new(100.0, 0.0), Archetype::Rocky, DVec2::ZERO).unwrap();
        world.spawn(DVec2::new(300.0, 200.0), Archetype::Rocky, DVec2::ZERO).unwrap();
        assert_eq!(world.centroid(), Some(DVec2::new(200.0, 100.0)));
    }
}
