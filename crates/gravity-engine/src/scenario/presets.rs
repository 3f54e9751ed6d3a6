//! Canned starting layouts.

use std::f64::consts::TAU;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::api::error::{Result, SimError};
use crate::components::archetype::Archetype;
use crate::components::body::orbital_velocity;
use crate::core::world::World;
use crate::systems::gravity::G_BASE;
use crate::systems::rng::Rng;

/// Archetypes a chaos layout draws from.
const PLANETS: [Archetype; 3] = [Archetype::Rocky, Archetype::GasGiant, Archetype::SuperGiant];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Two stars circling each other with three outer planets.
    Binary,
    /// One star and five planets on circular orbits.
    Solar,
    /// Ten planets scattered on a ring with random velocities.
    Chaos,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Binary, Preset::Solar, Preset::Chaos];

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Binary => "binary",
            Preset::Solar => "solar",
            Preset::Chaos => "chaos",
        }
    }
}

impl FromStr for Preset {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| SimError::UnknownPreset(s.to_string()))
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spawn `preset` into `world` around the world point `center`.
/// The world is not cleared first.
pub fn spawn_preset(world: &mut World, preset: Preset, center: DVec2, rng: &mut Rng) -> Result<()> {
    match preset {
        Preset::Binary => spawn_binary(world, center),
        Preset::Solar => spawn_solar(world, center),
        Preset::Chaos => spawn_chaos(world, center, rng),
    }
}

fn spawn_binary(world: &mut World, center: DVec2) -> Result<()> {
    world.spawn(center - DVec2::new(100.0, 0.0), Archetype::Star, DVec2::new(0.0, -30.0))?;
    world.spawn(center + DVec2::new(100.0, 0.0), Archetype::Star, DVec2::new(0.0, 30.0))?;

    // Outer planets see both stars as one central mass, slowed to 70%.
    let central_mass = 2.0 * Archetype::Star.defaults().mass;
    for i in 0..3 {
        let angle = i as f64 / 3.0 * TAU;
        let distance = 300.0 + 50.0 * i as f64;
        let speed = (central_mass * G_BASE / distance).sqrt() * 0.7;
        let dir = DVec2::from_angle(angle);
        world.spawn(
            center + dir * distance,
            Archetype::Rocky,
            dir.perp() * speed,
        )?;
    }
    Ok(())
}

fn spawn_solar(world: &mut World, center: DVec2) -> Result<()> {
    let sun = Archetype::Star;
    world.spawn(center, sun, DVec2::ZERO)?;

    let orbits = [
        (Archetype::Rocky, 150.0),
        (Archetype::Rocky, 220.0),
        (Archetype::GasGiant, 320.0),
        (Archetype::GasGiant, 450.0),
        (Archetype::SuperGiant, 600.0),
    ];
    for (archetype, distance) in orbits {
        let position = center + DVec2::new(distance, 0.0);
        let velocity = orbital_velocity(position, center, sun.defaults().mass);
        world.spawn(position, archetype, velocity)?;
    }
    Ok(())
}

fn spawn_chaos(world: &mut World, center: DVec2, rng: &mut Rng) -> Result<()> {
    for i in 0..10 {
        let angle = i as f64 / 10.0 * TAU;
        let distance = 200.0 + rng.range(0.0, 200.0);
        let archetype = PLANETS[rng.next_int(PLANETS.len() as u32) as usize];
        let velocity = DVec2::new(rng.range(-25.0, 25.0), rng.range(-25.0, 25.0));
        world.spawn(center + DVec2::from_angle(angle) * distance, archetype, velocity)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SimConfig;

    #[test]
    fn parse_names() {
        assert_eq!("binary".parse::<Preset>().unwrap(), Preset::Binary);
        assert_eq!("solar".parse::<Preset>().unwrap(), Preset::Solar);
        assert_eq!("chaos".parse::<Preset>().unwrap(), Preset::Chaos);
        assert!(matches!("galaxy".parse::<Preset>(), Err(SimError::UnknownPreset(_))));
    }

    #[test]
    fn binary_layout() {
        let mut world = World::new();
        let center = DVec2::new(400.0, 300.0);
        spawn_preset(&mut world, Preset::Binary, center, &mut Rng::new(1)).unwrap();

        assert_eq!(world.len(), 5);
        let stars: Vec<_> = world
            .bodies()
            .iter()
            .filter(|b| b.archetype() == Archetype::Star)
            .collect();
        assert_eq!(stars.len(), 2);
        assert_eq!(stars[0].position, DVec2::new(300.0, 300.0));
        assert_eq!(stars[0].velocity, DVec2::new(0.0, -30.0));
        assert_eq!(stars[1].velocity, DVec2::new(0.0, 30.0));
        // The stars carry equal and opposite momentum.
        assert_eq!(stars[0].momentum() + stars[1].momentum(), DVec2::ZERO);

        let first_planet = &world.bodies()[2];
        assert!((first_planet.position - DVec2::new(700.0, 300.0)).length() < 1e-9);
        let expected_speed = (2000.0f64 * 20.0 / 300.0).sqrt() * 0.7;
        assert!((first_planet.velocity - DVec2::new(0.0, expected_speed)).length() < 1e-9);
    }

    #[test]
    fn solar_planets_orbit_the_sun() {
        let mut world = World::new();
        let center = DVec2::new(0.0, 0.0);
        spawn_preset(&mut world, Preset::Solar, center, &mut Rng::new(1)).unwrap();

        assert_eq!(world.len(), 6);
        assert_eq!(world.bodies()[0].archetype(), Archetype::Star);
        let planet = &world.bodies()[1];
        assert_eq!(planet.position, DVec2::new(150.0, 0.0));
        let expected = (G_BASE * 1000.0 / 150.0).sqrt();
        assert!(planet.velocity.x.abs() < 1e-9);
        assert!((planet.velocity.length() - expected).abs() < 1e-9);
        assert_eq!(world.bodies()[5].archetype(), Archetype::SuperGiant);
    }

    #[test]
    fn chaos_is_reproducible_for_a_seed() {
        let center = DVec2::new(400.0, 300.0);
        let mut a = World::new();
        let mut b = World::new();
        spawn_preset(&mut a, Preset::Chaos, center, &mut Rng::new(9)).unwrap();
        spawn_preset(&mut b, Preset::Chaos, center, &mut Rng::new(9)).unwrap();

        assert_eq!(a.len(), 10);
        for (x, y) in a.bodies().iter().zip(b.bodies()) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.velocity, y.velocity);
            assert_eq!(x.archetype(), y.archetype());
        }
        for body in a.bodies() {
            let d = body.position.distance(center);
            assert!((200.0 - 1e-9..400.0 + 1e-9).contains(&d), "distance {d}");
            assert!(body.velocity.abs().max_element() <= 25.0);
            assert!(PLANETS.contains(&body.archetype()));
        }
    }

    #[test]
    fn preset_larger_than_capacity_fails() {
        let config = SimConfig { max_bodies: 3, ..SimConfig::default() };
        let mut world = World::with_config(&config);
        let err = spawn_preset(&mut world, Preset::Solar, DVec2::ZERO, &mut Rng::new(1)).unwrap_err();
        assert!(matches!(err, SimError::WorldFull(3)));
    }
}
