use glam::DVec2;

use crate::api::error::{Result, SimError};
use crate::api::types::BodyId;
use crate::components::archetype::Archetype;
use crate::components::trail::Trail;
use crate::systems::gravity::G_BASE;

/// A simulated point mass with a collision radius.
///
/// `position` and `velocity` are open to the integrator. Mass and radius are
/// fixed at spawn and only grow through [`Body::absorb`].
#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    archetype: Archetype,
    /// Position in world space.
    pub position: DVec2,
    /// Velocity in world units per simulated second.
    pub velocity: DVec2,
    mass: f64,
    radius: f64,
    trail: Trail,
}

impl Body {
    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub(crate) fn trail_mut(&mut self) -> &mut Trail {
        &mut self.trail
    }

    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        self.position.distance(other.position)
    }

    /// Discs strictly overlap: `distance < r1 + r2`.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }

    /// Whether the body moves fast enough to leave a trail sample.
    pub fn is_moving(&self, threshold: f64) -> bool {
        self.velocity.x.abs() > threshold || self.velocity.y.abs() > threshold
    }

    /// Inelastic merge: `other` is folded into `self`.
    ///
    /// Momentum and area are conserved. `self` keeps its position, archetype
    /// and trail.
    pub(crate) fn absorb(&mut self, other: &Body) {
        let total = self.mass + other.mass;
        self.velocity = (self.momentum() + other.momentum()) / total;
        self.mass = total;
        self.radius = (self.radius * self.radius + other.radius * other.radius).sqrt();
    }

    /// Tangential velocity for a circular orbit around `target`.
    pub fn orbital_velocity(&self, target: &Body) -> DVec2 {
        orbital_velocity(self.position, target.position, target.mass)
    }
}

/// Circular-orbit velocity for a body at `position` around a mass at
/// `target`: speed `sqrt(G * mass / d)`, turned 90° counter-clockwise from
/// the body→target direction. Uses the base constant, independent of the
/// gravity multiplier. Coincident points yield zero.
pub fn orbital_velocity(position: DVec2, target: DVec2, target_mass: f64) -> DVec2 {
    let d = target - position;
    let distance = d.length();
    if distance <= f64::EPSILON {
        return DVec2::ZERO;
    }
    let speed = (G_BASE * target_mass / distance).sqrt();
    DVec2::new(-d.y, d.x) / distance * speed
}

/// Builder describing a body before it enters the world.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub archetype: Archetype,
    pub position: DVec2,
    pub velocity: DVec2,
    /// Spawn-time override of the archetype mass.
    pub mass: Option<f64>,
    /// Spawn-time override of the archetype radius.
    pub radius: Option<f64>,
}

impl BodyDesc {
    pub fn new(archetype: Archetype) -> Self {
        Self {
            archetype,
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            mass: None,
            radius: None,
        }
    }

    pub fn with_position(mut self, position: DVec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Validate and create the body.
    pub(crate) fn build(self, id: BodyId) -> Result<Body> {
        let defaults = self.archetype.defaults();
        let mass = self.mass.unwrap_or(defaults.mass);
        let radius = self.radius.unwrap_or(defaults.radius);
        let valid = mass.is_finite() && mass > 0.0 && radius.is_finite() && radius > 0.0;
        if !valid || !self.position.is_finite() || !self.velocity.is_finite() {
            return Err(SimError::InvalidBody { mass, radius });
        }
        Ok(Body {
            id,
            archetype: self.archetype,
            position: self.position,
            velocity: self.velocity,
            mass,
            radius,
            trail: Trail::new(),
        })
    }
}
