//! Pairwise gravity and the semi-implicit Euler step.

use glam::DVec2;

use crate::components::body::Body;

/// Gravitational constant at a multiplier of 1.
pub const G_BASE: f64 = 20.0;
/// Added (squared) to the squared distance to bound short-range forces.
pub const SOFTENING: f64 = 10.0;
/// Pairs closer than this many summed radii exert no force on each other.
pub const NEAR_FIELD_FACTOR: f64 = 1.5;
/// Per-axis speed a body must exceed to record a trail sample.
pub const MOVING_THRESHOLD: f64 = 0.1;

/// Acceleration felt by body `a` due to body `b`.
///
/// Zero inside the near-field band `dist < 1.5 * (ra + rb)`; that contact
/// is left to the merge resolver. Since radii are positive the band always
/// covers `dist == 0`, so the division below is safe.
pub fn pair_acceleration(a: &Body, b: &Body, g: f64) -> DVec2 {
    let d = b.position - a.position;
    let dist_sq = d.length_squared();
    let dist = dist_sq.sqrt();
    if dist < NEAR_FIELD_FACTOR * (a.radius() + b.radius()) {
        return DVec2::ZERO;
    }
    let magnitude = (g * b.mass()) / (dist_sq + SOFTENING * SOFTENING);
    d / dist * magnitude
}

/// Gravity integrator with a reusable acceleration buffer.
#[derive(Debug, Default)]
pub struct Integrator {
    accelerations: Vec<DVec2>,
}

impl Integrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Net acceleration on every body, computed from current positions only.
    pub fn compute_accelerations(&mut self, bodies: &[Body], gravity_multiplier: f64) -> &[DVec2] {
        let g = G_BASE * gravity_multiplier;
        self.accelerations.clear();
        self.accelerations.extend(bodies.iter().enumerate().map(|(i, a)| {
            bodies
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(DVec2::ZERO, |acc, (_, b)| acc + pair_acceleration(a, b, g))
        }));
        &self.accelerations
    }

    /// Advance every body by `dt`.
    ///
    /// All accelerations are taken from the pre-step snapshot before any body
    /// moves, then `v += a dt; x += v dt`. Moving bodies append their new
    /// position to their trail.
    pub fn step(&mut self, bodies: &mut [Body], gravity_multiplier: f64, dt: f64) {
        self.compute_accelerations(bodies, gravity_multiplier);

        for (body, accel) in bodies.iter_mut().zip(self.accelerations.iter()) {
            body.velocity += *accel * dt;
            body.position += body.velocity * dt;

            if body.is_moving(MOVING_THRESHOLD) {
                let position = body.position;
                body.trail_mut().push(position);
            }
        }
    }
}
