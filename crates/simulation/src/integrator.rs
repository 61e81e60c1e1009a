//! Per-frame orbital advance.
//!
//! Positions use a first-order eccentric approximation rather than a Kepler
//! solve: the same angle drives both the direction and the radial distance
//! factor `1 + e·cos(θ)`.

use engine_core::Transform;
use glam::{Quat, Vec3};
use std::f32::consts::TAU;

use crate::body::Body;

/// Self-rotation in radians per second. Not scaled by the speed multiplier.
pub const SPIN_RATE: f32 = 0.1;
/// Moon revolutions per unit of planet orbital progress.
pub const MOON_SPEED_FACTOR: f32 = 2.0;

/// Reduce an angle to `[0, 2π)`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Position on the orbit for `angle`, in the XZ plane around the origin.
pub fn orbital_position(angle: f32, mean_distance: f32, eccentricity: f32) -> Vec3 {
    let angle = wrap_angle(angle);
    let distance = mean_distance * (1.0 + eccentricity * angle.cos());
    Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}

/// Recompute a planet's transform and its moon/ring from the current angles.
pub(crate) fn place(body: &mut Body, star_position: Vec3) {
    let position = star_position + orbital_position(body.current_angle, body.mean_distance, body.eccentricity);
    let facing = Transform::look_rotation(position, star_position, Vec3::Y).unwrap_or(Quat::IDENTITY);
    body.transform.position = position;
    body.transform.rotation = facing * Quat::from_rotation_y(body.spin_angle);

    if let Some(moon) = body.moon.as_mut() {
        let offset = Vec3::new(moon.angle.cos(), 0.0, moon.angle.sin()) * moon.orbit_radius;
        moon.transform.position = position + offset;
    }
    if let Some(ring) = body.ring.as_mut() {
        ring.transform.position = position;
    }
}

/// Advances every planet; the star is never touched.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrbitalIntegrator;

impl OrbitalIntegrator {
    pub fn new() -> Self {
        Self
    }

    /// Advance all planets by `delta` seconds at the given speed multiplier.
    pub fn step(&self, bodies: &mut [Body], delta: f32, speed_multiplier: f32) {
        let star_position = bodies
            .iter()
            .find(|body| body.is_star())
            .map(Body::position)
            .unwrap_or(Vec3::ZERO);
        let delta = delta.max(0.0);

        for body in bodies.iter_mut().filter(|body| !body.is_star()) {
            let orbital_advance = body.angular_speed * speed_multiplier * delta;
            body.current_angle = wrap_angle(body.current_angle + orbital_advance);
            body.spin_angle = wrap_angle(body.spin_angle + SPIN_RATE * delta);
            if let Some(moon) = body.moon.as_mut() {
                moon.angle = wrap_angle(moon.angle + orbital_advance * MOON_SPEED_FACTOR);
            }
            place(body, star_position);
        }
    }
}
