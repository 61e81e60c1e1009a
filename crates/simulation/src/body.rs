//! Runtime state for each body, built once from the catalog.

use engine_core::Transform;
use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::catalog::{BodyDescriptor, BodyId};
use crate::integrator;

/// Moon orbit radius around its planet, independent of planet size or distance.
pub const MOON_ORBIT_RADIUS: f32 = 1.0;
/// Visual radius of a moon.
pub const MOON_RADIUS: f32 = 0.1;
pub const RING_INNER_RADIUS: f32 = 0.6;
pub const RING_OUTER_RADIUS: f32 = 1.2;
pub const RING_SEGMENTS: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
}

/// A moon circling its planet at a fixed radius.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonState {
    /// Phase in `[0, 2π)`, independent of the planet's orbital angle.
    pub angle: f32,
    pub orbit_radius: f32,
    pub radius: f32,
    pub transform: Transform,
}

/// A flat ring that translates with its planet and keeps its creation tilt.
#[derive(Debug, Clone, PartialEq)]
pub struct RingState {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub segments: u32,
    /// Rendered from both faces.
    pub double_sided: bool,
    pub transform: Transform,
}

impl RingState {
    fn new(position: Vec3) -> Self {
        Self {
            inner_radius: RING_INNER_RADIUS,
            outer_radius: RING_OUTER_RADIUS,
            segments: RING_SEGMENTS,
            double_sided: true,
            transform: Transform::from_position_rotation(position, Quat::from_rotation_x(FRAC_PI_2)),
        }
    }
}

/// Star or planet with its mutable orbital state.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,
    pub mean_distance: f32,
    pub angular_speed: f32,
    pub eccentricity: f32,
    pub radius: f32,
    /// Orbital angle in `[0, 2π)`.
    pub current_angle: f32,
    /// Self-rotation about the body's axis in `[0, 2π)`.
    pub spin_angle: f32,
    pub transform: Transform,
    pub ring: Option<RingState>,
    pub moon: Option<MoonState>,
}

impl Body {
    /// The immobile star at the origin.
    pub fn star(descriptor: &BodyDescriptor) -> Self {
        Self {
            id: descriptor.id.clone(),
            kind: BodyKind::Star,
            mean_distance: 0.0,
            angular_speed: 0.0,
            eccentricity: 0.0,
            radius: descriptor.radius,
            current_angle: 0.0,
            spin_angle: 0.0,
            transform: Transform::from_position(Vec3::ZERO).with_uniform_scale(descriptor.radius),
            ring: None,
            moon: None,
        }
    }

    /// A planet with independent random orbital and moon phases, already placed.
    pub fn planet<R: Rng + ?Sized>(descriptor: &BodyDescriptor, star_position: Vec3, rng: &mut R) -> Self {
        let current_angle = integrator::wrap_angle(rng.gen::<f32>() * TAU);
        let moon = descriptor.has_moon.then(|| MoonState {
            angle: integrator::wrap_angle(rng.gen::<f32>() * TAU),
            orbit_radius: MOON_ORBIT_RADIUS,
            radius: MOON_RADIUS,
            transform: Transform::default().with_uniform_scale(MOON_RADIUS),
        });
        let ring = descriptor.has_ring.then(|| RingState::new(Vec3::ZERO));

        let mut body = Self {
            id: descriptor.id.clone(),
            kind: BodyKind::Planet,
            mean_distance: descriptor.mean_distance,
            angular_speed: descriptor.angular_speed,
            eccentricity: descriptor.eccentricity,
            radius: descriptor.radius,
            current_angle,
            spin_angle: 0.0,
            transform: Transform::default().with_uniform_scale(descriptor.radius),
            ring,
            moon,
        };
        integrator::place(&mut body, star_position);
        body
    }

    pub fn is_star(&self) -> bool {
        self.kind == BodyKind::Star
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sub_records_follow_capability_flags() {
        let mut rng = StdRng::seed_from_u64(1);
        let plain = Body::planet(&BodyDescriptor::planet("Mars", 10.0, 0.01), Vec3::ZERO, &mut rng);
        let ringed = Body::planet(&BodyDescriptor::planet("Saturn", 18.0, 0.007).with_ring(), Vec3::ZERO, &mut rng);
        let mooned = Body::planet(&BodyDescriptor::planet("Earth", 8.0, 0.02).with_moon(), Vec3::ZERO, &mut rng);
        assert!(plain.ring.is_none() && plain.moon.is_none());
        assert!(ringed.ring.is_some() && ringed.moon.is_none());
        assert!(mooned.moon.is_some() && mooned.ring.is_none());
    }

    #[test]
    fn planet_starts_placed_on_its_orbit() {
        let mut rng = StdRng::seed_from_u64(9);
        let body = Body::planet(&BodyDescriptor::planet("Venus", 6.5, 0.015).with_eccentricity(0.0), Vec3::ZERO, &mut rng);
        assert!((0.0..TAU).contains(&body.current_angle));
        assert!((body.position().length() - 6.5).abs() < 1e-4);
    }

    #[test]
    fn initial_phases_are_independent() {
        let mut rng = StdRng::seed_from_u64(5);
        let desc = BodyDescriptor::planet("Earth", 8.0, 0.02).with_moon();
        let a = Body::planet(&desc, Vec3::ZERO, &mut rng);
        let b = Body::planet(&desc, Vec3::ZERO, &mut rng);
        assert_ne!(a.current_angle, b.current_angle);
        let moon = a.moon.as_ref().unwrap();
        assert_ne!(moon.angle, a.current_angle);
    }

    #[test]
    fn star_sits_at_origin() {
        let star = Body::star(&BodyDescriptor::star("Sun"));
        assert!(star.is_star());
        assert_eq!(star.position(), Vec3::ZERO);
    }
}
