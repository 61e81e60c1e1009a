//! Rays for pointer picking.

use glam::Vec3;

/// A half-line with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized (zero stays zero).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Distance along the ray to the first intersection with a sphere.
    ///
    /// An origin inside the sphere reports the exit point. Spheres entirely
    /// behind the origin do not intersect.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        if self.direction == Vec3::ZERO {
            return None;
        }
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let near = -b - sqrt_disc;
        let far = -b + sqrt_disc;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }

    /// Distance along the ray to a flat annulus centered at `center` in the
    /// plane with normal `normal`. Both faces are hit.
    pub fn intersect_annulus(&self, center: Vec3, normal: Vec3, inner_radius: f32, outer_radius: f32) -> Option<f32> {
        let normal = normal.normalize_or_zero();
        let denom = self.direction.dot(normal);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (center - self.origin).dot(normal) / denom;
        if t < 0.0 {
            return None;
        }
        let r = self.point_at(t).distance(center);
        (inner_radius..=outer_radius).contains(&r).then_some(t)
    }
}
