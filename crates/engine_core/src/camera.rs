//! Perspective camera with an orbit target.

use glam::{Mat4, Vec2, Vec3};

use crate::Ray;

/// Perspective camera that always looks at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub position: Vec3,
    /// Look / orbit target.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(30.0, 30.0, 30.0),
            target: Vec3::ZERO,
            fov_degrees: 25.0,
            near: 0.1,
            far: 100.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    /// Create a new camera at the given position looking at the origin.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get camera forward direction.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// World-space ray through a point in normalized device coordinates
    /// (`[-1, 1]` on both axes, Y up).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection_matrix().inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_points_at_target() {
        let camera = Camera::default();
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        assert!((ray.direction - camera.forward()).length() < 1e-4);
    }

    #[test]
    fn center_ray_starts_near_eye() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 20.0));
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        assert!((ray.origin - camera.position).length() < 0.2);
    }

    #[test]
    fn corner_ray_diverges_from_forward() {
        let camera = Camera::default();
        let ray = camera.ray_from_ndc(Vec2::new(1.0, 1.0));
        assert!(ray.direction.dot(camera.forward()) < 0.9999);
        assert!(ray.direction.dot(camera.forward()) > 0.8);
    }
}
