//! Transform component and utilities for spatial positioning.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Uniformly scaled transform, used for spheres built from a unit mesh.
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Rotation whose forward axis points from `eye` toward `target`.
    ///
    /// Returns `None` when the two points coincide or the direction is
    /// parallel to `up`, where no unique orientation exists.
    pub fn look_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Option<Quat> {
        let forward = (target - eye).normalize_or_zero();
        if forward.length_squared() < 0.0001 || forward.cross(up).length_squared() < 1e-8 {
            return None;
        }
        Some(Quat::from_mat4(&Mat4::look_at_rh(eye, target, up)).inverse())
    }

    /// Look at a target position. Leaves the rotation untouched in degenerate cases.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        if let Some(rotation) = Self::look_rotation(self.position, target, up) {
            self.rotation = rotation;
        }
    }
}

/// Raw transform data for GPU upload (instance data).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TransformRaw {
    pub model: [[f32; 4]; 4],
}

impl From<&Transform> for TransformRaw {
    fn from(transform: &Transform) -> Self {
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
        }
    }
}
