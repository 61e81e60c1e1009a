//! Core engine types shared by the orrery crates.
//!
//! - Transform and spatial helpers
//! - Simulation clock with a user-adjustable speed multiplier
//! - Perspective camera and picking rays

pub mod camera;
pub mod ray;
pub mod time;
pub mod transform;

pub use camera::*;
pub use ray::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
