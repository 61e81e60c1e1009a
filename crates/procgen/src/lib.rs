//! Procedural generation for orbit lines and the background starfield.

pub mod orbit_path;
pub mod starfield;

pub use orbit_path::*;
pub use starfield::*;
