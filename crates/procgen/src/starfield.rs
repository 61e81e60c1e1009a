//! Background starfield: a fixed random point cloud inside a cube.

use glam::Vec3;
use rand::prelude::*;

/// Stars in the default field.
pub const STAR_COUNT: usize = 99_000;
/// Half-extent of the cube the stars are sampled in.
pub const STAR_EXTENT: f32 = 150.0;

/// Point sprite appearance handed to the renderer with the positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldStyle {
    pub color: Vec3,
    pub point_size: f32,
    pub opacity: f32,
}

impl Default for StarfieldStyle {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            point_size: 0.2,
            opacity: 0.9,
        }
    }
}

/// Uniform-per-axis point cloud inside `[-extent, extent]^3`.
#[derive(Debug, Clone)]
pub struct Starfield {
    pub points: Vec<Vec3>,
    pub extent: f32,
    pub style: StarfieldStyle,
}

impl Starfield {
    /// Sample `count` stars from `rng`. Each axis is drawn independently.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize, extent: f32) -> Self {
        let side = extent * 2.0;
        let points = (0..count)
            .map(|_| {
                Vec3::new(
                    (rng.gen::<f32>() - 0.5) * side,
                    (rng.gen::<f32>() - 0.5) * side,
                    (rng.gen::<f32>() - 0.5) * side,
                )
            })
            .collect();
        log::debug!("Generated starfield: {} stars, extent {}", count, extent);
        Self {
            points,
            extent,
            style: StarfieldStyle::default(),
        }
    }

    /// Generate from a seed.
    pub fn generate_seeded(seed: u64, count: usize, extent: f32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(&mut rng, count, extent)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
