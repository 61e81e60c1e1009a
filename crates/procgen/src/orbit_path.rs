//! Closed polylines tracing circular orbits in the XZ plane.

use glam::Vec3;

/// Segments per orbit line.
pub const ORBIT_SAMPLES: usize = 64;

/// Generate `samples + 1` points on a circle of `radius` around the origin.
///
/// Point `i` sits at angle `i / samples * 2π`, so the first and last points
/// coincide and the line strip closes.
pub fn orbit_path(radius: f32, samples: usize) -> Vec<Vec3> {
    let samples = samples.max(1);
    (0..=samples)
        .map(|i| {
            let angle = if i == samples {
                0.0
            } else {
                (i as f32 / samples as f32) * std::f32::consts::TAU
            };
            Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect()
}

/// Byte view of a point list for vertex buffer upload.
pub fn vertex_bytes(points: &[Vec3]) -> &[u8] {
    bytemuck::cast_slice(points)
}
