//! Pointer picking against body spheres and planetary rings.

use engine_core::{Camera, Ray};
use glam::{Vec2, Vec3};

use crate::catalog::BodyId;

/// Hit-test geometry of a pickable mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickShape {
    Sphere { center: Vec3, radius: f32 },
    /// Flat double-sided annulus.
    Ring { center: Vec3, normal: Vec3, inner_radius: f32, outer_radius: f32 },
}

impl PickShape {
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match *self {
            PickShape::Sphere { center, radius } => ray.intersect_sphere(center, radius),
            PickShape::Ring { center, normal, inner_radius, outer_radius } => {
                ray.intersect_annulus(center, normal, inner_radius, outer_radius)
            }
        }
    }
}

/// A render-side mesh the pointer can hit, tagged with the body it mirrors.
///
/// `H` is the scene's own handle type; matching is done on `body`, never on
/// handle identity. A ring carries its planet's id, so hitting it picks the planet.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickable<H> {
    pub handle: H,
    pub body: BodyId,
    pub shape: PickShape,
}

impl<H> Pickable<H> {
    pub fn sphere(handle: H, body: BodyId, center: Vec3, radius: f32) -> Self {
        Self { handle, body, shape: PickShape::Sphere { center, radius } }
    }
}

/// Nearest intersection along the pointer ray.
#[derive(Debug, Clone, PartialEq)]
pub struct PickHit<H> {
    pub handle: H,
    pub body: BodyId,
    pub distance: f32,
    pub point: Vec3,
}

/// Which body, if any, is under the pointer this frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hover {
    hovered: Option<BodyId>,
}

impl Hover {
    pub fn hovered(&self) -> Option<&BodyId> {
        self.hovered.as_ref()
    }

    pub fn is_hovered(&self, id: &BodyId) -> bool {
        self.hovered.as_ref() == Some(id)
    }
}

/// Convert window pixel coordinates to NDC (`[-1, 1]`, Y flipped to point up).
pub fn screen_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        (x / width.max(1.0)) * 2.0 - 1.0,
        -(y / height.max(1.0)) * 2.0 + 1.0,
    )
}

#[derive(Debug, Default)]
pub struct PickController {
    hover: Hover,
}

impl PickController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cast the pointer ray and return the closest hit. Equal distances keep
    /// the earlier pickable.
    pub fn pick<H: Copy>(&self, camera: &Camera, ndc: Vec2, pickables: &[Pickable<H>]) -> Option<PickHit<H>> {
        let ray = camera.ray_from_ndc(ndc);
        pickables
            .iter()
            .filter_map(|p| {
                p.shape.intersect(&ray).map(|distance| PickHit {
                    handle: p.handle,
                    body: p.body.clone(),
                    distance,
                    point: ray.point_at(distance),
                })
            })
            .min_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Refresh the hover state. With no pointer nothing is hovered.
    pub fn update<H: Copy>(&mut self, camera: &Camera, ndc: Option<Vec2>, pickables: &[Pickable<H>]) -> &Hover {
        let hit = ndc.and_then(|ndc| self.pick(camera, ndc, pickables));
        let hovered = hit.as_ref().map(|hit| hit.body.clone());
        if hovered != self.hover.hovered {
            match &hit {
                Some(hit) => log::debug!("Hover -> {} at {:.2} ({:.2} away)", hit.body, hit.point, hit.distance),
                None => log::debug!("Hover cleared"),
            }
            self.hover.hovered = hovered;
        }
        &self.hover
    }

    pub fn hover(&self) -> &Hover {
        &self.hover
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_on_z(z: f32) -> Camera {
        Camera {
            position: Vec3::new(0.0, 0.0, z),
            target: Vec3::ZERO,
            ..Default::default()
        }
    }

    fn sphere(handle: u32, id: &str, center: Vec3, radius: f32) -> Pickable<u32> {
        Pickable::sphere(handle, BodyId::from(id), center, radius)
    }

    fn ring(handle: u32, id: &str, center: Vec3) -> Pickable<u32> {
        Pickable {
            handle,
            body: BodyId::from(id),
            shape: PickShape::Ring { center, normal: Vec3::Y, inner_radius: 0.6, outer_radius: 1.2 },
        }
    }

    #[test]
    fn ndc_flips_y() {
        assert_eq!(screen_to_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
        assert_eq!(screen_to_ndc(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
        assert_eq!(screen_to_ndc(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
    }

    #[test]
    fn nearest_hit_wins() {
        let camera = camera_on_z(40.0);
        let pickables = [
            sphere(1, "Far", Vec3::new(0.0, 0.0, -5.0), 1.0),
            sphere(2, "Near", Vec3::new(0.0, 0.0, 5.0), 1.0),
        ];
        let hit = PickController::new().pick(&camera, Vec2::ZERO, &pickables).unwrap();
        assert_eq!(hit.body.as_str(), "Near");
        assert_eq!(hit.handle, 2);
        assert!((hit.point - Vec3::new(0.0, 0.0, 6.0)).length() < 1e-3);
    }

    #[test]
    fn ring_outside_sphere_picks_its_planet() {
        let saturn = Vec3::new(20.0, 0.0, 0.0);
        let camera = Camera {
            position: saturn + Vec3::new(0.9, 10.0, 0.0),
            target: saturn + Vec3::new(0.9, 0.0, 0.1),
            ..Default::default()
        };
        let pickables = [sphere(1, "Saturn", saturn, 0.5), ring(2, "Saturn", saturn)];
        let hit = PickController::new().pick(&camera, Vec2::ZERO, &pickables).unwrap();
        assert_eq!(hit.body.as_str(), "Saturn");
        assert_eq!(hit.handle, 2);
    }

    #[test]
    fn tie_keeps_first_pickable() {
        let camera = camera_on_z(40.0);
        let pickables = [sphere(1, "A", Vec3::ZERO, 1.0), sphere(2, "B", Vec3::ZERO, 1.0)];
        let hit = PickController::new().pick(&camera, Vec2::ZERO, &pickables).unwrap();
        assert_eq!(hit.body.as_str(), "A");
    }

    #[test]
    fn empty_ray_hovers_nothing() {
        let camera = camera_on_z(40.0);
        let pickables = [sphere(1, "Mars", Vec3::new(10.0, 0.0, 0.0), 0.5)];
        let mut picker = PickController::new();
        let hover = picker.update(&camera, Some(Vec2::ZERO), &pickables);
        assert_eq!(hover.hovered(), None);
        assert!(!hover.is_hovered(&BodyId::from("Mars")));
    }

    #[test]
    fn hover_follows_pointer_and_clears() {
        let camera = camera_on_z(40.0);
        let pickables = [sphere(7, "Sun", Vec3::ZERO, 3.0)];
        let mut picker = PickController::new();
        assert!(picker.update(&camera, Some(Vec2::ZERO), &pickables).is_hovered(&BodyId::from("Sun")));
        assert_eq!(picker.update(&camera, Some(Vec2::new(0.95, 0.95)), &pickables).hovered(), None);
        picker.update(&camera, Some(Vec2::ZERO), &pickables);
        assert_eq!(picker.update(&camera, None, &pickables).hovered(), None);
    }
}
