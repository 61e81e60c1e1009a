//! Headless render mirror: one hecs entity per drawable, fed by the simulation each frame.

use engine_core::{Transform, TransformRaw};
use glam::Vec3;
use hecs::{Entity, World};
use procgen::{orbit_path, vertex_bytes, Starfield, StarfieldStyle};
use simulation::{Body, BodyId, BodyInfo, FocusState, FrameView, Hover, PickShape, Pickable, SceneSink};
use std::collections::HashMap;

/// Label sprite offset from its body.
const LABEL_OFFSET: Vec3 = Vec3::new(1.0, 1.5, 0.0);

/// Sphere mesh for a star or planet.
#[derive(Debug, Clone)]
pub struct BodyMesh {
    pub body: BodyId,
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct MoonMesh {
    pub parent: BodyId,
}

#[derive(Debug, Clone)]
pub struct RingMesh {
    pub parent: BodyId,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub segments: u32,
    pub double_sided: bool,
}

/// Name sprite shown while its body is hovered.
#[derive(Debug, Clone)]
pub struct Label {
    pub body: BodyId,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct OrbitLine {
    pub body: BodyId,
    pub points: Vec<Vec3>,
}

#[derive(Debug, Clone)]
pub struct StarCloud {
    pub points: Vec<Vec3>,
    pub style: StarfieldStyle,
}

pub struct HeadlessScene {
    world: World,
    /// Body meshes in catalog order.
    body_entities: Vec<(BodyId, Entity)>,
    moons: HashMap<BodyId, Entity>,
    rings: HashMap<BodyId, Entity>,
    labels: HashMap<BodyId, Entity>,
    info_panel: Option<String>,
    day_text: String,
    frames_presented: u64,
}

impl HeadlessScene {
    /// Spawn meshes for every body plus orbit lines and the starfield.
    pub fn build(bodies: &[Body], orbit_samples: usize, starfield: Starfield) -> Self {
        let mut world = World::new();
        let mut body_entities = Vec::with_capacity(bodies.len());
        let mut moons = HashMap::new();
        let mut rings = HashMap::new();
        let mut labels = HashMap::new();

        for body in bodies {
            let entity = world.spawn((
                body.transform,
                BodyMesh { body: body.id.clone(), radius: body.radius },
            ));
            body_entities.push((body.id.clone(), entity));

            if body.is_star() {
                continue;
            }

            world.spawn((
                Transform::default(),
                OrbitLine { body: body.id.clone(), points: orbit_path(body.mean_distance, orbit_samples) },
            ));
            let label = world.spawn((
                Transform::from_position(body.position() + LABEL_OFFSET),
                Label { body: body.id.clone(), visible: false },
            ));
            labels.insert(body.id.clone(), label);

            if let Some(moon) = &body.moon {
                let entity = world.spawn((moon.transform, MoonMesh { parent: body.id.clone() }));
                moons.insert(body.id.clone(), entity);
            }
            if let Some(ring) = &body.ring {
                let entity = world.spawn((
                    ring.transform,
                    RingMesh {
                        parent: body.id.clone(),
                        inner_radius: ring.inner_radius,
                        outer_radius: ring.outer_radius,
                        segments: ring.segments,
                        double_sided: ring.double_sided,
                    },
                ));
                rings.insert(body.id.clone(), entity);
            }
        }

        log::info!(
            "Scene built: {} bodies, {} moons, {} rings, {} stars",
            body_entities.len(),
            moons.len(),
            rings.len(),
            starfield.len()
        );
        world.spawn((StarCloud { points: starfield.points, style: starfield.style },));

        Self {
            world,
            body_entities,
            moons,
            rings,
            labels,
            info_panel: None,
            day_text: String::new(),
            frames_presented: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Bodies whose label is currently shown.
    pub fn visible_labels(&self) -> Vec<BodyId> {
        self.world
            .query::<&Label>()
            .iter()
            .filter(|(_, label)| label.visible)
            .map(|(_, label)| label.body.clone())
            .collect()
    }

    /// Info panel text, `None` while hidden.
    pub fn info_panel(&self) -> Option<&str> {
        self.info_panel.as_deref()
    }

    pub fn day_text(&self) -> &str {
        &self.day_text
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Body, moon and ring model matrices for instanced drawing.
    pub fn instance_data(&self) -> Vec<TransformRaw> {
        let mut instances: Vec<TransformRaw> = self
            .body_entities
            .iter()
            .filter_map(|(_, entity)| self.world.get::<&Transform>(*entity).ok().map(|t| TransformRaw::from(&*t)))
            .collect();
        for entity in self.moons.values().chain(self.rings.values()) {
            if let Ok(t) = self.world.get::<&Transform>(*entity) {
                instances.push(TransformRaw::from(&*t));
            }
        }
        instances
    }

    /// Total bytes of line-strip and point vertex data.
    pub fn static_vertex_bytes(&self) -> usize {
        let lines: usize = self
            .world
            .query::<&OrbitLine>()
            .iter()
            .map(|(_, line)| vertex_bytes(&line.points).len())
            .sum();
        let stars: usize = self
            .world
            .query::<&StarCloud>()
            .iter()
            .map(|(_, cloud)| vertex_bytes(&cloud.points).len())
            .sum();
        lines + stars
    }

    fn set_transform(&mut self, entity: Entity, transform: Transform) {
        if let Ok(mut current) = self.world.get::<&mut Transform>(entity) {
            *current = transform;
        }
    }
}

impl SceneSink for HeadlessScene {
    type Handle = Entity;

    fn sync_bodies(&mut self, bodies: &[Body]) {
        let entities: HashMap<&BodyId, Entity> = self.body_entities.iter().map(|(id, e)| (id, *e)).collect();
        let mut updates = Vec::with_capacity(bodies.len() * 2);
        for body in bodies {
            if let Some(entity) = entities.get(&body.id) {
                updates.push((*entity, body.transform));
            }
            if let (Some(moon), Some(entity)) = (&body.moon, self.moons.get(&body.id)) {
                updates.push((*entity, moon.transform));
            }
            if let (Some(ring), Some(entity)) = (&body.ring, self.rings.get(&body.id)) {
                updates.push((*entity, ring.transform));
            }
            if let Some(entity) = self.labels.get(&body.id) {
                updates.push((*entity, Transform::from_position(body.position() + LABEL_OFFSET)));
            }
        }
        for (entity, transform) in updates {
            self.set_transform(entity, transform);
        }
    }

    /// Body spheres in catalog order, then rings tagged with their planet.
    fn pickables(&self) -> Vec<Pickable<Entity>> {
        let spheres = self.body_entities.iter().filter_map(|(id, entity)| {
            let transform = self.world.get::<&Transform>(*entity).ok()?;
            let mesh = self.world.get::<&BodyMesh>(*entity).ok()?;
            Some(Pickable::sphere(*entity, id.clone(), transform.position, mesh.radius))
        });
        let rings = self.rings.values().filter_map(|entity| {
            let transform = self.world.get::<&Transform>(*entity).ok()?;
            let ring = self.world.get::<&RingMesh>(*entity).ok()?;
            Some(Pickable {
                handle: *entity,
                body: ring.parent.clone(),
                shape: PickShape::Ring {
                    center: transform.position,
                    normal: transform.rotation * Vec3::Z,
                    inner_radius: ring.inner_radius,
                    outer_radius: ring.outer_radius,
                },
            })
        });
        spheres.chain(rings).collect()
    }

    fn set_hovered(&mut self, hover: &Hover) {
        for (_, label) in self.world.query_mut::<&mut Label>() {
            label.visible = hover.is_hovered(&label.body);
        }
    }

    fn focus_changed(&mut self, focus: &FocusState, info: Option<&BodyInfo>) {
        self.info_panel = match (focus.target(), info) {
            (Some(id), Some(info)) => Some(format_info(id, info)),
            (Some(id), None) => Some(id.to_string()),
            (None, _) => None,
        };
        match &self.info_panel {
            Some(text) => log::info!("Info panel:\n{}", text),
            None => log::info!("Info panel hidden"),
        }
    }

    fn present(&mut self, frame: &FrameView<'_>) {
        self.day_text = frame.day.to_string();
        self.frames_presented += 1;
        log::debug!(
            "Frame {}: camera {:?} -> {:?}, focus {:?}, hover {:?}",
            frame.frame,
            frame.camera.position,
            frame.camera.target,
            frame.focus,
            frame.hover.hovered()
        );
    }
}

/// Info panel body text.
fn format_info(id: &BodyId, info: &BodyInfo) -> String {
    if info.year_length_days <= 0.0 {
        return format!("{}\n{}", id, info.description);
    }
    let satellites = if info.satellites.is_empty() {
        "None".to_string()
    } else {
        info.satellites.join(", ")
    };
    format!(
        "{}\nYear Length: {} days\nGravity: {} m/s²\nSatellite: {}\n{}",
        id, info.year_length_days, info.gravity, satellites, info.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Camera;
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use simulation::{BodyCatalog, SelectionEvent, SimulationSettings, SimulationState};
    use std::time::Duration;

    fn setup() -> (SimulationState, HeadlessScene) {
        let mut rng = StdRng::seed_from_u64(12);
        let state = SimulationState::new(BodyCatalog::solar_system(), Camera::default(), SimulationSettings::default(), &mut rng);
        let scene = HeadlessScene::build(state.bodies(), 64, Starfield::generate_seeded(12, 100, 150.0));
        (state, scene)
    }

    #[test]
    fn mirror_counts() {
        let (_, scene) = setup();
        // 9 spheres + 2 rings.
        assert_eq!(scene.pickables().len(), 11);
        assert_eq!(scene.world().query::<&OrbitLine>().iter().count(), 8);
        assert_eq!(scene.world().query::<&MoonMesh>().iter().count(), 1);
        assert_eq!(scene.world().query::<&RingMesh>().iter().count(), 2);
        // 9 bodies + 1 moon + 2 rings.
        assert_eq!(scene.instance_data().len(), 12);
        assert_eq!(scene.static_vertex_bytes(), (8 * 65 + 100) * 12);
    }

    #[test]
    fn pickables_follow_synced_bodies() {
        let (mut state, mut scene) = setup();
        state.frame(Duration::from_secs(10), &mut scene);
        for pickable in scene.pickables() {
            let body = state.body(&pickable.body).unwrap();
            match pickable.shape {
                PickShape::Sphere { center, radius } => {
                    assert_eq!(center, body.position());
                    assert_eq!(radius, body.radius);
                }
                PickShape::Ring { center, normal, .. } => {
                    assert_eq!(center, body.position());
                    assert!(normal.cross(Vec3::Y).length() < 1e-5);
                }
            }
        }
    }

    #[test]
    fn clicking_a_ring_focuses_its_planet() {
        let (mut state, mut scene) = setup();
        let saturn = state.body(&BodyId::from("Saturn")).unwrap().position();
        // Straight down onto the ring band, clear of the planet sphere.
        let camera = state.camera_mut();
        camera.position = saturn + Vec3::new(0.9, 10.0, 0.0);
        camera.target = saturn + Vec3::new(0.9, 0.0, 0.1);
        state.set_pointer_ndc(Some(Vec2::ZERO));
        state.push_event(SelectionEvent::Click);
        state.frame(Duration::ZERO, &mut scene);

        assert_eq!(state.hover().hovered(), Some(&BodyId::from("Saturn")));
        assert_eq!(state.focus(), &FocusState::Targeted(BodyId::from("Saturn")));
        assert_eq!(scene.visible_labels(), [BodyId::from("Saturn")]);
    }

    #[test]
    fn only_hovered_label_is_visible() {
        let (mut state, mut scene) = setup();
        let earth = state.body(&BodyId::from("Earth")).unwrap().position();
        let camera = state.camera_mut();
        camera.position = earth + Vec3::new(0.0, 4.0, 4.0);
        camera.target = earth;
        state.set_pointer_ndc(Some(Vec2::ZERO));
        state.frame(Duration::ZERO, &mut scene);
        assert_eq!(scene.visible_labels(), [BodyId::from("Earth")]);

        state.set_pointer_ndc(None);
        state.frame(Duration::ZERO, &mut scene);
        assert!(scene.visible_labels().is_empty());
    }

    #[test]
    fn info_panel_tracks_focus() {
        let (mut state, mut scene) = setup();
        state.push_event(SelectionEvent::SelectBody(BodyId::from("Saturn")));
        state.frame(Duration::from_millis(16), &mut scene);
        let panel = scene.info_panel().unwrap();
        assert!(panel.starts_with("Saturn"));
        assert!(panel.contains("Year Length: 10759 days"));
        assert!(panel.contains("Titan"));

        state.push_event(SelectionEvent::SelectStar);
        state.frame(Duration::from_millis(16), &mut scene);
        assert!(scene.info_panel().unwrap().starts_with("Sun\nThe Sun"));

        state.push_event(SelectionEvent::FreeMovement);
        state.frame(Duration::from_millis(16), &mut scene);
        assert_eq!(scene.info_panel(), None);
        assert_eq!(scene.day_text(), "Day: 1 of 365");
    }
}
