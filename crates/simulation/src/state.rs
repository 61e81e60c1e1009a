//! Explicit simulation state owned by the frame driver.

use engine_core::{Camera, SimulationClock, DISPLAY_YEAR_LENGTH};
use glam::{Vec2, Vec3};
use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

use crate::body::Body;
use crate::catalog::{BodyCatalog, BodyId};
use crate::events::SelectionEvent;
use crate::focus::{FocusState, FocusStateMachine, FollowEasing, DEFAULT_FOLLOW_OFFSET};
use crate::integrator::OrbitalIntegrator;
use crate::pick::{Hover, PickController};
use crate::scene::{FrameView, SceneSink};

/// Startup knobs for the core.
#[derive(Debug, Clone)]
pub struct SimulationSettings {
    /// Initial global orbit speed multiplier.
    pub speed_multiplier: f32,
    pub follow_offset: Vec3,
    pub follow_easing: FollowEasing,
    /// Year length of the day counter display.
    pub year_length: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            speed_multiplier: 0.5,
            follow_offset: DEFAULT_FOLLOW_OFFSET,
            follow_easing: FollowEasing::default(),
            year_length: DISPLAY_YEAR_LENGTH,
        }
    }
}

/// Everything the per-frame sequence touches.
pub struct SimulationState {
    catalog: BodyCatalog,
    bodies: Vec<Body>,
    clock: SimulationClock,
    integrator: OrbitalIntegrator,
    picker: PickController,
    focus: FocusStateMachine,
    camera: Camera,
    pointer: Option<Vec2>,
    events: VecDeque<SelectionEvent>,
    year_length: u32,
}

impl SimulationState {
    /// Build runtime bodies from a validated catalog, drawing initial phases from `rng`.
    pub fn new<R: Rng + ?Sized>(catalog: BodyCatalog, camera: Camera, settings: SimulationSettings, rng: &mut R) -> Self {
        let star = Body::star(catalog.star());
        let star_position = star.position();
        let mut bodies = Vec::with_capacity(catalog.body_count());
        bodies.push(star);
        bodies.extend(catalog.planets().iter().map(|p| Body::planet(p, star_position, rng)));

        log::info!(
            "Simulation ready: {} bodies around {}, speed x{}",
            bodies.len(),
            catalog.star_id(),
            settings.speed_multiplier
        );

        Self {
            catalog,
            bodies,
            clock: SimulationClock::new(settings.speed_multiplier),
            integrator: OrbitalIntegrator::new(),
            picker: PickController::new(),
            focus: FocusStateMachine::new(settings.follow_offset, settings.follow_easing),
            camera,
            pointer: None,
            events: VecDeque::new(),
            year_length: settings.year_length,
        }
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: &BodyId) -> Option<&Body> {
        self.bodies.iter().find(|body| &body.id == id)
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Camera access for the navigation collaborator (drag/zoom while free).
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn focus(&self) -> &FocusState {
        self.focus.state()
    }

    pub fn hover(&self) -> &Hover {
        self.picker.hover()
    }

    /// Latest pointer position in NDC, or `None` when the pointer is off the canvas.
    pub fn set_pointer_ndc(&mut self, ndc: Option<Vec2>) {
        self.pointer = ndc;
    }

    pub fn set_speed_multiplier(&mut self, value: f32) {
        self.clock.set_speed_multiplier(value);
    }

    /// Queue a selection event for the next frame.
    pub fn push_event(&mut self, event: SelectionEvent) {
        self.events.push_back(event);
    }

    /// Run one frame with an explicit delta: clock, integrate, pick,
    /// selection, camera follow, present.
    pub fn frame<S: SceneSink>(&mut self, delta: Duration, sink: &mut S) {
        let dt = self.clock.advance(delta);
        self.run_frame(dt, sink);
    }

    /// Run one frame timed by the wall clock since the previous call.
    pub fn frame_realtime<S: SceneSink>(&mut self, sink: &mut S) {
        let dt = self.clock.tick();
        self.run_frame(dt, sink);
    }

    fn run_frame<S: SceneSink>(&mut self, dt: f32, sink: &mut S) {
        self.integrator
            .step(&mut self.bodies, dt, self.clock.speed_multiplier());

        sink.sync_bodies(&self.bodies);
        let pickables = sink.pickables();
        let hover = self.picker.update(&self.camera, self.pointer, &pickables).clone();
        sink.set_hovered(&hover);

        let before = self.focus.state().clone();
        while let Some(event) = self.events.pop_front() {
            self.apply_event(event, &hover);
        }
        let focus = self.focus.state();
        if *focus != before {
            let info = focus.target().and_then(|id| self.catalog.get(id)).map(|body| &body.info);
            sink.focus_changed(focus, info);
        }

        let camera_followed = self.focus.update(&mut self.camera, &self.bodies, dt);

        sink.present(&FrameView {
            frame: self.clock.frame_count(),
            camera: &self.camera,
            focus: self.focus.state(),
            hover: &hover,
            day: self.clock.day_counter(self.year_length),
            camera_followed,
        });
    }

    fn apply_event(&mut self, event: SelectionEvent, hover: &Hover) {
        match event {
            SelectionEvent::SelectBody(id) => {
                self.focus.select_body(&self.catalog, &id);
            }
            SelectionEvent::SelectStar => {
                self.focus.select_star(&self.catalog);
            }
            SelectionEvent::FreeMovement => self.focus.clear(),
            SelectionEvent::Click => {
                self.focus.click(&self.catalog, hover.hovered());
            }
        }
    }
}
