//! Focus state machine: free navigation or camera locked onto a body.

use engine_core::Camera;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::catalog::{BodyCatalog, BodyId};

/// Camera offset from the focused body.
pub const DEFAULT_FOLLOW_OFFSET: Vec3 = Vec3::splat(5.0);
/// Per-frame interpolation factor of the follow camera.
pub const DEFAULT_FOLLOW_LERP: f32 = 0.02;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FocusState {
    #[default]
    Free,
    Targeted(BodyId),
}

impl FocusState {
    pub fn target(&self) -> Option<&BodyId> {
        match self {
            FocusState::Free => None,
            FocusState::Targeted(id) => Some(id),
        }
    }
}

/// How the camera position closes in on the follow point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FollowEasing {
    /// Fixed lerp factor applied once per frame; convergence depends on frame rate.
    PerFrame(f32),
    /// Exponential decay with the given rate per second; frame-rate independent.
    Exponential(f32),
}

impl Default for FollowEasing {
    fn default() -> Self {
        FollowEasing::PerFrame(DEFAULT_FOLLOW_LERP)
    }
}

impl FollowEasing {
    /// Whether the camera strictly closes in on every frame with positive `dt`.
    pub fn is_valid(&self) -> bool {
        match *self {
            FollowEasing::PerFrame(t) => t > 0.0 && t < 1.0,
            FollowEasing::Exponential(rate) => rate.is_finite() && rate > 0.0,
        }
    }

    /// This easing, or the default (with a warning) if it would stall or snap the camera.
    pub fn validated(self) -> Self {
        if self.is_valid() {
            return self;
        }
        let fallback = Self::default();
        log::warn!("Invalid follow easing {:?}, using {:?}", self, fallback);
        fallback
    }

    /// Interpolation factor in `[0, 1]` for a frame of `dt` seconds.
    pub fn factor(&self, dt: f32) -> f32 {
        match *self {
            FollowEasing::PerFrame(t) => t.clamp(0.0, 1.0),
            FollowEasing::Exponential(rate) => 1.0 - (-rate.max(0.0) * dt.max(0.0)).exp(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FocusStateMachine {
    state: FocusState,
    offset: Vec3,
    easing: FollowEasing,
}

impl Default for FocusStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_FOLLOW_OFFSET, FollowEasing::default())
    }
}

impl FocusStateMachine {
    /// Invalid easings fall back to the default.
    pub fn new(offset: Vec3, easing: FollowEasing) -> Self {
        Self {
            state: FocusState::Free,
            offset,
            easing: easing.validated(),
        }
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    /// Target a body from either state. Unknown ids leave the state unchanged.
    pub fn select_body(&mut self, catalog: &BodyCatalog, id: &BodyId) -> bool {
        if !catalog.contains(id) {
            log::warn!("Ignoring selection of unknown body {}", id);
            return false;
        }
        if self.state.target() != Some(id) {
            log::info!("Focus -> {}", id);
        }
        self.state = FocusState::Targeted(id.clone());
        true
    }

    /// Target the star.
    pub fn select_star(&mut self, catalog: &BodyCatalog) -> bool {
        self.select_body(catalog, catalog.star_id())
    }

    /// Return to free movement.
    pub fn clear(&mut self) {
        if self.state != FocusState::Free {
            log::info!("Focus -> free movement");
        }
        self.state = FocusState::Free;
    }

    /// Canvas click: a hit selects that body, a miss while targeted clears.
    /// Returns true only if the focus state changed.
    pub fn click(&mut self, catalog: &BodyCatalog, hit: Option<&BodyId>) -> bool {
        let before = self.state.clone();
        match hit {
            Some(id) => {
                self.select_body(catalog, id);
            }
            None => self.clear(),
        }
        self.state != before
    }

    /// Ease the camera toward the focused body. Returns false (and leaves the
    /// camera alone) while free or if the target has no live body.
    pub fn update(&self, camera: &mut Camera, bodies: &[Body], dt: f32) -> bool {
        let Some(id) = self.state.target() else {
            return false;
        };
        let Some(body) = bodies.iter().find(|body| &body.id == id) else {
            return false;
        };
        let body_position = body.position();
        let desired = body_position + self.offset;
        camera.position = camera.position.lerp(desired, self.easing.factor(dt));
        camera.target = body_position;
        true
    }
}
