//! Seam between the simulation core and whatever renders it.

use engine_core::{Camera, DayCounter};

use crate::body::Body;
use crate::catalog::BodyInfo;
use crate::focus::FocusState;
use crate::pick::{Hover, Pickable};

/// Per-frame view handed to the sink after all core updates.
#[derive(Debug)]
pub struct FrameView<'a> {
    pub frame: u64,
    pub camera: &'a Camera,
    pub focus: &'a FocusState,
    pub hover: &'a Hover,
    pub day: DayCounter,
    /// Whether the focus machine wrote the camera this frame.
    pub camera_followed: bool,
}

/// Receives transform, visibility and camera updates; owns the render state.
///
/// Calls arrive in frame order: `sync_bodies`, `pickables`, `set_hovered`,
/// `focus_changed` (only on transitions), `present`.
pub trait SceneSink {
    /// Render-side handle for a pickable mesh.
    type Handle: Copy;

    /// Mirror this frame's body, moon and ring transforms.
    fn sync_bodies(&mut self, bodies: &[Body]);

    /// Meshes the pointer can hit, positioned as of the last `sync_bodies`.
    fn pickables(&self) -> Vec<Pickable<Self::Handle>>;

    /// Label visibility: only the hovered body shows its label.
    fn set_hovered(&mut self, hover: &Hover);

    /// Selected-body signal for the info panel.
    fn focus_changed(&mut self, _focus: &FocusState, _info: Option<&BodyInfo>) {}

    fn present(&mut self, frame: &FrameView<'_>);
}
