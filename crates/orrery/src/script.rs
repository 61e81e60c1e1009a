//! Scripted input standing in for the pointer and the GUI panel.

use serde::{Deserialize, Serialize};
use simulation::{screen_to_ndc, BodyId, SelectionEvent, SimulationState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScriptAction {
    /// Pointer moved to window pixel coordinates.
    Pointer { x: f32, y: f32 },
    /// Pointer left the canvas.
    PointerLeave,
    /// Click on the canvas at the current pointer.
    Click,
    /// Pick a body from the list.
    SelectBody(String),
    SelectStar,
    FreeMovement,
    /// Orbit speed slider.
    SetOrbitSpeed(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Zero-based frame before which the action is applied.
    pub frame: u64,
    pub action: ScriptAction,
}

/// Replays steps in frame order.
#[derive(Debug)]
pub struct Script {
    steps: Vec<ScriptStep>,
    cursor: usize,
}

impl Script {
    pub fn new(mut steps: Vec<ScriptStep>) -> Self {
        // Stable sort keeps same-frame steps in authored order.
        steps.sort_by_key(|step| step.frame);
        Self { steps, cursor: 0 }
    }

    /// Apply every step scheduled at or before `frame`. Returns how many ran.
    pub fn apply_due(&mut self, frame: u64, state: &mut SimulationState, viewport: (f32, f32)) -> usize {
        let start = self.cursor;
        while let Some(step) = self.steps.get(self.cursor) {
            if step.frame > frame {
                break;
            }
            log::debug!("Frame {}: {:?}", frame, step.action);
            apply(&step.action, state, viewport);
            self.cursor += 1;
        }
        self.cursor - start
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }
}

fn apply(action: &ScriptAction, state: &mut SimulationState, (width, height): (f32, f32)) {
    match action {
        ScriptAction::Pointer { x, y } => state.set_pointer_ndc(Some(screen_to_ndc(*x, *y, width, height))),
        ScriptAction::PointerLeave => state.set_pointer_ndc(None),
        ScriptAction::Click => state.push_event(SelectionEvent::Click),
        ScriptAction::SelectBody(id) => state.push_event(SelectionEvent::SelectBody(BodyId::new(id.as_str()))),
        ScriptAction::SelectStar => state.push_event(SelectionEvent::SelectStar),
        ScriptAction::FreeMovement => state.push_event(SelectionEvent::FreeMovement),
        ScriptAction::SetOrbitSpeed(speed) => state.set_speed_multiplier(*speed),
    }
}
