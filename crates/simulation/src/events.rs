//! Discrete selection events from the GUI list and the canvas.

use crate::catalog::BodyId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Choose a body by id (list entry or external control).
    SelectBody(BodyId),
    /// Choose the star.
    SelectStar,
    /// Release the camera to free navigation.
    FreeMovement,
    /// Pointer click on the canvas; resolved against this frame's hover.
    Click,
}
