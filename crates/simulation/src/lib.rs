//! Orbital simulation and interaction-state engine.
//!
//! One frame runs, in order: clock advance, orbital integration, pointer
//! picking against the updated transforms, selection events, then the
//! follow-camera update. See [`SimulationState::frame`].

pub mod body;
pub mod catalog;
pub mod error;
pub mod events;
pub mod focus;
pub mod integrator;
pub mod pick;
pub mod scene;
pub mod state;

pub use body::*;
pub use catalog::*;
pub use error::*;
pub use events::*;
pub use focus::*;
pub use integrator::{orbital_position, wrap_angle, OrbitalIntegrator};
pub use pick::*;
pub use scene::*;
pub use state::*;
