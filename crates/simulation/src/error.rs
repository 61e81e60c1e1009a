//! Catalog validation errors.

use thiserror::Error;

/// Result type for catalog construction.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Reasons a body catalog is refused at startup.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("body id must not be empty")]
    EmptyId,

    #[error("duplicate body id: {0}")]
    DuplicateId(String),

    #[error("star {id} must sit at distance 0, got {distance}")]
    StarNotAtOrigin { id: String, distance: f32 },

    #[error("body {id} has invalid mean distance {distance} (must be finite and > 0)")]
    InvalidDistance { id: String, distance: f32 },

    #[error("body {id} has invalid angular speed {speed} (must be finite and > 0)")]
    InvalidAngularSpeed { id: String, speed: f32 },

    #[error("body {id} has invalid eccentricity {eccentricity} (must be in [0, 1))")]
    InvalidEccentricity { id: String, eccentricity: f32 },

    #[error("body {id} has invalid visual radius {radius}")]
    InvalidRadius { id: String, radius: f32 },

    #[error("catalog parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
