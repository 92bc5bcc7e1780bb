//! Error types for karman.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KarmanError {
    #[error("grid must be at least 3x3 cells, got {width}x{height}")]
    InvalidGrid { width: usize, height: usize },

    #[error("inlet velocity must be positive and below the lattice sound speed, got {0}")]
    InvalidInletVelocity(f32),

    #[error("Reynolds number must be positive and finite, got {0}")]
    InvalidReynolds(f32),

    #[error("obstacle radius {radius} must be positive and below {limit}")]
    InvalidObstacleRadius { radius: f32, limit: f32 },

    #[error("obstacle at ({x}, {y}) with radius {radius} must clear the inlet and outlet columns")]
    ObstacleOutOfBounds { x: f32, y: f32, radius: f32 },

    #[error("substeps per frame must be at least 1")]
    InvalidSubsteps,

    #[error("relaxation band [{min}, {max}] is unstable: minimum must exceed 0.5 and not exceed maximum")]
    UnstableTauBand { min: f32, max: f32 },

    #[error("relaxation floor slope must be non-negative and finite, got {0}")]
    InvalidVelocitySlope(f32),

    #[error("inlet profile floor must lie in [0, 1], got {0}")]
    InvalidProfileFloor(f32),

    #[error("perturbation period must be positive, got {0}")]
    InvalidPerturbationPeriod(f32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, KarmanError>;
