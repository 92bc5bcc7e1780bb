//! D2Q9 lattice Boltzmann simulation of flow past a circular obstacle.

pub mod analysis;
pub mod boundary;
pub mod collision;
pub mod config;
pub mod equilibrium;
pub mod error;
pub mod export;
pub mod field;
pub mod geometry;
pub mod lattice;
pub mod macroscopic;
pub mod params;
pub mod render;
pub mod simulation;
pub mod streaming;
pub mod view;

pub use analysis::{AnalysisRecorder, Diagnostics, FlowMetrics};
pub use boundary::{InletProfile, Perturbation};
pub use config::SimConfig;
pub use error::{KarmanError, Result};
pub use export::ImageExporter;
pub use field::Field;
pub use geometry::Obstacle;
pub use params::{FlowParams, TauBand};
pub use render::Renderer;
pub use simulation::Simulation;
pub use streaming::{BounceBack, EdgePolicy};
pub use view::{FluidData, MacroscopicView};
