use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::boundary::{InletProfile, Perturbation};
use crate::error::{KarmanError, Result};
use crate::lattice::CS2;
use crate::params::TauBand;
use crate::streaming::{BounceBack, EdgePolicy};

/// Everything needed to set up a simulation. Missing JSON fields fall back
/// to the defaults, which describe a 400x200 channel at Re=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub inlet_velocity: f32,
    pub reynolds: f32,
    pub obstacle_radius: f32,
    /// Defaults to `(grid_width / 4, grid_height / 2)` when absent.
    pub obstacle_center: Option<[f32; 2]>,
    pub inlet_profile: InletProfile,
    pub perturbation: Perturbation,
    pub substeps_per_frame: usize,
    pub tau_band: TauBand,
    pub edge_policy: EdgePolicy,
    pub bounce_back: BounceBack,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_width: 400,
            grid_height: 200,
            inlet_velocity: 0.08,
            reynolds: 100.0,
            obstacle_radius: 22.0,
            obstacle_center: None,
            inlet_profile: InletProfile::Uniform,
            perturbation: Perturbation::default(),
            substeps_per_frame: 4,
            tau_band: TauBand::default(),
            edge_policy: EdgePolicy::Drop,
            bounce_back: BounceBack::OwnOpposite,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn center(&self) -> glam::Vec2 {
        match self.obstacle_center {
            Some([x, y]) => glam::Vec2::new(x, y),
            None => glam::Vec2::new(
                (self.grid_width / 4) as f32,
                (self.grid_height / 2) as f32,
            ),
        }
    }

    /// Rejects configurations that cannot run. The relaxation-time clamp is
    /// applied later and is not an error.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = (self.grid_width, self.grid_height);
        if width < 3 || height < 3 {
            return Err(KarmanError::InvalidGrid { width, height });
        }

        let u = self.inlet_velocity;
        if !u.is_finite() || u <= 0.0 || u >= CS2.sqrt() {
            return Err(KarmanError::InvalidInletVelocity(u));
        }

        if !self.reynolds.is_finite() || self.reynolds <= 0.0 {
            return Err(KarmanError::InvalidReynolds(self.reynolds));
        }

        let radius = self.obstacle_radius;
        let limit = width.min(height) as f32 / 2.0;
        if !radius.is_finite() || radius <= 0.0 || radius >= limit {
            return Err(KarmanError::InvalidObstacleRadius { radius, limit });
        }

        // Column 0 is the inlet, NX-2 feeds the outlet copy.
        let center = self.center();
        let clear_x = center.x - radius > 0.0 && center.x + radius < (width - 2) as f32;
        let inside_y = center.y >= 0.0 && center.y < height as f32;
        if !clear_x || !inside_y {
            return Err(KarmanError::ObstacleOutOfBounds {
                x: center.x,
                y: center.y,
                radius,
            });
        }

        if self.substeps_per_frame == 0 {
            return Err(KarmanError::InvalidSubsteps);
        }

        self.tau_band.validate()?;
        self.inlet_profile.validate()?;
        self.perturbation.validate()?;

        Ok(())
    }
}
