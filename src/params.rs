use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::{KarmanError, Result};

/// Interval the relaxation time is clamped into.
///
/// Faster inlets need more viscosity to stay stable, so the effective floor
/// is `max(min, 0.5 + velocity_slope * u_in)`. With the defaults the floor is
/// 0.6 up to `u_in = 1/12` and reaches 0.8 at `u_in = 0.25`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TauBand {
    pub min: f32,
    pub max: f32,
    pub velocity_slope: f32,
}

impl Default for TauBand {
    fn default() -> Self {
        Self {
            min: 0.6,
            max: 0.9,
            velocity_slope: 1.2,
        }
    }
}

impl TauBand {
    /// `tau <= 0.5` means zero or negative viscosity, so the floor must sit above it.
    pub fn validate(&self) -> Result<()> {
        let stable = self.min.is_finite() && self.max.is_finite() && self.min > 0.5 && self.max >= self.min;
        if !stable {
            return Err(KarmanError::UnstableTauBand {
                min: self.min,
                max: self.max,
            });
        }
        if !self.velocity_slope.is_finite() || self.velocity_slope < 0.0 {
            return Err(KarmanError::InvalidVelocitySlope(self.velocity_slope));
        }
        Ok(())
    }

    /// Lowest relaxation time allowed for an inlet velocity.
    pub fn floor_for(&self, inlet_velocity: f32) -> f32 {
        self.min.max(0.5 + self.velocity_slope * inlet_velocity)
    }

    /// Clamps into `[floor_for(u), max]`. A floor above `max` wins.
    pub fn clamp(&self, tau: f32, inlet_velocity: f32) -> f32 {
        let floor = self.floor_for(inlet_velocity);
        tau.clamp(floor, self.max.max(floor))
    }
}

/// Physical parameters derived once at setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowParams {
    pub inlet_velocity: f32,
    pub reynolds: f32,
    pub obstacle_radius: f32,
    /// Kinematic viscosity matching the requested Reynolds number.
    pub viscosity: f32,
    /// `3 * viscosity + 0.5` before clamping.
    pub tau_raw: f32,
    pub tau: f32,
}

impl FlowParams {
    pub fn derive(config: &SimConfig) -> Result<Self> {
        config.tau_band.validate()?;

        let characteristic_length = 2.0 * config.obstacle_radius;
        let viscosity = config.inlet_velocity * characteristic_length / config.reynolds;
        let tau_raw = 3.0 * viscosity + 0.5;
        let tau = config.tau_band.clamp(tau_raw, config.inlet_velocity);

        if tau != tau_raw {
            log::warn!(
                "relaxation time {:.4} outside stable band [{:.4}, {}] for u_in={}, clamped to {:.4}",
                tau_raw,
                config.tau_band.floor_for(config.inlet_velocity),
                config.tau_band.max,
                config.inlet_velocity,
                tau
            );
        }

        Ok(Self {
            inlet_velocity: config.inlet_velocity,
            reynolds: config.reynolds,
            obstacle_radius: config.obstacle_radius,
            viscosity,
            tau_raw,
            tau,
        })
    }

    pub fn is_clamped(&self) -> bool {
        self.tau != self.tau_raw
    }

    /// Viscosity actually simulated after clamping.
    pub fn effective_viscosity(&self) -> f32 {
        (self.tau - 0.5) / 3.0
    }

    pub fn effective_reynolds(&self) -> f32 {
        self.inlet_velocity * 2.0 * self.obstacle_radius / self.effective_viscosity()
    }
}
