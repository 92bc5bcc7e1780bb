//! Boundary treatments applied to the freshly streamed generation.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::equilibrium::equilibrium;
use crate::error::{KarmanError, Result};
use crate::field::Field;
use crate::geometry::Obstacle;
use crate::lattice::Q;
use crate::macroscopic::density_velocity;

/// Shape of the inlet velocity across the channel height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum InletProfile {
    #[default]
    Uniform,
    /// Parabola peaking at the centerline, never dropping below `floor`.
    ParabolicFloor { floor: f32 },
}

impl InletProfile {
    pub fn validate(&self) -> Result<()> {
        match *self {
            InletProfile::Uniform => Ok(()),
            InletProfile::ParabolicFloor { floor } if (0.0..=1.0).contains(&floor) => Ok(()),
            InletProfile::ParabolicFloor { floor } => Err(KarmanError::InvalidProfileFloor(floor)),
        }
    }

    /// Fraction of the inlet speed at row `y`, in `[0, 1]`.
    pub fn factor(&self, y: usize, height: usize) -> f32 {
        match *self {
            InletProfile::Uniform => 1.0,
            InletProfile::ParabolicFloor { floor } => {
                let s = (y as f32 + 0.5) / height as f32;
                (4.0 * s * (1.0 - s)).max(floor)
            }
        }
    }
}

/// Oscillating transverse kick just behind the obstacle, used to break the
/// symmetry of the wake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Perturbation {
    pub enabled: bool,
    /// Peak transverse velocity as a fraction of the inlet velocity.
    pub amplitude: f32,
    /// Oscillation period in steps.
    pub period: f32,
}

impl Default for Perturbation {
    fn default() -> Self {
        Self {
            enabled: false,
            amplitude: 0.01,
            period: 500.0,
        }
    }
}

impl Perturbation {
    pub fn validate(&self) -> Result<()> {
        if self.period.is_finite() && self.period > 0.0 {
            Ok(())
        } else {
            Err(KarmanError::InvalidPerturbationPeriod(self.period))
        }
    }

    /// Transverse velocity offset at `step`.
    pub fn offset(&self, inlet_velocity: f32, step: u64) -> f32 {
        let phase = (step as f64 / self.period as f64).fract() as f32;
        self.amplitude * inlet_velocity * (TAU * phase).sin()
    }
}

/// Dirichlet velocity inlet on column 0: `rho = 1`, `u = (u_in * profile(y), 0)`.
pub fn apply_inlet(field: &mut Field, inlet_velocity: f32, profile: InletProfile) {
    let height = field.height;
    for y in 0..height {
        let idx = field.idx(0, y);
        let ux = inlet_velocity * profile.factor(y, height);
        field.next[idx] = equilibrium(1.0, ux, 0.0);
    }
}

/// Zero-gradient outlet: the last column copies its upstream neighbour.
pub fn apply_outlet(field: &mut Field) {
    let x = field.width - 1;
    for y in 0..field.height {
        let idx = field.idx(x, y);
        field.next[idx] = field.next[idx - 1];
    }
}

/// Shifts the velocity of the wake column by the current perturbation offset.
/// The shift goes through the equilibrium difference, so density is unchanged.
pub fn apply_wake_perturbation(
    field: &mut Field,
    obstacle: &Obstacle,
    perturbation: &Perturbation,
    inlet_velocity: f32,
    step: u64,
) {
    if !perturbation.enabled {
        return;
    }

    let x = obstacle.wake_column(2.0);
    if x == 0 || x >= field.width - 1 {
        return;
    }

    let delta = perturbation.offset(inlet_velocity, step);
    let y_min = (obstacle.center.y - obstacle.radius).floor().max(0.0) as usize;
    let y_max = ((obstacle.center.y + obstacle.radius).ceil() as usize).min(field.height - 1);

    for y in y_min..=y_max {
        let idx = field.idx(x, y);
        if field.obstacle[idx] {
            continue;
        }
        let f = &mut field.next[idx];
        let (rho, ux, uy) = density_velocity(f);
        let before = equilibrium(rho, ux, uy);
        let after = equilibrium(rho, ux, uy + delta);
        for k in 0..Q {
            f[k] += after[k] - before[k];
        }
    }
}
