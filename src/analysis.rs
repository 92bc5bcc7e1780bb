use crate::view::FluidData;

/// Scalars for on-screen overlays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    /// Largest speed over fluid cells.
    pub max_speed: f32,
    /// Reynolds number implied by the clamped relaxation time.
    pub effective_reynolds: f32,
    pub tau: f32,
    pub step: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowMetrics {
    pub total_mass: f64,
    pub min_density: f32,
    pub max_density: f32,
    pub avg_density: f32,
    pub max_speed: f32,
    pub avg_speed: f32,
    pub kinetic_energy: f64,
    /// Mean |curl u| over interior fluid cells.
    pub vorticity: f32,
    pub step: u64,
}

impl FlowMetrics {
    /// Aggregates over fluid cells only; solid cells carry no flow.
    pub fn analyze(flow: &impl FluidData, step: u64) -> Self {
        let (width, height) = (flow.width(), flow.height());
        let density = flow.density();
        let vx = flow.velocity_x();
        let vy = flow.velocity_y();
        let solid = flow.obstacle();

        let mut total_mass = 0.0f64;
        let mut min_density = f32::INFINITY;
        let mut max_density = f32::NEG_INFINITY;
        let mut max_speed = 0.0f32;
        let mut speed_sum = 0.0f64;
        let mut kinetic_energy = 0.0f64;
        let mut fluid_cells = 0usize;

        for idx in 0..width * height {
            if solid[idx] {
                continue;
            }
            let rho = density[idx];
            let speed_sq = vx[idx] * vx[idx] + vy[idx] * vy[idx];
            let speed = speed_sq.sqrt();

            total_mass += rho as f64;
            min_density = min_density.min(rho);
            max_density = max_density.max(rho);
            max_speed = max_speed.max(speed);
            speed_sum += speed as f64;
            kinetic_energy += 0.5 * rho as f64 * speed_sq as f64;
            fluid_cells += 1;
        }

        // Central differences, y wraps like the lattice does.
        let mut vorticity_sum = 0.0f64;
        let mut vorticity_cells = 0usize;
        for y in 0..height {
            let up = (y + 1) % height;
            let down = (y + height - 1) % height;
            for x in 1..width.saturating_sub(1) {
                let idx = y * width + x;
                if solid[idx] {
                    continue;
                }
                let dvy_dx = (vy[idx + 1] - vy[idx - 1]) * 0.5;
                let dvx_dy = (vx[up * width + x] - vx[down * width + x]) * 0.5;
                vorticity_sum += (dvy_dx - dvx_dy).abs() as f64;
                vorticity_cells += 1;
            }
        }

        let cells = fluid_cells.max(1) as f64;
        Self {
            total_mass,
            min_density: if fluid_cells > 0 { min_density } else { 0.0 },
            max_density: if fluid_cells > 0 { max_density } else { 0.0 },
            avg_density: (total_mass / cells) as f32,
            max_speed,
            avg_speed: (speed_sum / cells) as f32,
            kinetic_energy,
            vorticity: (vorticity_sum / vorticity_cells.max(1) as f64) as f32,
            step,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.total_mass.is_finite()
            && self.kinetic_energy.is_finite()
            && self.max_speed.is_finite()
            && self.min_density.is_finite()
    }

    pub fn log_summary(&self) {
        log::info!(
            "step {}: mass {:.3}, density [{:.4}, {:.4}], speed max {:.5} avg {:.5}, KE {:.4}, vorticity {:.6}",
            self.step,
            self.total_mass,
            self.min_density,
            self.max_density,
            self.max_speed,
            self.avg_speed,
            self.kinetic_energy,
            self.vorticity
        );
    }
}

#[derive(Debug, Default)]
pub struct AnalysisRecorder {
    pub metrics_history: Vec<FlowMetrics>,
}

impl AnalysisRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzes `flow`, appends the result and hands back a copy.
    pub fn record(&mut self, flow: &impl FluidData, step: u64) -> FlowMetrics {
        let metrics = FlowMetrics::analyze(flow, step);
        self.metrics_history.push(metrics);
        metrics
    }

    /// Relative change of total fluid mass between the first and last record.
    pub fn mass_drift(&self) -> Option<f64> {
        let first = self.metrics_history.first()?;
        let last = self.metrics_history.last()?;
        Some((last.total_mass - first.total_mass) / first.total_mass)
    }

    pub fn log_trends(&self) {
        let (Some(first), Some(last)) = (self.metrics_history.first(), self.metrics_history.last()) else {
            return;
        };
        if self.metrics_history.len() < 2 {
            return;
        }

        log::info!(
            "mass {:.3} -> {:.3} ({:+.3}%)",
            first.total_mass,
            last.total_mass,
            self.mass_drift().unwrap_or(0.0) * 100.0
        );
        log::info!(
            "kinetic energy {:.4} -> {:.4}, max speed {:.5} -> {:.5}, vorticity {:.6} -> {:.6}",
            first.kinetic_energy,
            last.kinetic_energy,
            first.max_speed,
            last.max_speed,
            first.vorticity,
            last.vorticity
        );
    }
}
