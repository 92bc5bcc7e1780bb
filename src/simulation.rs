use crate::analysis::Diagnostics;
use crate::boundary::{apply_inlet, apply_outlet, apply_wake_perturbation};
use crate::collision::collide;
use crate::config::SimConfig;
use crate::error::Result;
use crate::field::Field;
use crate::geometry::Obstacle;
use crate::macroscopic::reconstruct;
use crate::params::FlowParams;
use crate::streaming::stream;
use crate::view::{FluidData, MacroscopicView};

/// Flow past a circular obstacle in a channel with a velocity inlet on the
/// left, a zero-gradient outlet on the right and periodic top/bottom edges.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    params: FlowParams,
    obstacle: Obstacle,
    field: Field,
    steps: u64,
}

impl Simulation {
    /// Validates `config`, carves the obstacle and seeds every fluid cell at
    /// equilibrium with the inlet velocity.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let params = FlowParams::derive(&config)?;
        let obstacle = Obstacle::new(config.center(), config.obstacle_radius);

        let mut field = Field::new(config.grid_width, config.grid_height);
        field.carve_obstacle(&obstacle);
        field.seed_equilibrium(1.0, config.inlet_velocity, 0.0);

        log::info!(
            "initialized {}x{} grid, obstacle r={} at ({}, {}), tau={:.4} (Re_eff={:.1})",
            config.grid_width,
            config.grid_height,
            obstacle.radius,
            obstacle.center.x,
            obstacle.center.y,
            params.tau,
            params.effective_reynolds()
        );

        Ok(Self {
            config,
            params,
            obstacle,
            field,
            steps: 0,
        })
    }

    /// Advances one sub-step: reconstruct, collide, stream with bounce-back,
    /// inlet, outlet, then swap generations.
    pub fn step(&mut self) {
        reconstruct(&mut self.field);
        collide(&mut self.field, self.params.tau);
        stream(&mut self.field, self.config.edge_policy, self.config.bounce_back);
        apply_inlet(&mut self.field, self.params.inlet_velocity, self.config.inlet_profile);
        apply_outlet(&mut self.field);
        apply_wake_perturbation(
            &mut self.field,
            &self.obstacle,
            &self.config.perturbation,
            self.params.inlet_velocity,
            self.steps,
        );
        self.field.swap_generations();
        self.steps += 1;
    }

    /// Runs `substeps_per_frame` steps and brings the macroscopic fields up
    /// to date with the resulting populations.
    pub fn frame(&mut self) {
        for _ in 0..self.config.substeps_per_frame {
            self.step();
        }
        reconstruct(&mut self.field);
        log::debug!(
            "step {}: max speed {:.5}",
            self.steps,
            self.field.max_speed()
        );
    }

    pub fn macroscopic_view(&self) -> MacroscopicView<'_> {
        MacroscopicView::new(&self.field)
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            max_speed: self.field.max_speed(),
            effective_reynolds: self.params.effective_reynolds(),
            tau: self.params.tau,
            step: self.steps,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn params(&self) -> &FlowParams {
        &self.params
    }

    pub fn obstacle(&self) -> &Obstacle {
        &self.obstacle
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}
