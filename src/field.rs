use crate::equilibrium::equilibrium;
use crate::geometry::Obstacle;
use crate::lattice::{Populations, Q};

/// Per-cell simulation state.
///
/// Populations live in two generations. Streaming reads `current` and writes
/// `next`; [`Field::swap_generations`] then exchanges their roles.
#[derive(Debug, Clone)]
pub struct Field {
    pub width: usize,
    pub height: usize,
    pub current: Vec<Populations>,
    pub next: Vec<Populations>,
    pub density: Vec<f32>,
    pub velocity_x: Vec<f32>,
    pub velocity_y: Vec<f32>,
    pub obstacle: Vec<bool>,
}

impl Field {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            current: vec![[0.0; Q]; size],
            next: vec![[0.0; Q]; size],
            density: vec![1.0; size],
            velocity_x: vec![0.0; size],
            velocity_y: vec![0.0; size],
            obstacle: vec![false; size],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_solid(&self, x: usize, y: usize) -> bool {
        self.obstacle[self.idx(x, y)]
    }

    /// Marks every cell inside `obstacle` as solid.
    pub fn carve_obstacle(&mut self, obstacle: &Obstacle) {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.idx(x, y);
                self.obstacle[idx] = obstacle.contains(x, y);
            }
        }
    }

    /// Seeds fluid cells at equilibrium with `(rho, ux, uy)` and solid cells at rest.
    pub fn seed_equilibrium(&mut self, rho: f32, ux: f32, uy: f32) {
        let moving = equilibrium(rho, ux, uy);
        let rest = equilibrium(1.0, 0.0, 0.0);
        for idx in 0..self.len() {
            if self.obstacle[idx] {
                self.current[idx] = rest;
                self.density[idx] = 1.0;
                self.velocity_x[idx] = 0.0;
                self.velocity_y[idx] = 0.0;
            } else {
                self.current[idx] = moving;
                self.density[idx] = rho;
                self.velocity_x[idx] = ux;
                self.velocity_y[idx] = uy;
            }
        }
        self.next.fill([0.0; Q]);
    }

    pub fn swap_generations(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Sum of all populations on fluid cells of the current generation.
    pub fn fluid_mass(&self) -> f64 {
        self.current
            .iter()
            .zip(&self.obstacle)
            .filter(|(_, solid)| !**solid)
            .map(|(f, _)| f.iter().map(|&v| v as f64).sum::<f64>())
            .sum()
    }
}
