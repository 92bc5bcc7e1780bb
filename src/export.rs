use std::path::Path;

use crate::error::Result;
use crate::render::Renderer;
use crate::simulation::Simulation;
use crate::view::FluidData;

/// Deviation from rest density mapped to full color in density images.
const DENSITY_RANGE: f32 = 0.05;

pub struct ImageExporter {
    renderer: Renderer,
}

impl ImageExporter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
        }
    }

    pub fn export_speed_png(&self, flow: &impl FluidData, path: &Path) -> Result<()> {
        let img = self.renderer.render_speed(flow);
        img.save(path)?;
        Ok(())
    }

    pub fn export_density_png(&self, flow: &impl FluidData, path: &Path) -> Result<()> {
        let img = self.renderer.render_density(flow, DENSITY_RANGE);
        img.save(path)?;
        Ok(())
    }

    /// Runs `frames` frames and writes `<prefix>_frame_NNNN.png` after each one.
    pub fn export_frame_sequence(
        &self,
        simulation: &mut Simulation,
        frames: usize,
        output_dir: &Path,
        prefix: &str,
    ) -> Result<()> {
        std::fs::create_dir_all(output_dir)?;
        for i in 0..frames {
            simulation.frame();

            let filename = format!("{}_frame_{:04}.png", prefix, i);
            let path = output_dir.join(filename);

            self.export_speed_png(&simulation.macroscopic_view(), &path)?;
        }
        Ok(())
    }
}
