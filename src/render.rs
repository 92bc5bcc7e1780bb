use image::{ImageBuffer, Rgb, RgbImage};

use crate::view::FluidData;

const OBSTACLE_COLOR: Rgb<u8> = Rgb([80, 80, 80]);

/// Maps a normalized speed to blue (slow) through yellow to red (fast).
pub fn speed_color(t: f32) -> Rgb<u8> {
    let t = (t * 2.0).clamp(0.0, 1.0);
    if t < 0.5 {
        let tt = t * 2.0;
        Rgb([(tt * 255.0) as u8, (tt * 128.0) as u8, (255.0 * (1.0 - tt * 0.5)) as u8])
    } else {
        let tt = (t - 0.5) * 2.0;
        Rgb([255, (255.0 * (1.0 - 0.8 * tt)) as u8, (64.0 * (1.0 - tt)) as u8])
    }
}

pub struct Renderer {
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn sample(&self, flow: &impl FluidData, x: u32, y: u32) -> usize {
        let sim_x = (x as usize * flow.width() / self.width as usize).min(flow.width() - 1);
        let sim_y = (y as usize * flow.height() / self.height as usize).min(flow.height() - 1);
        sim_y * flow.width() + sim_x
    }

    /// Speed field normalized by the frame's largest speed.
    pub fn render_speed(&self, flow: &impl FluidData) -> RgbImage {
        let scale = 1.0 / (flow.max_speed() + 1e-6);
        let mut img = ImageBuffer::new(self.width, self.height);

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let idx = self.sample(flow, x, y);
            *pixel = if flow.obstacle()[idx] {
                OBSTACLE_COLOR
            } else {
                let (ux, uy) = (flow.velocity_x()[idx], flow.velocity_y()[idx]);
                speed_color((ux * ux + uy * uy).sqrt() * scale)
            };
        }

        img
    }

    /// Density deviation from 1, gray at rest, red for compression, blue for rarefaction.
    pub fn render_density(&self, flow: &impl FluidData, range: f32) -> RgbImage {
        let mut img = ImageBuffer::new(self.width, self.height);

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let idx = self.sample(flow, x, y);
            *pixel = if flow.obstacle()[idx] {
                OBSTACLE_COLOR
            } else {
                let d = ((flow.density()[idx] - 1.0) / range).clamp(-1.0, 1.0);
                let base = 160.0;
                if d >= 0.0 {
                    Rgb([(base + 95.0 * d) as u8, (base * (1.0 - d)) as u8, (base * (1.0 - d)) as u8])
                } else {
                    Rgb([(base * (1.0 + d)) as u8, (base * (1.0 + d)) as u8, (base - 95.0 * d) as u8])
                }
            };
        }

        img
    }
}
