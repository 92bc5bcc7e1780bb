use crate::field::Field;

/// Read access to a macroscopic flow field, for renderers and metrics.
pub trait FluidData {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn density(&self) -> &[f32];
    fn velocity_x(&self) -> &[f32];
    fn velocity_y(&self) -> &[f32];
    fn obstacle(&self) -> &[bool];

    fn speed(&self, x: usize, y: usize) -> f32 {
        let idx = y * self.width() + x;
        let (ux, uy) = (self.velocity_x()[idx], self.velocity_y()[idx]);
        (ux * ux + uy * uy).sqrt()
    }

    /// Largest speed over fluid cells.
    fn max_speed(&self) -> f32 {
        self.velocity_x()
            .iter()
            .zip(self.velocity_y())
            .zip(self.obstacle())
            .filter(|(_, solid)| !**solid)
            .map(|((ux, uy), _)| (ux * ux + uy * uy).sqrt())
            .fold(0.0, f32::max)
    }
}

/// Borrowed snapshot of density, velocity and the obstacle mask.
#[derive(Debug, Clone, Copy)]
pub struct MacroscopicView<'a> {
    pub width: usize,
    pub height: usize,
    pub density: &'a [f32],
    pub velocity_x: &'a [f32],
    pub velocity_y: &'a [f32],
    pub obstacle: &'a [bool],
}

impl<'a> MacroscopicView<'a> {
    pub fn new(field: &'a Field) -> Self {
        Self {
            width: field.width,
            height: field.height,
            density: &field.density,
            velocity_x: &field.velocity_x,
            velocity_y: &field.velocity_y,
            obstacle: &field.obstacle,
        }
    }

    pub fn is_solid(&self, x: usize, y: usize) -> bool {
        self.obstacle[y * self.width + x]
    }
}

impl FluidData for MacroscopicView<'_> {
    fn width(&self) -> usize { self.width }
    fn height(&self) -> usize { self.height }
    fn density(&self) -> &[f32] { self.density }
    fn velocity_x(&self) -> &[f32] { self.velocity_x }
    fn velocity_y(&self) -> &[f32] { self.velocity_y }
    fn obstacle(&self) -> &[bool] { self.obstacle }
}

impl FluidData for Field {
    fn width(&self) -> usize { self.width }
    fn height(&self) -> usize { self.height }
    fn density(&self) -> &[f32] { &self.density }
    fn velocity_x(&self) -> &[f32] { &self.velocity_x }
    fn velocity_y(&self) -> &[f32] { &self.velocity_y }
    fn obstacle(&self) -> &[bool] { &self.obstacle }
}
