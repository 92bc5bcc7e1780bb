use glam::Vec2;

/// Circular solid region in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub center: Vec2,
    pub radius: f32,
}

impl Obstacle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        let d = Vec2::new(x as f32, y as f32) - self.center;
        d.length_squared() <= self.radius * self.radius
    }

    /// First column behind the obstacle surface, offset by `gap` cells.
    pub fn wake_column(&self, gap: f32) -> usize {
        (self.center.x + self.radius + gap).round().max(0.0) as usize
    }
}
