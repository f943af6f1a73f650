use crate::geometry::{Point2F, Vector2F};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub position: Point2F,
    pub velocity: Vector2F,
    /// Index into the texture slice handed to the renderer.
    pub texture_index: usize,
    pub x_scale: f32,
    pub y_scale: f32,
    /// Shift from the horizon in half-screen units at unit depth; positive
    /// moves the sprite down.
    pub vertical_offset: f32,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            position: Point2F::default(),
            velocity: Vector2F::default(),
            texture_index: 0,
            x_scale: 1.0,
            y_scale: 1.0,
            vertical_offset: 0.0,
        }
    }
}

impl Sprite {
    pub fn new(position: Point2F, texture_index: usize) -> Self {
        Self {
            position,
            texture_index,
            ..Self::default()
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

/// Draw-order entry: which sprite, and its squared distance from the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpriteRenderInfo {
    pub index: usize,
    pub distance: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_integrates_velocity() {
        let mut s = Sprite::new(Point2F::new(1.0, 1.0), 0);
        s.velocity = Vector2F::new(2.0, -4.0);
        s.advance(0.5);
        assert_eq!(s.position, Point2F::new(2.0, -1.0));
    }
}
