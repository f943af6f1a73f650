use std::f32::consts::TAU;

use crate::geometry::{Point2F, Vector2F};

const QUARTER_TURN: f32 = TAU / 4.0;

/// Viewer in world space.
///
/// `angle` is radians and is never wrapped; it grows without bound as the
/// player keeps turning, which the trig functions tolerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point2F,
    pub angle: f32,
    /// Half-width of the projection plane at unit distance.
    pub plane_length: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point2F::default(),
            angle: 0.0,
            plane_length: 1.0,
        }
    }
}

/// World-to-camera rotation with the sine and cosine cached.
///
/// Camera-space X is depth along the facing axis, Y is lateral offset.
#[derive(Debug, Clone, Copy)]
pub struct CameraTransform {
    origin: Point2F,
    cosine: f32,
    sine: f32,
}

impl CameraTransform {
    #[inline]
    pub fn apply(&self, p: Point2F) -> Point2F {
        let offset = p - self.origin;
        Point2F::new(
            offset.x * self.cosine - offset.y * self.sine,
            offset.x * self.sine + offset.y * self.cosine,
        )
    }
}

impl Camera {
    pub fn new(position: Point2F, angle: f32) -> Self {
        Self {
            position,
            angle,
            ..Self::default()
        }
    }

    #[inline]
    pub fn transform(&self) -> CameraTransform {
        CameraTransform {
            origin: self.position,
            cosine: (-self.angle).cos(),
            sine: (-self.angle).sin(),
        }
    }

    /// Translate, then rotate by `-angle`. Returns `(depth, lateral)`.
    #[inline]
    pub fn world_to_camera(&self, p: Point2F) -> Point2F {
        self.transform().apply(p)
    }

    #[inline]
    pub fn direction(&self) -> Vector2F {
        Vector2F::from_angle(self.angle)
    }

    #[inline]
    pub fn plane(&self) -> Vector2F {
        self.direction().perpendicular() * self.plane_length
    }

    /// Inverse of the `[plane | direction]` basis determinant, or `None`
    /// when the basis is degenerate (zero-length plane).
    pub fn inverse_determinant(&self) -> Option<f32> {
        let direction = self.direction();
        let plane = self.plane();
        let det = plane.x * direction.y - direction.x * plane.y;
        if det.abs() <= f32::EPSILON {
            return None;
        }
        Some(1.0 / det)
    }

    pub fn set_fov(&mut self, fov_deg: f32) {
        self.plane_length = (0.5 * fov_deg.to_radians()).tan();
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.direction() * distance;
    }

    /// Positive distance strafes towards `angle + quarter turn`.
    pub fn strafe(&mut self, distance: f32) {
        self.position += Vector2F::from_angle(self.angle + QUARTER_TURN) * distance;
    }

    pub fn turn(&mut self, radians: f32) {
        self.angle += radians;
    }
}
