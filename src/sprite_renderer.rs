//! Camera-facing billboards composited over the wall pass.
//!
//! Each sprite goes through the inverse of the camera's `[plane | direction]`
//! basis, giving a lateral `transform_x` and a depth `transform_y`. Size and
//! screen position scale with `1 / transform_y`. Vertically the sprite is
//! held inside the band a wall at the same depth would occupy.
//!
//! Per-column occlusion against nearer walls is not computed here. The
//! [`ColumnOcclusion`] hook lets a caller that tracks wall depths per column
//! veto columns; the default never does.

use crate::camera::Camera;
use crate::display::{Colour, Display};
use crate::maths::map;
use crate::settings::{RenderSettings, TransparencyMode};
use crate::sprite::{Sprite, SpriteRenderInfo};
use crate::texture::Texture;

/// Per-column visibility veto for sprites.
pub trait ColumnOcclusion {
    /// `true` when something nearer than `depth` covers screen `column`.
    fn is_occluded(&self, column: u8, depth: f32) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOcclusion;

impl ColumnOcclusion for NoOcclusion {
    #[inline]
    fn is_occluded(&self, _column: u8, _depth: f32) -> bool {
        false
    }
}

/// Screen placement of one sprite.
///
/// `x_start..x_end` and `y_start..y_end` are the unclamped extents the
/// texture is stretched across; the `visible_*` bounds are what gets drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteProjection {
    pub depth: f32,
    pub x_midpoint: i32,
    pub x_start: i32,
    pub x_end: i32,
    pub y_start: i32,
    pub y_end: i32,
    pub ceiling_y: i32,
    pub floor_y: i32,
    /// Inclusive.
    pub visible_x: (i32, i32),
    /// End exclusive.
    pub visible_y: (i32, i32),
}

#[inline]
fn to_i32(v: f32) -> i32 {
    v as i32
}

/// Places `sprite` on a `width` x `height` screen, or `None` when it is
/// behind the camera, closer than `epsilon`, or entirely off-screen.
pub fn project_sprite(
    camera: &Camera,
    inverse_determinant: f32,
    sprite: &Sprite,
    width: u8,
    height: u8,
    epsilon: f32,
) -> Option<SpriteProjection> {
    let direction = camera.direction();
    let plane = camera.plane();
    let offset = sprite.position - camera.position;

    let transform_x = inverse_determinant * (direction.y * offset.x - direction.x * offset.y);
    let transform_y = inverse_determinant * (-plane.y * offset.x + plane.x * offset.y);

    if transform_y.is_nan() || transform_y < epsilon {
        return None;
    }

    let (w, h) = (i32::from(width), i32::from(height));
    let scale_factor = f32::from(height) / transform_y;
    let sprite_width = to_i32((scale_factor * sprite.x_scale).max(0.0));
    let sprite_height = to_i32((scale_factor * sprite.y_scale).max(0.0));

    let half_width = w / 2;
    let half_sprite_width = sprite_width / 2;
    let x_midpoint = to_i32(half_width as f32 * (1.0 + transform_x / transform_y));
    let x_start = x_midpoint.saturating_sub(half_sprite_width);
    let x_end = x_midpoint.saturating_add(half_sprite_width);

    if x_end <= 0 || x_start >= w {
        return None;
    }

    let half_height = h / 2;
    let half_sprite_height = sprite_height / 2;
    let vertical_offset = to_i32(sprite.vertical_offset * half_height as f32 / transform_y);

    let band = to_i32(half_height as f32 / transform_y);
    let ceiling_y = half_height.saturating_sub(band);
    let floor_y = half_height.saturating_add(band);

    let y_midpoint = half_height.saturating_add(vertical_offset);
    let y_start = y_midpoint.saturating_sub(half_sprite_height);
    let y_end = y_midpoint.saturating_add(half_sprite_height);

    if y_end <= 0 || y_start >= h {
        return None;
    }

    Some(SpriteProjection {
        depth: transform_y,
        x_midpoint,
        x_start,
        x_end,
        y_start,
        y_end,
        ceiling_y,
        floor_y,
        visible_x: (x_start.max(0), (x_end - 1).min(w - 1)),
        visible_y: (y_start.max(ceiling_y).max(0), y_end.min(floor_y).min(h)),
    })
}

/// Screen coordinate to texel index across `[start, end] -> [0, size)`.
#[inline]
pub fn texel_coordinate(screen: i32, start: i32, end: i32, size: u8) -> u8 {
    let t = map(screen as f32, start as f32, end as f32, 0.0, f32::from(size));
    (t.max(0.0) as u32).min(u32::from(size.saturating_sub(1))) as u8
}

pub struct SpriteRenderer<'s, O = NoOcclusion> {
    settings: &'s RenderSettings,
    occlusion: O,
}

impl<'s> SpriteRenderer<'s> {
    pub fn new(settings: &'s RenderSettings) -> Self {
        Self {
            settings,
            occlusion: NoOcclusion,
        }
    }
}

impl<'s, O: ColumnOcclusion> SpriteRenderer<'s, O> {
    pub fn with_occlusion<P: ColumnOcclusion>(self, occlusion: P) -> SpriteRenderer<'s, P> {
        SpriteRenderer {
            settings: self.settings,
            occlusion,
        }
    }

    /// Draws `sprites` in slice order.
    pub fn render<D: Display + ?Sized>(
        &self,
        display: &mut D,
        camera: &Camera,
        sprites: &[Sprite],
        textures: &[Texture<'_>],
    ) {
        let Some(inverse_determinant) = camera.inverse_determinant() else {
            log::trace!("degenerate camera basis, no sprites drawn");
            return;
        };
        for sprite in sprites {
            self.draw_sprite(display, camera, inverse_determinant, sprite, textures);
        }
    }

    /// Draws `sprites` far-to-near so nearer ones overwrite farther ones.
    /// The ordering lives in a stack array the size of the sprite array.
    pub fn render_sorted<D: Display + ?Sized, const N: usize>(
        &self,
        display: &mut D,
        camera: &Camera,
        sprites: &[Sprite; N],
        textures: &[Texture<'_>],
    ) {
        let Some(inverse_determinant) = camera.inverse_determinant() else {
            log::trace!("degenerate camera basis, no sprites drawn");
            return;
        };

        let mut order = [SpriteRenderInfo::default(); N];
        for (index, (info, sprite)) in order.iter_mut().zip(sprites).enumerate() {
            *info = SpriteRenderInfo {
                index,
                distance: (sprite.position - camera.position).magnitude_squared(),
            };
        }
        order.sort_unstable_by(|a, b| b.distance.total_cmp(&a.distance));

        for info in &order {
            let sprite = &sprites[info.index];
            self.draw_sprite(display, camera, inverse_determinant, sprite, textures);
        }
    }

    fn draw_sprite<D: Display + ?Sized>(
        &self,
        display: &mut D,
        camera: &Camera,
        inverse_determinant: f32,
        sprite: &Sprite,
        textures: &[Texture<'_>],
    ) {
        let Some(texture) = textures.get(sprite.texture_index) else {
            log::trace!(
                "sprite texture index {} out of range ({} textures)",
                sprite.texture_index,
                textures.len()
            );
            return;
        };

        let (width, height) = (display.width(), display.height());
        let Some(p) = project_sprite(
            camera,
            inverse_determinant,
            sprite,
            width,
            height,
            self.settings.depth_epsilon,
        ) else {
            return;
        };

        let (texture_width, texture_height) = (texture.width(), texture.height());
        let mode = self.settings.transparency;

        for x in p.visible_x.0..=p.visible_x.1 {
            // visible columns are clamped to [0, width - 1]
            if self.occlusion.is_occluded(x as u8, p.depth) {
                continue;
            }
            let texture_x = texel_coordinate(x, p.x_start, p.x_end, texture_width);

            for y in p.visible_y.0..p.visible_y.1 {
                let texture_y = texel_coordinate(y, p.y_start, p.y_end, texture_height);
                let colour = texture.pixel(texture_x, texture_y);
                let (sx, sy) = (x as i16, y as i16);

                match mode {
                    TransparencyMode::Opaque => display.draw_pixel(sx, sy, Colour::from(colour)),
                    TransparencyMode::ColourKey => {
                        if colour != 0 {
                            display.draw_pixel(sx, sy, Colour::White);
                        }
                    }
                    TransparencyMode::TwoLevel => {
                        if colour < 2 {
                            display.draw_pixel(sx, sy, Colour::from(colour));
                        }
                    }
                }
            }
        }

        if self.settings.show_sprite_anchors {
            let column = p.x_midpoint as i16;
            display.draw_pixel(column, p.ceiling_y.max(0) as i16, Colour::White);
            display.draw_pixel(
                column,
                p.floor_y.min(i32::from(height) - 1) as i16,
                Colour::White,
            );
        }
    }
}
