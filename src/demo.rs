//! Built-in level used by the desktop host.

use crate::camera::Camera;
use crate::error::DataError;
use crate::geometry::{Point2F, Vector2F};
use crate::sector::Sector;
use crate::sprite::Sprite;
use crate::texture::Texture;

#[rustfmt::skip]
pub const ROOM: [u8; 13] = [
    6,
    2, 2,
    30, 2,
    30, 12,
    40, 12,
    40, 30,
    2, 30,
];

#[rustfmt::skip]
pub const PILLAR: [u8; 9] = [
    4,
    14, 14,
    14, 17,
    17, 17,
    17, 14,
];

#[rustfmt::skip]
pub const IMP: [u8; 10] = [
    8, 8,
    0x3C, 0x42, 0x95, 0xA1, 0xA1, 0x95, 0x42, 0x3C,
];

#[rustfmt::skip]
pub const BARREL: [u8; 18] = [
    8, 16,
    0xFF, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0xFF,
    0xFF, 0x88, 0x88, 0x88, 0x88, 0x88, 0x88, 0xFF,
];

pub const IMP_TEXTURE: usize = 0;
pub const BARREL_TEXTURE: usize = 1;

pub fn sectors() -> Result<[Sector<'static>; 2], DataError> {
    Ok([Sector::from_bytes(&ROOM)?, Sector::from_bytes(&PILLAR)?])
}

pub fn textures() -> Result<[Texture<'static>; 2], DataError> {
    Ok([Texture::from_bytes(&IMP)?, Texture::from_bytes(&BARREL)?])
}

pub fn sprites() -> [Sprite; 3] {
    let mut imp = Sprite::new(Point2F::new(24.0, 8.0), IMP_TEXTURE);
    imp.velocity = Vector2F::new(0.0, 1.5);

    let mut barrel = Sprite::new(Point2F::new(30.0, 24.0), BARREL_TEXTURE);
    barrel.y_scale = 0.6;
    barrel.x_scale = 0.4;
    barrel.vertical_offset = 0.4;

    let mut far_barrel = barrel;
    far_barrel.position = Point2F::new(8.0, 26.0);

    [imp, barrel, far_barrel]
}

pub fn camera() -> Camera {
    Camera::new(Point2F::new(5.0, 15.0), 0.0)
}

/// Keeps moving sprites inside the room by reversing them at its bounds.
pub fn step_sprites(sprites: &mut [Sprite], dt: f32) {
    for sprite in sprites {
        sprite.advance(dt);
        if !(4.0..=26.0).contains(&sprite.position.y) {
            sprite.velocity = -sprite.velocity;
            sprite.position.y = sprite.position.y.clamp(4.0, 26.0);
        }
    }
}
