use crate::camera::Camera;
use crate::display::Display;
use crate::sector::Sector;
use crate::sector_renderer::{render_2d, render_3d};
use crate::settings::RenderSettings;
use crate::sprite::Sprite;
use crate::sprite_renderer::SpriteRenderer;
use crate::texture::Texture;

/// Everything one frame draws, borrowed for the duration of the call.
pub struct Scene<'a, const N: usize> {
    pub sectors: &'a [Sector<'a>],
    pub sprites: &'a [Sprite; N],
    pub textures: &'a [Texture<'a>],
}

/// Walls first, sprites over them, then the overhead outline when enabled.
/// The caller clears and presents the display.
pub fn render_frame<D: Display + ?Sized, const N: usize>(
    display: &mut D,
    camera: &Camera,
    scene: &Scene<'_, N>,
    settings: &RenderSettings,
) {
    if settings.view.perspective() {
        for sector in scene.sectors {
            render_3d(display, camera, sector, settings);
        }

        let sprites = SpriteRenderer::new(settings);
        if settings.sort_sprites {
            sprites.render_sorted(display, camera, scene.sprites, scene.textures);
        } else {
            sprites.render(display, camera, scene.sprites, scene.textures);
        }
    }

    if settings.view.overhead() {
        for sector in scene.sectors {
            render_2d(display, camera, sector, settings);
        }
    }
}
