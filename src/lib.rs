//! Slabcaster - 2.5D sector and sprite projection for tiny 1bpp screens
//!
//! Core modules:
//! - `sector_renderer`: wall slabs in perspective, top-down outline
//! - `sprite_renderer`: billboarded, texture-sampled sprites
//! - `camera`: world-to-camera transform and movement
//! - `display`: the drawing capability renderers are generic over
//! - `sector` / `texture`: borrowed views over packed level data
//!
//! No renderer allocates or keeps state between frames.

pub mod camera;
pub mod demo;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod maths;
pub mod renderer;
pub mod scaler;
pub mod sector;
pub mod sector_renderer;
pub mod settings;
pub mod sprite;
pub mod sprite_renderer;
pub mod texture;

pub use camera::Camera;
pub use display::{Colour, Display};
pub use error::{DataError, SettingsError};
pub use framebuffer::FrameBuffer;
pub use renderer::{Scene, render_frame};
pub use sector::Sector;
pub use settings::{RenderSettings, TransparencyMode, ViewMode};
pub use sprite::Sprite;
pub use sprite_renderer::{ColumnOcclusion, NoOcclusion, SpriteRenderer};
pub use texture::Texture;
