//! Runtime render configuration.
//!
//! Loaded by the host from an optional JSON file; every field has a
//! default so partial files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::maths::DEPTH_EPSILON;

/// How sampled sprite texels reach the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TransparencyMode {
    /// Every texel is drawn in its own colour.
    #[default]
    Opaque,
    /// Unset texels are skipped; set texels draw white.
    ColourKey,
    /// Texels below 2 are drawn in their own colour.
    TwoLevel,
}

impl TransparencyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransparencyMode::Opaque => "Opaque",
            TransparencyMode::ColourKey => "ColourKey",
            TransparencyMode::TwoLevel => "TwoLevel",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TransparencyMode::Opaque => TransparencyMode::ColourKey,
            TransparencyMode::ColourKey => TransparencyMode::TwoLevel,
            TransparencyMode::TwoLevel => TransparencyMode::Opaque,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewMode {
    #[default]
    Perspective,
    Overhead,
    Both,
}

impl ViewMode {
    pub fn next(self) -> Self {
        match self {
            ViewMode::Perspective => ViewMode::Overhead,
            ViewMode::Overhead => ViewMode::Both,
            ViewMode::Both => ViewMode::Perspective,
        }
    }

    pub fn perspective(&self) -> bool {
        matches!(self, ViewMode::Perspective | ViewMode::Both)
    }

    pub fn overhead(&self) -> bool {
        matches!(self, ViewMode::Overhead | ViewMode::Both)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub transparency: TransparencyMode,
    pub view: ViewMode,
    /// Floor for every perspective divisor.
    pub depth_epsilon: f32,
    /// Print each wall's start vertex above its slab.
    pub label_vertices: bool,
    /// Mark each sprite's column on the ceiling and floor of its band.
    pub show_sprite_anchors: bool,
    /// Length of the heading tick in the overhead view.
    pub heading_length: f32,
    /// Draw sprites far-to-near.
    pub sort_sprites: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            transparency: TransparencyMode::default(),
            view: ViewMode::default(),
            depth_epsilon: DEPTH_EPSILON,
            label_vertices: false,
            show_sprite_anchors: false,
            heading_length: 4.0,
            sort_sprites: true,
        }
    }
}

impl RenderSettings {
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let mut settings: Self = serde_json::from_str(text)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// A non-positive or NaN epsilon would reintroduce division by zero.
    fn sanitize(&mut self) {
        if self.depth_epsilon.is_nan() || self.depth_epsilon <= 0.0 {
            log::warn!(
                "depth_epsilon {} is not positive, using {}",
                self.depth_epsilon,
                DEPTH_EPSILON
            );
            self.depth_epsilon = DEPTH_EPSILON;
        }
    }
}
