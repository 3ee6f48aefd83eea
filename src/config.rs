//! Render configuration and setup-time validation.
//!
//! Every capacity the pipeline relies on (polygon arity, framebuffer height)
//! is checked here, once, before any frame is drawn.

use thiserror::Error;

use crate::geometry::{MAX_TEMPLATE_VERTS, MIN_POLY_VERTS};

pub const DEFAULT_WIDTH: u32 = 320;
pub const DEFAULT_HEIGHT: u32 = 240;
pub const DEFAULT_FIELD_OF_VIEW: f64 = 2.0;

/// Smallest framebuffer edge accepted on setup or resize.
pub const MIN_SCREEN_SIZE: u32 = 10;

/// Tallest framebuffer the rasterizer's span buffer is sized for.
pub const MAX_SCREEN_HEIGHT: u32 = 2048;

/// Errors raised while validating configuration or scene data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("framebuffer {width}x{height} is smaller than {min}x{min}", min = MIN_SCREEN_SIZE)]
    FramebufferTooSmall { width: u32, height: u32 },

    #[error("framebuffer height {height} exceeds the supported maximum of {max}")]
    FramebufferTooTall { height: u32, max: u32 },

    #[error("field of view scale must be finite and positive, got {0}")]
    InvalidFieldOfView(f64),

    #[error(
        "polygon {polygon} of template {template} has {vertices} vertices; expected {min}..={max}",
        min = MIN_POLY_VERTS,
        max = MAX_TEMPLATE_VERTS
    )]
    PolygonArity {
        template: usize,
        polygon: usize,
        vertices: usize,
    },

    #[error("object {object} refers to missing template {template}")]
    UnknownTemplate { object: usize, template: usize },
}

/// Startup settings for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Field-of-view scale; smaller values zoom in.
    pub field_of_view: f64,
    /// Palette index the framebuffer is cleared to each frame.
    pub background: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            field_of_view: DEFAULT_FIELD_OF_VIEW,
            background: 0,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimensions(self.width, self.height)?;
        if !self.field_of_view.is_finite() || self.field_of_view <= 0.0 {
            return Err(ConfigError::InvalidFieldOfView(self.field_of_view));
        }
        Ok(())
    }
}

/// Checks a framebuffer size against the rasterizer's capacity.
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), ConfigError> {
    if width < MIN_SCREEN_SIZE || height < MIN_SCREEN_SIZE {
        return Err(ConfigError::FramebufferTooSmall { width, height });
    }
    if height > MAX_SCREEN_HEIGHT {
        return Err(ConfigError::FramebufferTooTall {
            height,
            max: MAX_SCREEN_HEIGHT,
        });
    }
    Ok(())
}
