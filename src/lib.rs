//! A CPU software renderer for flat-shaded convex polygons.
//!
//! Every frame walks a static scene of placed polygon templates through
//! back-face culling, Sutherland-Hodgman clipping against the four side planes
//! of the view frustum, a painter's-algorithm object sort, perspective
//! projection and 16.16 fixed-point scanline filling into an 8-bit
//! palette-indexed frame buffer. SDL2 is used only to show the result.
//!
//! # Quick Start
//!
//! ```ignore
//! use russclip::prelude::*;
//!
//! let mut engine = Engine::new(RenderConfig::default(), Scene::demo())?;
//! let mut window = Window::new("demo", 320, 240)?;
//! let input = window.poll_events();
//! engine.run_frame(&input.controls, &mut window)?;
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod clipper;
pub mod config;
pub mod culling;
pub mod engine;
pub mod geometry;
pub mod math;
pub mod palette;
pub mod projection;
pub mod render;
pub mod scene;
pub mod snapshot;
pub mod sorting;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::{Camera, Control};
pub use config::{ConfigError, RenderConfig};
pub use engine::{Engine, FrameContext, FrameStats, Presenter};
pub use geometry::{Plane, Polygon, ScreenPolygon};
pub use projection::Projection;
pub use render::FrameBuffer;
pub use scene::{Scene, SceneObject, TemplateId};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use russclip::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, Control};

    // Engine
    pub use crate::config::{ConfigError, RenderConfig};
    pub use crate::engine::{Engine, FrameStats, Presenter};

    // Scene
    pub use crate::geometry::Polygon;
    pub use crate::scene::{PolygonTemplate, Scene, TemplateId};

    // Math
    pub use crate::math::{Vec2, Vec3};

    // Projection
    pub use crate::projection::Projection;

    // Rendering
    pub use crate::palette::Palette;
    pub use crate::render::FrameBuffer;

    // Window & Input
    pub use crate::window::{FrameInput, FrameLimiter, Window, FRAME_TARGET_TIME};
}
