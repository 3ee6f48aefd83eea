//! Rendering primitives: the indexed frame buffer and polygon rasterizers.

pub mod framebuffer;
pub mod rasterizer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{Rasterizer, ScanlineRasterizer, Span};
