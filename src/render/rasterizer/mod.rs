//! Polygon rasterization.
//!
//! Available algorithms:
//! - [`ScanlineRasterizer`]: left/right edge walk with 16.16 fixed-point
//!   stepping, filling one horizontal span per scanline

mod scanline;

pub use scanline::ScanlineRasterizer;

use super::framebuffer::FrameBuffer;
use crate::geometry::ScreenPolygon;

/// Left and right boundary of a polygon on one scanline.
///
/// Pixels `left..right` are covered; a span with `right <= left` is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub left: i64,
    pub right: i64,
}

impl Span {
    pub fn width(&self) -> i64 {
        self.right - self.left
    }
}

/// Trait for polygon rasterization algorithms.
///
/// Implementors fill a convex screen-space polygon with its solid palette
/// index. Polygons that cover no scanline are skipped without error.
pub trait Rasterizer {
    /// Fill a polygon into the frame buffer.
    ///
    /// # Arguments
    /// * `polygon` - Convex polygon in screen coordinates, wound clockwise
    /// * `buffer` - The frame buffer to draw into
    fn fill_polygon(&mut self, polygon: &ScreenPolygon, buffer: &mut FrameBuffer);
}
