//! Scanline rasterization of convex polygons.
//!
//! # Algorithm Overview
//!
//! The polygon is split at its topmost and bottommost vertices into two
//! vertex chains. Walking from the top vertex towards lower indices gives the
//! left edge; walking towards higher indices gives the right edge:
//!
//! ```text
//!              top
//!              /\
//!   left     /    \     right
//!   chain  /        \   chain
//!          \         |
//!            \       |
//!              \_____|
//!                    bottom
//! ```
//!
//! Each edge that crosses at least one scanline records its x position on
//! every row it covers. Once both chains are walked, every row holds a
//! [`Span`] and is filled from `left` (inclusive) to `right` (exclusive).
//!
//! # Scanline Coverage
//!
//! A row `y` belongs to an edge from `y0` to `y1` when
//! `ceil(y0) <= y < ceil(y1)`. The first covered row is reached by a prestep
//! of `ceil(y0) - y0` along the edge.
//!
//! # Fixed-Point Stepping
//!
//! Edge positions are stepped in 16.16 fixed point:
//!
//! ```text
//! x    = (x0 + slope * prestep) * 65536 + 0xFFFF
//! step = slope * 65536
//! ```
//!
//! and the span boundary on each row is `x >> 16`. Adding `0xFFFF` turns the
//! shift into a ceiling, so both sides of an edge shared by two polygons round
//! the same way and adjacent polygons neither overlap nor leave gaps.
//!
//! # References
//!
//! - Abrash, Michael, "Graphics Programming Black Book"

use super::{Rasterizer, Span};
use crate::config::MAX_SCREEN_HEIGHT;
use crate::geometry::ScreenPolygon;
use crate::math::Vec2;
use crate::render::framebuffer::FrameBuffer;

const FIXED_SHIFT: u32 = 16;
const FIXED_ONE: f64 = (1u32 << FIXED_SHIFT) as f64;
const FIXED_CEIL: i64 = (1 << FIXED_SHIFT) - 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Scanline polygon rasterizer.
///
/// Owns the span buffer, allocated once for the tallest supported
/// framebuffer and reused for every polygon.
pub struct ScanlineRasterizer {
    spans: Vec<Span>,
}

impl Default for ScanlineRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanlineRasterizer {
    /// Creates a new scanline rasterizer instance.
    pub fn new() -> Self {
        Self {
            spans: Vec::with_capacity(MAX_SCREEN_HEIGHT as usize),
        }
    }

    /// Spans recorded by the last fill, one per visible row starting at the
    /// polygon's first row on screen.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }
}

impl Rasterizer for ScanlineRasterizer {
    /// Fills a clockwise convex polygon.
    ///
    /// Rows and columns outside the buffer are dropped. A counter-clockwise
    /// polygon produces empty spans and draws nothing.
    fn fill_polygon(&mut self, polygon: &ScreenPolygon, buffer: &mut FrameBuffer) {
        self.spans.clear();

        let verts = polygon.vertices.as_slice();
        let Some((top, bottom)) = vertical_extent(verts) else {
            return;
        };

        let top_y = verts[top].y.ceil() as i64;
        let bottom_y = verts[bottom].y.ceil() as i64;
        if top_y == bottom_y {
            return;
        }

        let first_row = top_y.max(0);
        let end_row = bottom_y.min(i64::from(buffer.height()));
        if first_row >= end_row {
            return;
        }
        self.spans
            .resize((end_row - first_row) as usize, Span::default());

        let n = verts.len();

        let mut v = top;
        loop {
            let next = if v == 0 { n - 1 } else { v - 1 };
            scan_edge(&mut self.spans, first_row, verts[v], verts[next], Side::Left);
            v = next;
            if v == bottom {
                break;
            }
        }

        let mut v = top;
        loop {
            let next = (v + 1) % n;
            scan_edge(&mut self.spans, first_row, verts[v], verts[next], Side::Right);
            v = next;
            if v == bottom {
                break;
            }
        }

        let width = i64::from(buffer.width());
        for (row, span) in (first_row..).zip(&self.spans) {
            if span.width() > 0 {
                let left = span.left.clamp(0, width) as usize;
                let right = span.right.clamp(0, width) as usize;
                buffer.fill_span(row as usize, left, right, polygon.color);
            }
        }
    }
}

/// Indices of the first topmost and the first bottommost vertex.
fn vertical_extent(verts: &[Vec2]) -> Option<(usize, usize)> {
    let (first, rest) = verts.split_first()?;
    let (mut top, mut bottom) = (0, 0);
    let (mut top_y, mut bottom_y) = (first.y, first.y);

    for (i, v) in rest.iter().enumerate() {
        if v.y < top_y {
            top_y = v.y;
            top = i + 1;
        }
        if v.y > bottom_y {
            bottom_y = v.y;
            bottom = i + 1;
        }
    }
    Some((top, bottom))
}

/// Records one edge's x position on every row it covers.
///
/// `spans[0]` corresponds to row `first_row`; rows past the end of `spans`
/// are off screen and skipped.
fn scan_edge(spans: &mut [Span], first_row: i64, from: Vec2, to: Vec2, side: Side) {
    let span_top = from.y.ceil() as i64;
    let span_bottom = to.y.ceil() as i64;
    if span_top >= span_bottom {
        return;
    }

    let end_row = first_row.saturating_add(spans.len() as i64);
    let start = span_top.max(first_row);
    let end = span_bottom.min(end_row);
    if start >= end {
        return;
    }

    // Prestep straight from the vertex to the first visible row
    let slope = (to.x - from.x) / (to.y - from.y);
    let prestep = start as f64 - from.y;
    let mut x = (((from.x + slope * prestep) * FIXED_ONE) as i64).saturating_add(FIXED_CEIL);
    let step = (slope * FIXED_ONE) as i64;

    let rows = (start - first_row) as usize..(end - first_row) as usize;
    for span in &mut spans[rows] {
        match side {
            Side::Left => span.left = x >> FIXED_SHIFT,
            Side::Right => span.right = x >> FIXED_SHIFT,
        }
        x = x.saturating_add(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(color: u8, points: &[(f64, f64)]) -> ScreenPolygon {
        let verts: Vec<Vec2> = points.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
        ScreenPolygon::new(color, &verts)
    }

    fn fill(buffer: &mut FrameBuffer, polygon: &ScreenPolygon) {
        ScanlineRasterizer::new().fill_polygon(polygon, buffer);
    }

    #[test]
    fn right_triangle_covers_about_half_its_box() {
        let mut fb = FrameBuffer::new(20, 20).unwrap();
        fill(&mut fb, &poly(5, &[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]));

        let filled = fb.count_color(5);
        assert!(filled.abs_diff(50) <= 10, "{filled} pixels");
        assert_eq!(filled, 55);
        // Top row is full width, last row a single pixel
        assert_eq!(fb.get_pixel(9, 0), Some(5));
        assert_eq!(fb.get_pixel(10, 0), Some(0));
        assert_eq!(fb.get_pixel(0, 9), Some(5));
        assert_eq!(fb.get_pixel(1, 9), Some(0));
        assert_eq!(fb.get_pixel(0, 10), Some(0));
    }

    #[test]
    fn shared_edge_has_no_gaps_or_overlap() {
        let upper = poly(1, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let lower = poly(2, &[(0.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);

        let mut both = FrameBuffer::new(12, 12).unwrap();
        let mut rasterizer = ScanlineRasterizer::new();
        rasterizer.fill_polygon(&upper, &mut both);
        rasterizer.fill_polygon(&lower, &mut both);
        assert_eq!(both.count_color(1) + both.count_color(2), 100);

        let mut a = FrameBuffer::new(12, 12).unwrap();
        let mut b = FrameBuffer::new(12, 12).unwrap();
        fill(&mut a, &upper);
        fill(&mut b, &lower);
        let overlap = a
            .as_slice()
            .iter()
            .zip(b.as_slice())
            .filter(|(pa, pb)| **pa != 0 && **pb != 0)
            .count();
        assert_eq!(overlap, 0);
    }

    #[test]
    fn polygon_within_one_scanline_draws_nothing() {
        let mut fb = FrameBuffer::new(20, 20).unwrap();
        fill(&mut fb, &poly(7, &[(1.0, 3.2), (15.0, 3.4), (8.0, 3.9)]));
        assert_eq!(fb.count_color(7), 0);
    }

    #[test]
    fn oversized_polygon_is_clipped_to_the_buffer() {
        let mut fb = FrameBuffer::new(20, 15).unwrap();
        fill(
            &mut fb,
            &poly(3, &[(-50.0, -50.0), (50.0, -50.0), (50.0, 50.0), (-50.0, 50.0)]),
        );
        assert_eq!(fb.count_color(3), 20 * 15);
    }

    #[test]
    fn polygon_below_the_buffer_draws_nothing() {
        let mut fb = FrameBuffer::new(20, 20).unwrap();
        fill(&mut fb, &poly(3, &[(0.0, 30.0), (10.0, 30.0), (5.0, 40.0)]));
        assert_eq!(fb.count_color(3), 0);
    }

    #[test]
    fn counter_clockwise_polygon_draws_nothing() {
        let mut fb = FrameBuffer::new(20, 20).unwrap();
        fill(&mut fb, &poly(4, &[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]));
        assert_eq!(fb.count_color(4), 0);
    }

    #[test]
    fn span_buffer_holds_one_entry_per_visible_row() {
        let mut fb = FrameBuffer::new(20, 20).unwrap();
        let mut rasterizer = ScanlineRasterizer::new();
        rasterizer.fill_polygon(&poly(1, &[(2.0, 5.5), (12.0, 5.5), (12.0, 30.0)]), &mut fb);
        // Rows 6..20 are visible
        assert_eq!(rasterizer.spans().len(), 14);
        assert!(rasterizer.spans().iter().all(|s| s.right == 12));
    }

    #[test]
    fn degenerate_input_is_ignored() {
        let mut fb = FrameBuffer::new(20, 20).unwrap();
        fill(&mut fb, &poly(1, &[]));
        fill(&mut fb, &poly(1, &[(3.0, 3.0)]));
        fill(&mut fb, &poly(1, &[(f64::NAN, 2.0), (4.0, f64::INFINITY), (1.0, 1.0)]));
        assert_eq!(fb.count_color(0) + fb.count_color(1), 400);
    }

    #[test]
    fn vertex_far_above_the_buffer_is_stepped_to_row_zero() {
        let mut fb = FrameBuffer::new(20, 20).unwrap();
        fill(&mut fb, &poly(1, &[(0.0, -1e19), (10.0, 5.0), (0.0, 5.0)]));

        // The right edge is vertical at x = 10 for every visible row
        assert_eq!(fb.count_color(1), 50);
        assert_eq!(fb.get_pixel(9, 0), Some(1));
        assert_eq!(fb.get_pixel(10, 4), Some(0));
        assert_eq!(fb.get_pixel(0, 5), Some(0));
    }

    #[test]
    fn vertex_far_below_the_buffer_stops_at_the_last_row() {
        let mut fb = FrameBuffer::new(20, 20).unwrap();
        fill(&mut fb, &poly(1, &[(0.0, 15.0), (10.0, 15.0), (0.0, 1e19)]));

        assert_eq!(fb.count_color(1), 50);
        assert_eq!(fb.get_pixel(9, 19), Some(1));
    }
}
