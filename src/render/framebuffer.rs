//! Palette-indexed frame buffer.
//!
//! One byte per pixel, row-major, row 0 at the top. The bytes are palette
//! indices; turning them into colors is up to whoever presents the frame.

use crate::config::{validate_dimensions, ConfigError};

/// An owned 8-bit color-indexed image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Allocates a `width` x `height` buffer filled with index 0.
    ///
    /// Sizes are checked with [`validate_dimensions`], so every buffer the
    /// rasterizer sees fits its span storage.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        validate_dimensions(width, height)?;
        Ok(Self {
            pixels: vec![0; width as usize * height as usize],
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocates for a new size and clears to index 0. On error the buffer
    /// is left untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ConfigError> {
        validate_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, 0);
        Ok(())
    }

    pub fn clear(&mut self, color: u8) {
        self.pixels.fill(color);
    }

    /// Fills columns `[x_start, x_end)` of row `y`.
    ///
    /// The run is clipped to the buffer; rows outside it are ignored.
    #[inline]
    pub fn fill_span(&mut self, y: usize, x_start: usize, x_end: usize, color: u8) {
        let width = self.width as usize;
        if y >= self.height as usize {
            return;
        }
        let x_end = x_end.min(width);
        if x_start >= x_end {
            return;
        }
        let row = y * width;
        self.pixels[row + x_start..row + x_end].fill(color);
    }

    /// Get the color index at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u8> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// One row of pixels, or None past the bottom edge.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let width = self.width as usize;
        let start = (y as usize).checked_mul(width)?;
        self.pixels.get(start..start + width)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    /// Number of pixels holding `color`.
    pub fn count_color(&self, color: u8) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }
}
