//! PNG snapshots of rendered frames.

use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgb, RgbImage};
use log::info;

use crate::palette::Palette;
use crate::render::FrameBuffer;

/// Resolves palette indices into an RGB image.
pub fn to_rgb_image(frame: &FrameBuffer, palette: &Palette) -> RgbImage {
    ImageBuffer::from_fn(frame.width(), frame.height(), |x, y| {
        let index = frame.get_pixel(x as i32, y as i32).unwrap_or(0);
        Rgb(palette.rgb(index))
    })
}

/// Writes `frame` to `path` as an RGB PNG.
pub fn save_png<P: AsRef<Path>>(
    frame: &FrameBuffer,
    palette: &Palette,
    path: P,
) -> Result<(), image::ImageError> {
    let path = path.as_ref();
    to_rgb_image(frame, palette).save_with_format(path, image::ImageFormat::Png)?;
    info!("saved snapshot to {}", path.display());
    Ok(())
}

/// Next free `frame_NNNN.png` name in `dir`, starting from `counter`.
pub fn next_snapshot_path(dir: &Path, counter: &mut u32) -> PathBuf {
    loop {
        let candidate = dir.join(format!("frame_{:04}.png", *counter));
        *counter += 1;
        if !candidate.exists() {
            return candidate;
        }
    }
}
