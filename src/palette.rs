//! 256-entry color table for presenting palette-indexed frames.
//!
//! Layout of [`Palette::standard`]:
//!
//! | Indices    | Contents                                   |
//! |------------|--------------------------------------------|
//! | `0..10`    | first ten Windows static colors            |
//! | `10..226`  | 6x6x6 color cube, `c * 255 / 6` per channel |
//! | `226..246` | 20 gray levels, `g * 255 / 20`             |
//! | `246..256` | last ten Windows static colors             |
//!
//! Colors are packed as ARGB8888 with the alpha byte fixed at `0xFF`.

const STATIC_LOW: [[u8; 3]; 10] = [
    [0, 0, 0],
    [128, 0, 0],
    [0, 128, 0],
    [128, 128, 0],
    [0, 0, 128],
    [128, 0, 128],
    [0, 128, 128],
    [192, 192, 192],
    [192, 220, 192],
    [166, 202, 240],
];

const STATIC_HIGH: [[u8; 3]; 10] = [
    [255, 251, 240],
    [160, 160, 164],
    [128, 128, 128],
    [255, 0, 0],
    [0, 255, 0],
    [255, 255, 0],
    [0, 0, 255],
    [255, 0, 255],
    [0, 255, 255],
    [255, 255, 255],
];

const CUBE_START: usize = 10;
const CUBE_LEVELS: usize = 6;
const GRAY_START: usize = CUBE_START + CUBE_LEVELS * CUBE_LEVELS * CUBE_LEVELS;
const GRAY_LEVELS: usize = 20;
const STATIC_HIGH_START: usize = GRAY_START + GRAY_LEVELS;

const _: () = assert!(STATIC_HIGH_START + STATIC_HIGH.len() == 256);

#[inline]
const fn pack_argb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: [u32; 256],
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

impl Palette {
    pub fn standard() -> Self {
        let mut entries = [0u32; 256];

        for (entry, [r, g, b]) in entries.iter_mut().zip(STATIC_LOW) {
            *entry = pack_argb(r, g, b);
        }

        let level = |i: usize, steps: usize| (i * 255 / steps) as u8;
        let cube = CUBE_LEVELS;
        for (i, entry) in entries[CUBE_START..GRAY_START].iter_mut().enumerate() {
            *entry = pack_argb(
                level(i / (cube * cube), cube),
                level(i / cube % cube, cube),
                level(i % cube, cube),
            );
        }

        for (i, entry) in entries[GRAY_START..STATIC_HIGH_START].iter_mut().enumerate() {
            let gray = level(i, GRAY_LEVELS);
            *entry = pack_argb(gray, gray, gray);
        }

        for (entry, [r, g, b]) in entries[STATIC_HIGH_START..].iter_mut().zip(STATIC_HIGH) {
            *entry = pack_argb(r, g, b);
        }

        Self { entries }
    }

    /// Packed `0xAARRGGBB` color for a palette index.
    #[inline]
    pub fn argb(&self, index: u8) -> u32 {
        self.entries[index as usize]
    }

    #[inline]
    pub fn rgb(&self, index: u8) -> [u8; 3] {
        let [_, r, g, b] = self.argb(index).to_be_bytes();
        [r, g, b]
    }

    pub fn entries(&self) -> &[u32; 256] {
        &self.entries
    }

    /// Expands palette indices into ARGB8888 pixels, written as native-endian
    /// `u32`s the way SDL's `ARGB8888` textures expect them.
    pub fn expand_argb(&self, indices: &[u8], out: &mut Vec<u8>) {
        out.clear();
        out.reserve(indices.len() * 4);
        for &index in indices {
            out.extend_from_slice(&self.argb(index).to_ne_bytes());
        }
    }
}
