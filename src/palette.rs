//! Fixed 8-8-4 color quantization.
//!
//! A 24-bit pixel keeps the top 3 bits of red, the top 3 bits of green and
//! the top 2 bits of blue, packed as `RRRGGGBB`. The colormap expands each
//! field back to the 0-255 range, so index and color round-trip through
//! the same bit allocation on every platform.

use rgb::RGB8;

use crate::terminal::Framebuffer;

/// Number of palette entries.
pub const COLORS: usize = 256;

const RED_SHIFT: u32 = 5;
const GREEN_SHIFT: u32 = 2;
const BLUE_SHIFT: u32 = 0;

const RED_BITS: u32 = 3;
const GREEN_BITS: u32 = 3;
const BLUE_BITS: u32 = 2;

const fn mask(bits: u32) -> u8 {
    ((1u16 << bits) - 1) as u8
}

/// Map a pixel to its palette index.
#[inline]
pub fn quantize(pixel: RGB8) -> u8 {
    let r = pixel.r >> (8 - RED_BITS);
    let g = pixel.g >> (8 - GREEN_BITS);
    let b = pixel.b >> (8 - BLUE_BITS);
    (r << RED_SHIFT) | (g << GREEN_SHIFT) | (b << BLUE_SHIFT)
}

fn expand(value: u8, bits: u32) -> u8 {
    (u32::from(value) * 255 / u32::from(mask(bits))) as u8
}

/// Immutable 256-entry color table matching [`quantize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colormap([RGB8; COLORS]);

impl Colormap {
    /// Representative color for a palette index.
    pub fn get(&self, index: u8) -> RGB8 {
        self.0[usize::from(index)]
    }

    pub fn entries(&self) -> &[RGB8; COLORS] {
        &self.0
    }

    /// Flat `r, g, b, r, g, b, ...` table, the layout GIF color tables use.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(|c| [c.r, c.g, c.b]).collect()
    }
}

/// Build the colormap once at startup.
pub fn build_colormap() -> Colormap {
    let mut entries = [RGB8::new(0, 0, 0); COLORS];
    for (i, entry) in entries.iter_mut().enumerate() {
        let index = i as u8;
        let r = (index >> RED_SHIFT) & mask(RED_BITS);
        let g = (index >> GREEN_SHIFT) & mask(GREEN_BITS);
        let b = (index >> BLUE_SHIFT) & mask(BLUE_BITS);
        *entry = RGB8::new(
            expand(r, RED_BITS),
            expand(g, GREEN_BITS),
            expand(b, BLUE_BITS),
        );
    }
    Colormap(entries)
}

/// One palette index per pixel, reused across captured frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteImage {
    width: usize,
    height: usize,
    indices: Vec<u8>,
}

impl PaletteImage {
    /// Zero-filled image (every pixel is palette index 0).
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            indices: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Overwrite this image with the quantized framebuffer.
    ///
    /// The framebuffer must have the same dimensions as the image.
    pub fn quantize_from(&mut self, framebuffer: &Framebuffer) {
        debug_assert_eq!(framebuffer.width(), self.width);
        debug_assert_eq!(framebuffer.height(), self.height);

        for (dst, src) in self.indices.iter_mut().zip(framebuffer.pixels()) {
            *dst = quantize(*src);
        }
    }
}
