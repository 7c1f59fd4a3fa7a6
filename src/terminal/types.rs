//! Terminal data types.
//!
//! Contains the core data structures for representing terminal state:
//! - Color: default, 256-color palette index or RGB
//! - CellStyle: Text attributes (bold, underline, reverse)
//! - Cell: A single character with its style and width
//! - SubState: Parser state reported to the frame sampler
//! - Framebuffer: The rendered pixel grid

use rgb::RGB8;

/// A cell color as set by SGR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Configured default foreground/background
    #[default]
    Default,
    /// xterm 256-color palette index
    Indexed(u8),
    /// 24-bit color
    Rgb(u8, u8, u8),
}

/// Text attributes applied to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub underline: bool,
    pub reverse: bool,
}

/// How much horizontal space a cell's character occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellWidth {
    #[default]
    Single,
    /// Left half of a double-width character
    Wide,
    /// Right half of a double-width character, holds no glyph
    Continuation,
}

/// A single character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
    pub width: CellWidth,
}

impl Cell {
    /// Blank cell carrying the background of `style`.
    pub fn blank(style: CellStyle) -> Self {
        Self {
            ch: ' ',
            style: CellStyle {
                bg: style.bg,
                reverse: style.reverse,
                ..CellStyle::default()
            },
            width: CellWidth::Single,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(CellStyle::default())
    }
}

/// Parser state as seen by the frame sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubState {
    #[default]
    Ground,
    /// A multi-step sequence (DCS) has started and not yet terminated
    MidSequence,
}

/// Rendered 24-bit pixel grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<RGB8>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize, fill: RGB8) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> RGB8 {
        self.pixels[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, color: RGB8) {
        self.pixels[y * self.width + x] = color;
    }

    /// Fill a rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: RGB8) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for row in y.min(y_end)..y_end {
            let start = row * self.width;
            self.pixels[start + x.min(x_end)..start + x_end].fill(color);
        }
    }
}
