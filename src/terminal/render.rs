//! Rasterizes a [`Screen`] into a [`Framebuffer`].
//!
//! Every cell is `CELL_WIDTH` x `CELL_HEIGHT` pixels. Glyphs come from the
//! 8x8 `font8x8` tables with each glyph row drawn twice.

use font8x8::{
    UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, HIRAGANA_FONTS, LATIN_FONTS,
};
use rgb::RGB8;

use super::screen::Screen;
use super::types::{Cell, CellWidth, Color, Framebuffer};
use super::xterm;

pub const CELL_WIDTH: usize = 8;
pub const CELL_HEIGHT: usize = 16;

const GLYPH_ROWS: usize = 8;
const ROW_SCALE: usize = CELL_HEIGHT / GLYPH_ROWS;

/// Outline drawn for characters the font tables do not cover.
const MISSING_GLYPH: [u8; GLYPH_ROWS] = [0x00, 0x7e, 0x42, 0x42, 0x42, 0x42, 0x7e, 0x00];

fn glyph(c: char) -> Option<[u8; GLYPH_ROWS]> {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BOX_FONTS.get(c))
        .or_else(|| BLOCK_FONTS.get(c))
        .or_else(|| GREEK_FONTS.get(c))
        .or_else(|| HIRAGANA_FONTS.get(c))
}

#[derive(Debug, Clone)]
pub struct Renderer {
    palette: [RGB8; 256],
    fg: u8,
    bg: u8,
    cursor: u8,
}

impl Renderer {
    pub fn new(fg: u8, bg: u8, cursor: u8) -> Self {
        Self {
            palette: xterm::table(),
            fg,
            bg,
            cursor,
        }
    }

    pub fn background(&self) -> RGB8 {
        self.palette[usize::from(self.bg)]
    }

    /// Draw the whole screen. `framebuffer` must be sized to the screen's
    /// cell grid.
    pub fn render(&self, screen: &Screen, framebuffer: &mut Framebuffer) {
        let cursor = screen.cursor();
        for row in 0..screen.rows() {
            let line = screen.line(row);
            for (col, cell) in line.iter().enumerate() {
                if cell.width == CellWidth::Continuation
                    && col > 0
                    && line[col - 1].width == CellWidth::Wide
                {
                    continue;
                }
                let has_cursor =
                    screen.cursor_visible() && cursor.row == row && cursor.col == col;
                self.draw_cell(framebuffer, row, col, cell, has_cursor);
            }
        }
    }

    fn draw_cell(
        &self,
        framebuffer: &mut Framebuffer,
        row: usize,
        col: usize,
        cell: &Cell,
        has_cursor: bool,
    ) {
        let (fg, mut bg) = self.cell_colors(cell);
        if has_cursor {
            bg = self.palette[usize::from(self.cursor)];
        }

        let scale = if cell.width == CellWidth::Wide { 2 } else { 1 };
        let x0 = col * CELL_WIDTH;
        let y0 = row * CELL_HEIGHT;
        framebuffer.fill_rect(x0, y0, CELL_WIDTH * scale, CELL_HEIGHT, bg);

        if cell.width != CellWidth::Continuation && cell.ch != ' ' {
            let rows = glyph(cell.ch).unwrap_or(MISSING_GLYPH);
            for (gy, &bits) in rows.iter().enumerate() {
                let bits = if cell.style.bold { bits | bits << 1 } else { bits };
                for gx in (0..CELL_WIDTH).filter(|gx| bits & (1 << gx) != 0) {
                    framebuffer.fill_rect(
                        x0 + gx * scale,
                        y0 + gy * ROW_SCALE,
                        scale,
                        ROW_SCALE,
                        fg,
                    );
                }
            }
        }

        if cell.style.underline {
            framebuffer.fill_rect(x0, y0 + CELL_HEIGHT - 1, CELL_WIDTH * scale, 1, fg);
        }
    }

    fn cell_colors(&self, cell: &Cell) -> (RGB8, RGB8) {
        let style = cell.style;
        let fg = match style.fg {
            Color::Default => self.indexed(self.fg, style.bold),
            Color::Indexed(i) => self.indexed(i, style.bold),
            Color::Rgb(r, g, b) => RGB8::new(r, g, b),
        };
        let bg = match style.bg {
            Color::Default => self.palette[usize::from(self.bg)],
            Color::Indexed(i) => self.palette[usize::from(i)],
            Color::Rgb(r, g, b) => RGB8::new(r, g, b),
        };
        if style.reverse {
            (bg, fg)
        } else {
            (fg, bg)
        }
    }

    fn indexed(&self, index: u8, bold: bool) -> RGB8 {
        let index = if bold && index < 8 { index + 8 } else { index };
        self.palette[usize::from(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_glyphs_resolve() {
        assert!(glyph('A').is_some());
        assert!(glyph('─').is_some());
        assert!(glyph('\u{e000}').is_none());
    }

    #[test]
    fn bold_brightens_base_colors_only() {
        let renderer = Renderer::new(7, 0, 2);
        assert_eq!(renderer.indexed(1, true), xterm::color(9));
        assert_eq!(renderer.indexed(9, true), xterm::color(9));
        assert_eq!(renderer.indexed(100, true), xterm::color(100));
        assert_eq!(renderer.indexed(1, false), xterm::color(1));
    }

    #[test]
    fn reverse_swaps_resolved_colors() {
        let renderer = Renderer::new(7, 0, 2);
        let mut cell = Cell::default();
        cell.style.reverse = true;
        assert_eq!(
            renderer.cell_colors(&cell),
            (xterm::color(0), xterm::color(7))
        );
    }
}
