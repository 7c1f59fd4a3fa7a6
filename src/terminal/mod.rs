//! Virtual terminal emulator module.
//!
//! Provides the [`Interpreter`] boundary the conversion pipeline drives and
//! [`VtTerminal`], a VTE-based adapter that keeps a cell grid and renders it
//! into a pixel [`Framebuffer`].

mod handlers;
mod render;
mod screen;
mod types;
mod xterm;

#[cfg(test)]
mod tests;

pub use render::{Renderer, CELL_HEIGHT, CELL_WIDTH};
pub use screen::{Cursor, Screen};
pub use types::{Cell, CellStyle, CellWidth, Color, Framebuffer, SubState};

/// Settings used to construct an interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSettings {
    pub cols: usize,
    pub rows: usize,
    /// Default foreground palette index
    pub fg: u8,
    /// Default background palette index
    pub bg: u8,
    /// Cursor palette index
    pub cursor: u8,
    /// Distance between default tab stops, 0 for none
    pub tab_width: usize,
    /// Treat East-Asian ambiguous-width characters as double width
    pub cjk_wide: bool,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            cols: 80,
            rows: 24,
            fg: 7,
            bg: 0,
            cursor: 2,
            tab_width: 8,
            cjk_wide: false,
        }
    }
}

impl TerminalSettings {
    /// Pixel size of the rendered screen, computed without allocating it.
    pub fn pixel_size(&self) -> (usize, usize) {
        (
            self.cols.max(1).saturating_mul(CELL_WIDTH),
            self.rows.max(1).saturating_mul(CELL_HEIGHT),
        )
    }
}

/// A terminal that consumes output bytes and renders its screen.
pub trait Interpreter {
    /// Parse a chunk of output. Sequences may span chunks.
    fn feed(&mut self, bytes: &[u8]);

    /// Whether anything visible changed since the last [`clear_dirty`](Self::clear_dirty).
    fn dirty(&self) -> bool;

    fn clear_dirty(&mut self);

    fn sub_state(&self) -> SubState;

    /// Width and height in pixels of the rendered framebuffer.
    fn pixel_size(&self) -> (usize, usize);

    /// Draw the current screen.
    fn render(&mut self) -> &Framebuffer;
}

/// VT100/xterm interpreter backed by `vte`.
pub struct VtTerminal {
    parser: vte::Parser,
    dcs_entry: DcsEntry,
    screen: Screen,
    renderer: Renderer,
    framebuffer: Framebuffer,
}

impl VtTerminal {
    pub fn new(settings: &TerminalSettings) -> Self {
        let screen = Screen::new(
            settings.cols,
            settings.rows,
            settings.tab_width,
            settings.cjk_wide,
        );
        let renderer = Renderer::new(settings.fg, settings.bg, settings.cursor);
        let framebuffer = Framebuffer::new(
            screen.cols() * CELL_WIDTH,
            screen.rows() * CELL_HEIGHT,
            renderer.background(),
        );
        Self {
            parser: vte::Parser::new(),
            dcs_entry: DcsEntry::Idle,
            screen,
            renderer,
            framebuffer,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }
}

impl Interpreter for VtTerminal {
    fn feed(&mut self, bytes: &[u8]) {
        self.dcs_entry = bytes.iter().fold(self.dcs_entry, |state, &b| state.advance(b));
        self.parser.advance(&mut self.screen, bytes);
    }

    fn dirty(&self) -> bool {
        self.screen.is_dirty()
    }

    fn clear_dirty(&mut self) {
        self.screen.clear_dirty();
    }

    fn sub_state(&self) -> SubState {
        if self.dcs_entry == DcsEntry::Introduced {
            SubState::MidSequence
        } else {
            self.screen.sub_state()
        }
    }

    fn pixel_size(&self) -> (usize, usize) {
        (self.framebuffer.width(), self.framebuffer.height())
    }

    fn render(&mut self) -> &Framebuffer {
        self.renderer.render(&self.screen, &mut self.framebuffer);
        &self.framebuffer
    }
}

/// Tracks a DCS introducer (`ESC P`) up to its final byte.
///
/// `vte` only hooks a DCS once the final byte arrives, so a chunk ending in
/// the parameters would otherwise look like ground state. After the final
/// byte [`Screen`] tracks the sequence until it is unhooked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DcsEntry {
    Idle,
    Escape,
    Introduced,
}

impl DcsEntry {
    fn advance(self, byte: u8) -> Self {
        match (self, byte) {
            (_, 0x1b) => DcsEntry::Escape,
            (DcsEntry::Escape, b'P') => DcsEntry::Introduced,
            // Parameters, intermediates and C0 controls other than CAN/SUB
            (DcsEntry::Introduced, 0x00..=0x17 | 0x19 | 0x1c..=0x3f | 0x7f) => {
                DcsEntry::Introduced
            }
            _ => DcsEntry::Idle,
        }
    }
}
