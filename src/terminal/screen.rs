//! Screen state and the `vte::Perform` implementation.
//!
//! The parser calls into [`Screen`] for every printable character, control
//! byte and completed escape sequence. Sequence handlers live in
//! [`super::handlers`]; this module owns the grid, the cursor and the
//! bookkeeping the frame sampler needs (dirty flag, DCS state).

use unicode_width::UnicodeWidthChar;
use vte::{Params, Perform};

use super::types::{Cell, CellStyle, CellWidth, SubState};

/// Cursor position and deferred-wrap state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
    /// Set after printing in the last column; the next print wraps first
    pub pending_wrap: bool,
}

/// Cursor state saved by DECSC / SCOSC.
#[derive(Debug, Clone, Copy)]
pub(super) struct SavedCursor {
    pub row: usize,
    pub col: usize,
    pub style: CellStyle,
}

/// Virtual terminal screen.
#[derive(Debug)]
pub struct Screen {
    pub(super) cols: usize,
    pub(super) rows: usize,
    pub(super) grid: Vec<Vec<Cell>>,
    /// Primary screen contents while the alternate screen is active
    pub(super) primary: Option<Vec<Vec<Cell>>>,
    pub(super) cursor: Cursor,
    pub(super) saved_cursor: Option<SavedCursor>,
    pub(super) style: CellStyle,
    pub(super) scroll_top: usize,
    pub(super) scroll_bottom: usize,
    pub(super) tab_stops: Vec<bool>,
    pub(super) tab_width: usize,
    pub(super) autowrap: bool,
    pub(super) cursor_visible: bool,
    cjk_wide: bool,
    in_dcs: bool,
    dirty: bool,
}

impl Screen {
    /// Create a blank screen.
    ///
    /// `tab_width` of 0 leaves the screen without default tab stops.
    pub fn new(cols: usize, rows: usize, tab_width: usize, cjk_wide: bool) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            grid: vec![vec![Cell::default(); cols]; rows],
            primary: None,
            cursor: Cursor::default(),
            saved_cursor: None,
            style: CellStyle::default(),
            scroll_top: 0,
            scroll_bottom: rows - 1,
            tab_stops: default_tab_stops(cols, tab_width),
            tab_width,
            autowrap: true,
            cursor_visible: true,
            cjk_wide,
            in_dcs: false,
            dirty: false,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.grid[row][col]
    }

    pub fn line(&self, row: usize) -> &[Cell] {
        &self.grid[row]
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn sub_state(&self) -> SubState {
        if self.in_dcs {
            SubState::MidSequence
        } else {
            SubState::Ground
        }
    }

    /// Plain-text view of the screen, trailing blanks and empty rows removed.
    pub fn text(&self) -> String {
        let lines: Vec<String> = self
            .grid
            .iter()
            .map(|row| {
                let line: String = row
                    .iter()
                    .filter(|cell| cell.width != CellWidth::Continuation)
                    .map(|cell| cell.ch)
                    .collect();
                line.trim_end().to_string()
            })
            .collect();
        let used = lines
            .iter()
            .rposition(|line| !line.is_empty())
            .map_or(0, |i| i + 1);
        lines[..used].join("\n")
    }

    pub(super) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Blank cell using the current background.
    pub(super) fn blank(&self) -> Cell {
        Cell::blank(self.style)
    }

    pub(super) fn blank_row(&self) -> Vec<Cell> {
        vec![self.blank(); self.cols]
    }

    /// Full reset (RIS).
    pub(super) fn reset(&mut self) {
        let in_dcs = self.in_dcs;
        *self = Screen::new(self.cols, self.rows, self.tab_width, self.cjk_wide);
        self.in_dcs = in_dcs;
        self.dirty = true;
    }

    fn char_width(&self, c: char) -> usize {
        let width = if self.cjk_wide {
            c.width_cjk()
        } else {
            c.width()
        };
        width.unwrap_or(0)
    }

    /// Break up a double-width character that is about to be partly
    /// overwritten at `(row, col)`.
    pub(super) fn split_wide_at(&mut self, row: usize, col: usize) {
        let blank = self.blank();
        match self.grid[row][col].width {
            CellWidth::Wide => {
                if col + 1 < self.cols {
                    self.grid[row][col + 1] = blank;
                }
            }
            CellWidth::Continuation => {
                if col > 0 {
                    self.grid[row][col - 1] = blank;
                }
            }
            CellWidth::Single => {}
        }
    }

    fn put_char(&mut self, c: char) {
        let width = self.char_width(c);
        if width == 0 {
            // Combining marks and other zero-width characters are not drawn
            return;
        }

        if self.cursor.pending_wrap {
            if self.autowrap {
                self.cursor.col = 0;
                self.linefeed();
            }
            self.cursor.pending_wrap = false;
        }

        if width == 2 && self.cols < 2 {
            return;
        }

        if width == 2 && self.cursor.col + 1 >= self.cols {
            if self.autowrap {
                let (row, col) = (self.cursor.row, self.cursor.col);
                self.split_wide_at(row, col);
                self.grid[row][col] = self.blank();
                self.cursor.col = 0;
                self.linefeed();
            } else {
                self.cursor.col = self.cols - 2;
            }
        }

        let (row, col) = (self.cursor.row, self.cursor.col);
        self.split_wide_at(row, col);
        if width == 2 {
            self.split_wide_at(row, col + 1);
            self.grid[row][col] = Cell {
                ch: c,
                style: self.style,
                width: CellWidth::Wide,
            };
            self.grid[row][col + 1] = Cell {
                ch: ' ',
                style: self.style,
                width: CellWidth::Continuation,
            };
        } else {
            self.grid[row][col] = Cell {
                ch: c,
                style: self.style,
                width: CellWidth::Single,
            };
        }

        if col + width >= self.cols {
            self.cursor.col = self.cols - 1;
            self.cursor.pending_wrap = true;
        } else {
            self.cursor.col = col + width;
        }
    }

    fn dispatch_csi(&mut self, params: &Params, intermediates: &[u8], action: char) -> bool {
        if let [b'?'] = intermediates {
            return match action {
                'h' => self.set_private_modes(params, true),
                'l' => self.set_private_modes(params, false),
                _ => false,
            };
        }
        if !intermediates.is_empty() {
            return false;
        }

        let n = param(params, 0, 1);
        match action {
            'A' => self.cursor_up(n),
            'B' | 'e' => self.cursor_down(n),
            'C' | 'a' => self.cursor_forward(n),
            'D' => self.cursor_back(n),
            'E' => {
                self.cursor_down(n);
                self.cursor.col = 0;
            }
            'F' => {
                self.cursor_up(n);
                self.cursor.col = 0;
            }
            'G' | '`' => self.set_col(n - 1),
            'd' => self.set_row(n - 1),
            'H' | 'f' => {
                let col = param(params, 1, 1);
                self.set_position(n - 1, col - 1);
            }
            'I' => self.tab_forward(n),
            'Z' => self.tab_backward(n),
            'J' => self.erase_display(param(params, 0, 0)),
            'K' => self.erase_line(param(params, 0, 0)),
            'X' => self.erase_chars(n),
            '@' => self.insert_chars(n),
            'P' => self.delete_chars(n),
            'L' => self.insert_lines(n),
            'M' => self.delete_lines(n),
            'S' => self.scroll_up(n),
            'T' => self.scroll_down(n),
            'r' => {
                let top = param(params, 0, 1);
                let bottom = param(params, 1, self.rows);
                self.set_scroll_region(top, bottom);
            }
            'g' => self.clear_tab_stops(param(params, 0, 0)),
            's' => self.save_cursor(),
            'u' => self.restore_cursor(),
            'm' => {
                self.apply_sgr(params);
                // Attribute changes alone are not visible
                return false;
            }
            _ => return false,
        }
        true
    }

    fn set_private_modes(&mut self, params: &Params, enable: bool) -> bool {
        let mut changed = false;
        for group in params.iter() {
            match group.first().copied().unwrap_or(0) {
                7 => self.autowrap = enable,
                25 => {
                    self.cursor_visible = enable;
                    changed = true;
                }
                47 => changed |= self.switch_screen(enable, false),
                1049 => changed |= self.switch_screen(enable, true),
                _ => {}
            }
        }
        changed
    }

    /// Enter or leave the alternate screen.
    fn switch_screen(&mut self, alternate: bool, save_cursor: bool) -> bool {
        if alternate == self.primary.is_some() {
            return false;
        }
        if alternate {
            if save_cursor {
                self.save_cursor();
            }
            let blank = vec![self.blank_row(); self.rows];
            self.primary = Some(std::mem::replace(&mut self.grid, blank));
        } else {
            if let Some(primary) = self.primary.take() {
                self.grid = primary;
            }
            if save_cursor {
                self.restore_cursor();
            }
        }
        true
    }
}

/// Tab stops every `tab_width` columns.
pub(super) fn default_tab_stops(cols: usize, tab_width: usize) -> Vec<bool> {
    (0..cols)
        .map(|col| tab_width > 0 && col > 0 && col % tab_width == 0)
        .collect()
}

/// Parameter `index`, with 0 or missing replaced by `default`.
pub(super) fn param(params: &Params, index: usize, default: usize) -> usize {
    params
        .iter()
        .nth(index)
        .and_then(|group| group.first().copied())
        .filter(|&value| value != 0)
        .map_or(default, usize::from)
}

impl Perform for Screen {
    fn print(&mut self, c: char) {
        self.put_char(c);
        self.mark_dirty();
    }

    fn execute(&mut self, byte: u8) {
        let handled = match byte {
            0x08 => {
                self.cursor_back(1);
                true
            }
            0x09 => {
                self.tab_forward(1);
                true
            }
            0x0a..=0x0c => {
                self.cursor.pending_wrap = false;
                self.linefeed();
                true
            }
            0x0d => {
                self.cursor.col = 0;
                self.cursor.pending_wrap = false;
                true
            }
            _ => false,
        };
        if handled {
            self.mark_dirty();
        }
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _action: char) {
        self.in_dcs = true;
    }

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {
        self.in_dcs = false;
    }

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        if ignore {
            return;
        }
        if self.dispatch_csi(params, intermediates, action) {
            self.mark_dirty();
        }
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], ignore: bool, byte: u8) {
        if ignore || !intermediates.is_empty() {
            return;
        }
        let handled = match byte {
            b'7' => {
                self.save_cursor();
                false
            }
            b'8' => {
                self.restore_cursor();
                true
            }
            b'D' => {
                self.linefeed();
                true
            }
            b'E' => {
                self.cursor.col = 0;
                self.linefeed();
                true
            }
            b'M' => {
                self.reverse_index();
                true
            }
            b'H' => {
                self.set_tab_stop();
                false
            }
            b'c' => {
                self.reset();
                true
            }
            _ => false,
        };
        if handled {
            self.mark_dirty();
        }
    }
}
