//! Cursor movement handlers.
//!
//! Handles CSI sequences:
//! - A/B/C/D: Cursor up, down, forward, back
//! - E/F: Cursor next/previous line
//! - G/`: Cursor horizontal absolute
//! - d: Cursor vertical absolute
//! - H/f: Cursor position
//! - I/Z: Tab forward/backward
//! - g: Tab clear
//! - s/u: Save/restore cursor
//!
//! And ESC sequences:
//! - ESC 7 / ESC 8: DEC save/restore cursor
//! - ESC H: Set tab stop

use crate::terminal::screen::{SavedCursor, Screen};

impl Screen {
    pub(crate) fn cursor_up(&mut self, n: usize) {
        // Stop at the top margin when starting inside the scroll region
        let top = if self.cursor.row >= self.scroll_top {
            self.scroll_top
        } else {
            0
        };
        self.cursor.row = self.cursor.row.saturating_sub(n).max(top);
        self.cursor.pending_wrap = false;
    }

    pub(crate) fn cursor_down(&mut self, n: usize) {
        let bottom = if self.cursor.row <= self.scroll_bottom {
            self.scroll_bottom
        } else {
            self.rows - 1
        };
        self.cursor.row = (self.cursor.row + n).min(bottom);
        self.cursor.pending_wrap = false;
    }

    pub(crate) fn cursor_forward(&mut self, n: usize) {
        self.cursor.col = (self.cursor.col + n).min(self.cols - 1);
        self.cursor.pending_wrap = false;
    }

    pub(crate) fn cursor_back(&mut self, n: usize) {
        self.cursor.col = self.cursor.col.saturating_sub(n);
        self.cursor.pending_wrap = false;
    }

    pub(crate) fn set_col(&mut self, col: usize) {
        self.cursor.col = col.min(self.cols - 1);
        self.cursor.pending_wrap = false;
    }

    pub(crate) fn set_row(&mut self, row: usize) {
        self.cursor.row = row.min(self.rows - 1);
        self.cursor.pending_wrap = false;
    }

    pub(crate) fn set_position(&mut self, row: usize, col: usize) {
        self.set_row(row);
        self.set_col(col);
    }

    pub(crate) fn save_cursor(&mut self) {
        self.saved_cursor = Some(SavedCursor {
            row: self.cursor.row,
            col: self.cursor.col,
            style: self.style,
        });
    }

    /// Restore the saved cursor, or home it if nothing was saved.
    pub(crate) fn restore_cursor(&mut self) {
        match self.saved_cursor {
            Some(saved) => {
                self.set_position(saved.row, saved.col);
                self.style = saved.style;
            }
            None => self.set_position(0, 0),
        }
    }

    pub(crate) fn tab_forward(&mut self, n: usize) {
        for _ in 0..n {
            let next = (self.cursor.col + 1..self.cols).find(|&col| self.tab_stops[col]);
            self.cursor.col = next.unwrap_or(self.cols - 1);
        }
        self.cursor.pending_wrap = false;
    }

    pub(crate) fn tab_backward(&mut self, n: usize) {
        for _ in 0..n {
            let prev = (0..self.cursor.col).rev().find(|&col| self.tab_stops[col]);
            self.cursor.col = prev.unwrap_or(0);
        }
        self.cursor.pending_wrap = false;
    }

    pub(crate) fn set_tab_stop(&mut self) {
        self.tab_stops[self.cursor.col] = true;
    }

    /// TBC: 0 clears the stop at the cursor, 3 clears all stops.
    pub(crate) fn clear_tab_stops(&mut self, mode: usize) {
        match mode {
            0 => self.tab_stops[self.cursor.col] = false,
            3 => self.tab_stops.iter_mut().for_each(|stop| *stop = false),
            _ => {}
        }
    }
}
