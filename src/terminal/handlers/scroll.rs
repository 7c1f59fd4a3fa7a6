//! Scroll region handlers.
//!
//! Handles CSI sequences:
//! - r: DECSTBM (Set Top and Bottom Margins)
//! - S: Scroll up
//! - T: Scroll down
//!
//! And line movement shared with C0/ESC:
//! - LF/VT/FF and ESC D: Index
//! - ESC M: Reverse index

use crate::terminal::screen::Screen;

impl Screen {
    /// Move down one line, scrolling the region at its bottom margin.
    pub(crate) fn linefeed(&mut self) {
        if self.cursor.row == self.scroll_bottom {
            self.scroll_region_up(self.scroll_top, self.scroll_bottom, 1);
        } else if self.cursor.row + 1 < self.rows {
            self.cursor.row += 1;
        }
    }

    /// Move up one line, scrolling the region at its top margin.
    pub(crate) fn reverse_index(&mut self) {
        if self.cursor.row == self.scroll_top {
            self.scroll_region_down(self.scroll_top, self.scroll_bottom, 1);
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
        }
        self.cursor.pending_wrap = false;
    }

    pub(crate) fn scroll_up(&mut self, n: usize) {
        self.scroll_region_up(self.scroll_top, self.scroll_bottom, n);
    }

    pub(crate) fn scroll_down(&mut self, n: usize) {
        self.scroll_region_down(self.scroll_top, self.scroll_bottom, n);
    }

    /// DECSTBM with 1-based margins. Invalid regions are ignored.
    /// The cursor homes after a successful change.
    pub(crate) fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let top = top - 1;
        let bottom = bottom.min(self.rows) - 1;
        if top >= bottom {
            return;
        }
        self.scroll_top = top;
        self.scroll_bottom = bottom;
        self.set_position(0, 0);
    }

    /// Shift rows `top..=bottom` up by `n`, blanking the bottom rows.
    pub(crate) fn scroll_region_up(&mut self, top: usize, bottom: usize, n: usize) {
        let n = n.min(bottom + 1 - top);
        let blank = self.blank_row();
        let region = &mut self.grid[top..=bottom];
        region.rotate_left(n);
        let len = region.len();
        for row in &mut region[len - n..] {
            row.clone_from(&blank);
        }
    }

    /// Shift rows `top..=bottom` down by `n`, blanking the top rows.
    pub(crate) fn scroll_region_down(&mut self, top: usize, bottom: usize, n: usize) {
        let n = n.min(bottom + 1 - top);
        let blank = self.blank_row();
        let region = &mut self.grid[top..=bottom];
        region.rotate_right(n);
        for row in &mut region[..n] {
            row.clone_from(&blank);
        }
    }
}
