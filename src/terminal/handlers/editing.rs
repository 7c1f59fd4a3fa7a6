//! Erase, insert and delete handlers.
//!
//! Handles CSI sequences:
//! - J: Erase in display (0 below, 1 above, 2/3 all)
//! - K: Erase in line (0 right, 1 left, 2 all)
//! - X: Erase characters
//! - @/P: Insert/delete characters
//! - L/M: Insert/delete lines (within the scroll region)
//!
//! Erased cells take the current background color.

use crate::terminal::screen::Screen;

impl Screen {
    pub(crate) fn erase_display(&mut self, mode: usize) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        match mode {
            0 => {
                self.clear_cells(row, col, self.cols);
                for r in row + 1..self.rows {
                    self.clear_cells(r, 0, self.cols);
                }
            }
            1 => {
                for r in 0..row {
                    self.clear_cells(r, 0, self.cols);
                }
                self.clear_cells(row, 0, col + 1);
            }
            2 | 3 => {
                for r in 0..self.rows {
                    self.clear_cells(r, 0, self.cols);
                }
            }
            _ => {}
        }
    }

    pub(crate) fn erase_line(&mut self, mode: usize) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        match mode {
            0 => self.clear_cells(row, col, self.cols),
            1 => self.clear_cells(row, 0, col + 1),
            2 => self.clear_cells(row, 0, self.cols),
            _ => {}
        }
    }

    pub(crate) fn erase_chars(&mut self, n: usize) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        self.clear_cells(row, col, (col + n).min(self.cols));
    }

    pub(crate) fn insert_chars(&mut self, n: usize) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        let n = n.min(self.cols - col);
        self.split_wide_at(row, col);
        let blank = self.blank();
        let line = &mut self.grid[row];
        line[col..].rotate_right(n);
        line[col..col + n].fill(blank);
        self.cursor.pending_wrap = false;
    }

    pub(crate) fn delete_chars(&mut self, n: usize) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        let n = n.min(self.cols - col);
        self.split_wide_at(row, col);
        let blank = self.blank();
        let cols = self.cols;
        let line = &mut self.grid[row];
        line[col..].rotate_left(n);
        line[cols - n..].fill(blank);
        self.cursor.pending_wrap = false;
    }

    pub(crate) fn insert_lines(&mut self, n: usize) {
        let row = self.cursor.row;
        if row < self.scroll_top || row > self.scroll_bottom {
            return;
        }
        self.scroll_region_down(row, self.scroll_bottom, n);
        self.cursor.col = 0;
        self.cursor.pending_wrap = false;
    }

    pub(crate) fn delete_lines(&mut self, n: usize) {
        let row = self.cursor.row;
        if row < self.scroll_top || row > self.scroll_bottom {
            return;
        }
        self.scroll_region_up(row, self.scroll_bottom, n);
        self.cursor.col = 0;
        self.cursor.pending_wrap = false;
    }

    /// Blank columns `start..end` of `row`, splitting wide characters at
    /// the edges.
    fn clear_cells(&mut self, row: usize, start: usize, end: usize) {
        let end = end.min(self.cols);
        if start >= end {
            return;
        }
        self.split_wide_at(row, start);
        self.split_wide_at(row, end - 1);
        let blank = self.blank();
        self.grid[row][start..end].fill(blank);
    }
}
