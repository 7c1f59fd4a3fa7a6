//! Terminal emulator tests.
//!
//! Organized by handler category:
//! - cursor_tests: Cursor movement and tab stops
//! - scroll_tests: Scroll region behavior
//! - editing_tests: Erase/insert/delete operations
//! - style_tests: SGR color/attribute parsing
//! - integration_tests: Full sequence replay and rendering

use super::{Interpreter, TerminalSettings, VtTerminal};


fn terminal(cols: usize, rows: usize) -> VtTerminal {
    VtTerminal::new(&TerminalSettings {
        cols,
        rows,
        ..TerminalSettings::default()
    })
}

fn feed(terminal: &mut VtTerminal, input: &str) {
    terminal.feed(input.as_bytes());
}

fn text(terminal: &VtTerminal) -> String {
    terminal.screen().text()
}
