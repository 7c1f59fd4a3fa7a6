//! Terminal escape sequence handlers.
//!
//! Organized by category:
//! - cursor: Cursor movement, positioning and tab stops
//! - scroll: Scroll region and scrolling operations
//! - editing: Erase, insert and delete operations
//! - style: SGR (Select Graphic Rendition) handling
//!
//! Each module adds methods to [`Screen`](super::screen::Screen); dispatch
//! from parser callbacks happens in `screen.rs`.

mod cursor;
mod editing;
mod scroll;
mod style;
