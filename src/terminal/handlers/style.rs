//! SGR (Select Graphic Rendition) handler.
//!
//! Handles CSI m sequence for text styling:
//! - Reset (0)
//! - Bold (1), underline (4), reverse (7) and their resets (22, 24, 27)
//! - Standard foreground/background colors (30-37, 40-47)
//! - Extended colors - 256-color mode (38;5;n, 48;5;n)
//! - Extended colors - RGB mode (38;2;r;g;b, 48;2;r;g;b), also colon form
//! - Default colors (39, 49)
//! - Bright foreground/background colors (90-97, 100-107)

use vte::Params;

use crate::terminal::screen::Screen;
use crate::terminal::types::{CellStyle, Color};

impl Screen {
    pub(crate) fn apply_sgr(&mut self, params: &Params) {
        let groups: Vec<&[u16]> = params.iter().collect();
        if groups.is_empty() {
            self.style = CellStyle::default();
            return;
        }

        let mut i = 0;
        while i < groups.len() {
            let group = groups[i];
            let code = group.first().copied().unwrap_or(0);
            match code {
                0 => self.style = CellStyle::default(),
                1 => self.style.bold = true,
                4 => self.style.underline = true,
                7 => self.style.reverse = true,
                22 => self.style.bold = false,
                24 => self.style.underline = false,
                27 => self.style.reverse = false,
                30..=37 => self.style.fg = Color::Indexed((code - 30) as u8),
                39 => self.style.fg = Color::Default,
                40..=47 => self.style.bg = Color::Indexed((code - 40) as u8),
                49 => self.style.bg = Color::Default,
                90..=97 => self.style.fg = Color::Indexed((code - 90 + 8) as u8),
                100..=107 => self.style.bg = Color::Indexed((code - 100 + 8) as u8),
                38 | 48 => {
                    let (color, consumed) = if group.len() > 1 {
                        (extended_color(&group[1..]), 0)
                    } else {
                        let rest: Vec<u16> = groups[i + 1..]
                            .iter()
                            .map(|g| g.first().copied().unwrap_or(0))
                            .collect();
                        extended_color_spread(&rest)
                    };
                    if let Some(color) = color {
                        if code == 38 {
                            self.style.fg = color;
                        } else {
                            self.style.bg = color;
                        }
                    }
                    i += consumed;
                }
                _ => {}
            }
            i += 1;
        }
    }
}

/// Colon form: `38:5:n` or `38:2:r:g:b` (optionally with a color space id).
fn extended_color(sub: &[u16]) -> Option<Color> {
    match sub {
        [5, n, ..] => Some(Color::Indexed(clamp8(*n))),
        [2, _, r, g, b, ..] => Some(Color::Rgb(clamp8(*r), clamp8(*g), clamp8(*b))),
        [2, r, g, b] => Some(Color::Rgb(clamp8(*r), clamp8(*g), clamp8(*b))),
        _ => None,
    }
}

/// Semicolon form: the selector and values are separate parameters.
/// Returns the color and how many parameters it used.
fn extended_color_spread(rest: &[u16]) -> (Option<Color>, usize) {
    match rest {
        [5, n, ..] => (Some(Color::Indexed(clamp8(*n))), 2),
        [2, r, g, b, ..] => (Some(Color::Rgb(clamp8(*r), clamp8(*g), clamp8(*b))), 4),
        [] => (None, 0),
        _ => (None, rest.len()),
    }
}

fn clamp8(value: u16) -> u8 {
    value.min(255) as u8
}
