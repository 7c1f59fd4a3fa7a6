//! xterm 256-color palette.
//!
//! Indices 0-15 are the ANSI colors, 16-231 a 6x6x6 color cube and
//! 232-255 a 24-step gray ramp.

use rgb::RGB8;

const ANSI: [u32; 16] = [
    0x000000, 0xcd0000, 0x00cd00, 0xcdcd00, 0x0000ee, 0xcd00cd, 0x00cdcd, 0xe5e5e5, //
    0x7f7f7f, 0xff0000, 0x00ff00, 0xffff00, 0x5c5cff, 0xff00ff, 0x00ffff, 0xffffff,
];

const CUBE_LEVELS: [u8; 6] = [0x00, 0x5f, 0x87, 0xaf, 0xd7, 0xff];

fn from_hex(hex: u32) -> RGB8 {
    RGB8::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Color for an xterm palette index.
pub fn color(index: u8) -> RGB8 {
    match index {
        0..=15 => from_hex(ANSI[usize::from(index)]),
        16..=231 => {
            let i = index - 16;
            RGB8::new(
                CUBE_LEVELS[usize::from(i / 36)],
                CUBE_LEVELS[usize::from((i / 6) % 6)],
                CUBE_LEVELS[usize::from(i % 6)],
            )
        }
        232..=255 => {
            let level = 8 + (index - 232) * 10;
            RGB8::new(level, level, level)
        }
    }
}

/// The whole palette as a lookup table.
pub fn table() -> [RGB8; 256] {
    let mut table = [RGB8::new(0, 0, 0); 256];
    for (i, entry) in table.iter_mut().enumerate() {
        *entry = color(i as u8);
    }
    table
}
