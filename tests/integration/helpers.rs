//! Shared helpers for integration tests.

use std::path::Path;

use assert_cmd::Command;
use gif::{ColorOutput, DecodeOptions, Repeat};

/// Command for the built binary, isolated from the user's configuration.
pub fn seq2gif(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_seq2gif"));
    cmd.env_remove("SEQ2GIF_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", config_home);
    cmd
}

/// A short session: two visible payloads and a trailing one.
pub fn sample_session() -> Vec<u8> {
    seq2gif::record::encode_records(&[
        (100, 0, b"$ echo hello"),
        (100, 500_000, b"\r\nhello\r\n$ "),
        (101, 0, b"exit"),
    ])
}

/// Decoded animation summary.
#[derive(Debug)]
pub struct Animation {
    pub width: u16,
    pub height: u16,
    pub repeat: Repeat,
    pub delays: Vec<u16>,
}

pub fn decode_gif(bytes: &[u8]) -> Animation {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::Indexed);
    let mut decoder = options.read_info(bytes).expect("valid GIF header");
    let mut delays = Vec::new();
    while let Some(frame) = decoder.read_next_frame().expect("valid GIF frame") {
        delays.push(frame.delay);
    }
    Animation {
        width: decoder.width(),
        height: decoder.height(),
        repeat: decoder.repeat(),
        delays,
    }
}
