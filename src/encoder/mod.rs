//! Animated image encoding.
//!
//! The pipeline talks to an encoder only through [`FrameEncoder`]. The
//! crate ships one adapter, [`GifEncoder`].

mod gif;

use crate::palette::PaletteImage;
pub use self::gif::GifEncoder;

/// How often the animation plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopCount {
    #[default]
    Infinite,
    Finite(u16),
}

impl From<u16> for LoopCount {
    /// `0` means loop forever, like the GIF application extension.
    fn from(count: u16) -> Self {
        match count {
            0 => LoopCount::Infinite,
            n => LoopCount::Finite(n),
        }
    }
}

/// What happens to a frame's area before the next one is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposal {
    #[default]
    Unspecified,
    Keep,
    Background,
    Previous,
}

/// Per-frame metadata applied to the next appended frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameControl {
    pub transparent: Option<u8>,
    /// Display time in centiseconds
    pub delay_cs: u16,
    pub disposal: Disposal,
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Image size {width}x{height} exceeds the GIF limit of 65535")]
    TooLarge { width: usize, height: usize },

    #[error("Frame is {got_width}x{got_height}, expected {width}x{height}")]
    FrameSize {
        width: u16,
        height: u16,
        got_width: usize,
        got_height: usize,
    },

    #[error("GIF encoding failed: {0}")]
    Gif(#[from] ::gif::EncodingError),

    #[error("GIF encoding failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Append-only frame sink.
pub trait FrameEncoder {
    fn set_loop(&mut self, count: LoopCount) -> Result<(), EncodeError>;

    /// Metadata for frames appended from now on.
    fn set_frame_control(&mut self, control: FrameControl);

    fn append_frame(&mut self, image: &PaletteImage) -> Result<(), EncodeError>;

    /// Close the stream and return the encoded bytes.
    fn finalize(self) -> Result<Vec<u8>, EncodeError>
    where
        Self: Sized;
}
