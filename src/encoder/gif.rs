use std::borrow::Cow;

use ::gif::{DisposalMethod, Encoder, Frame, Repeat};

use super::{Disposal, EncodeError, FrameControl, FrameEncoder, LoopCount};
use crate::palette::{Colormap, PaletteImage};

/// GIF89a encoder writing into memory with a fixed global color table.
pub struct GifEncoder {
    encoder: Encoder<Vec<u8>>,
    width: u16,
    height: u16,
    control: FrameControl,
    frames: usize,
}

impl GifEncoder {
    pub fn open(width: usize, height: usize, colormap: &Colormap) -> Result<Self, EncodeError> {
        let too_large = || EncodeError::TooLarge { width, height };
        let w = u16::try_from(width).map_err(|_| too_large())?;
        let h = u16::try_from(height).map_err(|_| too_large())?;

        let encoder = Encoder::new(Vec::new(), w, h, &colormap.to_rgb_bytes())?;
        Ok(Self {
            encoder,
            width: w,
            height: h,
            control: FrameControl::default(),
            frames: 0,
        })
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl FrameEncoder for GifEncoder {
    fn set_loop(&mut self, count: LoopCount) -> Result<(), EncodeError> {
        let repeat = match count {
            LoopCount::Infinite => Repeat::Infinite,
            LoopCount::Finite(n) => Repeat::Finite(n),
        };
        self.encoder.set_repeat(repeat)?;
        Ok(())
    }

    fn set_frame_control(&mut self, control: FrameControl) {
        self.control = control;
    }

    fn append_frame(&mut self, image: &PaletteImage) -> Result<(), EncodeError> {
        if image.width() != usize::from(self.width) || image.height() != usize::from(self.height)
        {
            return Err(EncodeError::FrameSize {
                width: self.width,
                height: self.height,
                got_width: image.width(),
                got_height: image.height(),
            });
        }

        let frame = Frame {
            width: self.width,
            height: self.height,
            delay: self.control.delay_cs,
            dispose: disposal_method(self.control.disposal),
            transparent: self.control.transparent,
            buffer: Cow::Borrowed(image.indices()),
            ..Frame::default()
        };
        self.encoder.write_frame(&frame)?;
        self.frames += 1;
        Ok(())
    }

    fn finalize(self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.encoder.into_inner()?)
    }
}

fn disposal_method(disposal: Disposal) -> DisposalMethod {
    match disposal {
        Disposal::Unspecified => DisposalMethod::Any,
        Disposal::Keep => DisposalMethod::Keep,
        Disposal::Background => DisposalMethod::Background,
        Disposal::Previous => DisposalMethod::Previous,
    }
}
