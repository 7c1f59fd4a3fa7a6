//! Single-pass conversion driver.
//!
//! Pulls record events, feeds them to an [`Interpreter`], asks the
//! [`FrameSampler`] whether to capture, and appends quantized frames to a
//! [`FrameEncoder`]. The timeline only ever grows.

use std::io::Read;

use tracing::{debug, trace, warn};

use crate::encoder::{Disposal, EncodeError, FrameControl, FrameEncoder, LoopCount};
use crate::palette::PaletteImage;
use crate::record::{SessionReader, StreamEnd};
use crate::sampler::{padding_delay, Decision, FrameSampler, Tick};
use crate::terminal::Interpreter;

/// Animation-level settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineOptions {
    /// Loop count, 0 = infinite
    pub repeat: u16,
    /// Extra time the last frame is shown, 0 = no padding frame
    pub last_frame_delay_ms: u32,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            repeat: 0,
            last_frame_delay_ms: 300,
        }
    }
}

/// What a finished run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Record events consumed
    pub events: usize,
    /// Frames appended, the padding frame included
    pub frames: usize,
    pub padded: bool,
    /// Encoded output size in bytes
    pub size: usize,
    pub end: StreamEnd,
}

impl RunSummary {
    pub fn is_truncated(&self) -> bool {
        self.end.is_truncated()
    }
}

pub struct Pipeline<I, E> {
    interpreter: I,
    encoder: E,
    options: TimelineOptions,
    image: PaletteImage,
    frames: usize,
}

impl<I: Interpreter, E: FrameEncoder> Pipeline<I, E> {
    pub fn new(interpreter: I, encoder: E, options: TimelineOptions) -> Self {
        let (width, height) = interpreter.pixel_size();
        Self {
            interpreter,
            encoder,
            options,
            image: PaletteImage::new(width, height),
            frames: 0,
        }
    }

    /// Convert a whole record stream and return the encoded bytes.
    ///
    /// A malformed stream is not an error: the frames captured before it
    /// are kept and [`RunSummary::end`] says why reading stopped.
    pub fn run<R: Read>(mut self, reader: R) -> Result<(Vec<u8>, RunSummary), EncodeError> {
        self.encoder.set_loop(LoopCount::from(self.options.repeat))?;

        let mut records = SessionReader::new(reader);
        let baseline = records.baseline().unwrap_or(0);
        let mut sampler = FrameSampler::new(baseline);

        while let Some(event) = records.next_event() {
            self.interpreter.feed(event.payload);
            let tick = Tick {
                dirty: self.interpreter.dirty(),
                sub_state: self.interpreter.sub_state(),
            };
            if let Decision::Capture { delay_cs } = sampler.sample(event.timestamp_usec, tick) {
                self.capture(delay_cs)?;
            }
            self.interpreter.clear_dirty();
        }

        let end = records.end().cloned().unwrap_or(StreamEnd::Eof);
        if let StreamEnd::Truncated(reason) = &end {
            warn!("Record stream truncated after {} events: {reason}", records.events());
        }
        debug!(
            "Read {} events, payload buffer grew to {} bytes",
            records.events(),
            records.chunk_capacity()
        );

        let padded = match padding_delay(self.options.last_frame_delay_ms) {
            Some(delay_cs) => {
                self.append(delay_cs)?;
                true
            }
            None => false,
        };

        let frames = self.frames;
        let bytes = self.encoder.finalize()?;
        let summary = RunSummary {
            events: records.events(),
            frames,
            padded,
            size: bytes.len(),
            end,
        };
        Ok((bytes, summary))
    }

    fn capture(&mut self, delay_cs: u16) -> Result<(), EncodeError> {
        let framebuffer = self.interpreter.render();
        self.image.quantize_from(framebuffer);
        trace!("Captured frame {} ({delay_cs} cs)", self.frames);
        self.append(delay_cs)
    }

    fn append(&mut self, delay_cs: u16) -> Result<(), EncodeError> {
        self.encoder.set_frame_control(FrameControl {
            transparent: None,
            delay_cs,
            disposal: Disposal::Unspecified,
        });
        self.encoder.append_frame(&self.image)?;
        self.frames += 1;
        Ok(())
    }
}
