//! Frame capture decisions and GIF delay arithmetic.
//!
//! Delays are computed from record timestamps, never from wall-clock time,
//! and expressed in centiseconds (the GIF delay unit). Conversions truncate.

use crate::terminal::SubState;

const USEC_PER_CENTI: i64 = 10_000;
const MSEC_PER_CENTI: u32 = 10;

/// Interpreter feedback after one payload was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub dirty: bool,
    pub sub_state: SubState,
}

/// Outcome of sampling one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Leave the timeline untouched
    Skip,
    /// Capture a frame shown for `delay_cs` centiseconds
    Capture { delay_cs: u16 },
}

/// Decides which ticks become frames.
///
/// A frame is captured unless the interpreter is in the middle of a
/// multi-step sequence and reported no visible change, which keeps
/// half-applied sequences out of the animation.
#[derive(Debug, Clone)]
pub struct FrameSampler {
    prev_capture_usec: i64,
}

impl FrameSampler {
    /// Start sampling from the stream's baseline timestamp.
    pub fn new(baseline_usec: i64) -> Self {
        Self {
            prev_capture_usec: baseline_usec,
        }
    }

    /// Timestamp of the last capture (or the baseline).
    pub fn prev_capture_usec(&self) -> i64 {
        self.prev_capture_usec
    }

    /// Sample one tick observed at `now_usec`.
    pub fn sample(&mut self, now_usec: i64, tick: Tick) -> Decision {
        if !should_capture(tick) {
            return Decision::Skip;
        }
        let delay_cs = usec_to_centis(now_usec.saturating_sub(self.prev_capture_usec));
        self.prev_capture_usec = now_usec;
        Decision::Capture { delay_cs }
    }
}

/// The capture rule on its own.
pub fn should_capture(tick: Tick) -> bool {
    tick.sub_state != SubState::MidSequence || tick.dirty
}

/// Microseconds to centiseconds, clamped to the GIF delay range.
pub fn usec_to_centis(usec: i64) -> u16 {
    (usec / USEC_PER_CENTI).clamp(0, i64::from(u16::MAX)) as u16
}

/// Milliseconds to centiseconds, saturating at the GIF delay range.
pub fn millis_to_centis(millis: u32) -> u16 {
    (millis / MSEC_PER_CENTI).min(u32::from(u16::MAX)) as u16
}

/// Delay of the trailing padding frame, if one is configured.
pub fn padding_delay(last_frame_delay_ms: u32) -> Option<u16> {
    (last_frame_delay_ms > 0).then(|| millis_to_centis(last_frame_delay_ms))
}
