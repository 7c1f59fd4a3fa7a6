//! ttyrec record stream reader.
//!
//! The stream is a sequence of little-endian `i32` fields:
//!
//! ```text
//! sec, usec                      baseline timestamp
//! { length, payload[length],     terminal output
//!   sec, usec }*                 timestamp of the next record
//! ```
//!
//! Each [`RecordEvent`] pairs a payload with the timestamp that follows it,
//! which is the moment the screen produced by that payload stops being
//! current. A short read or a non-positive length ends the stream; this is
//! not an error, the reader just stops and remembers why in [`StreamEnd`].

mod buffer;

use std::fmt;
use std::io::{self, Read};

pub use buffer::{ChunkBuffer, INITIAL_CAPACITY};

use buffer::read_full;

/// One payload together with its lookahead timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordEvent<'a> {
    /// Timestamp in microseconds of the record following this payload
    pub timestamp_usec: i64,
    /// Raw terminal output bytes
    pub payload: &'a [u8],
}

/// Record field being read when the stream stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Timestamp,
    Length,
    Payload,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordField::Timestamp => write!(f, "timestamp"),
            RecordField::Length => write!(f, "length"),
            RecordField::Payload => write!(f, "payload"),
        }
    }
}

/// Why a record could not be read completely.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TruncatedRecord {
    #[error("short {field}: expected {expected} bytes, got {got}")]
    ShortRead {
        field: RecordField,
        expected: usize,
        got: usize,
    },

    #[error("invalid payload length {0}")]
    BadLength(i32),

    #[error("read error in {field}: {message}")]
    Io { field: RecordField, message: String },
}

/// How the record stream ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEnd {
    /// End of input exactly where a timestamp was expected
    Eof,
    /// A record was malformed or cut short
    Truncated(TruncatedRecord),
}

impl StreamEnd {
    pub fn is_truncated(&self) -> bool {
        matches!(self, StreamEnd::Truncated(_))
    }
}

/// Forward-only, lazy reader over a ttyrec stream.
///
/// Payloads borrow an internal [`ChunkBuffer`], so each event must be
/// consumed before the next one is pulled.
pub struct SessionReader<R> {
    reader: R,
    chunk: ChunkBuffer,
    baseline: Option<i64>,
    started: bool,
    end: Option<StreamEnd>,
    events: usize,
}

impl<R: Read> SessionReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            chunk: ChunkBuffer::new(),
            baseline: None,
            started: false,
            end: None,
            events: 0,
        }
    }

    /// Baseline timestamp, reading it on first call.
    ///
    /// Returns `None` if the stream does not even start with a timestamp.
    pub fn baseline(&mut self) -> Option<i64> {
        if !self.started {
            self.started = true;
            match self.read_timestamp() {
                Ok(ts) => self.baseline = Some(ts),
                Err(end) => self.end = Some(end),
            }
        }
        self.baseline
    }

    /// Pull the next event, or `None` once the stream has ended.
    pub fn next_event(&mut self) -> Option<RecordEvent<'_>> {
        self.baseline()?;
        if self.end.is_some() {
            return None;
        }

        match self.read_record() {
            Ok(timestamp_usec) => {
                self.events += 1;
                Some(RecordEvent {
                    timestamp_usec,
                    payload: self.chunk.as_slice(),
                })
            }
            Err(end) => {
                self.end = Some(end);
                None
            }
        }
    }

    /// Why the stream stopped, once it has.
    pub fn end(&self) -> Option<&StreamEnd> {
        self.end.as_ref()
    }

    /// Number of events yielded so far.
    pub fn events(&self) -> usize {
        self.events
    }

    /// Current payload buffer capacity.
    pub fn chunk_capacity(&self) -> usize {
        self.chunk.capacity()
    }

    fn read_record(&mut self) -> Result<i64, StreamEnd> {
        let len = self.read_i32(RecordField::Length)?;
        if len <= 0 {
            return Err(StreamEnd::Truncated(TruncatedRecord::BadLength(len)));
        }

        let len = len as usize;
        let got = self
            .chunk
            .fill(&mut self.reader, len)
            .map_err(|e| io_end(RecordField::Payload, &e))?;
        if got != len {
            return Err(StreamEnd::Truncated(TruncatedRecord::ShortRead {
                field: RecordField::Payload,
                expected: len,
                got,
            }));
        }

        self.read_timestamp()
    }

    /// Read `sec, usec`. Zero bytes available is a clean end of stream.
    fn read_timestamp(&mut self) -> Result<i64, StreamEnd> {
        let mut raw = [0u8; 8];
        let got = read_full(&mut self.reader, &mut raw)
            .map_err(|e| io_end(RecordField::Timestamp, &e))?;
        match got {
            0 => Err(StreamEnd::Eof),
            8 => {
                let sec = i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
                let usec = i32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]);
                Ok(i64::from(sec) * 1_000_000 + i64::from(usec))
            }
            got => Err(StreamEnd::Truncated(TruncatedRecord::ShortRead {
                field: RecordField::Timestamp,
                expected: 8,
                got,
            })),
        }
    }

    fn read_i32(&mut self, field: RecordField) -> Result<i32, StreamEnd> {
        let mut raw = [0u8; 4];
        let got = read_full(&mut self.reader, &mut raw).map_err(|e| io_end(field, &e))?;
        if got != raw.len() {
            return Err(StreamEnd::Truncated(TruncatedRecord::ShortRead {
                field,
                expected: raw.len(),
                got,
            }));
        }
        Ok(i32::from_le_bytes(raw))
    }
}

fn io_end(field: RecordField, err: &io::Error) -> StreamEnd {
    StreamEnd::Truncated(TruncatedRecord::Io {
        field,
        message: err.to_string(),
    })
}

/// Serialize records into the ttyrec layout.
///
/// Each `(sec, usec, payload)` produces the standard ttyrec header and body,
/// which is the same byte sequence the reader consumes.
pub fn encode_records(records: &[(i32, i32, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    for (sec, usec, payload) in records {
        out.extend_from_slice(&sec.to_le_bytes());
        out.extend_from_slice(&usec.to_le_bytes());
        out.extend_from_slice(&(payload.len() as i32).to_le_bytes());
        out.extend_from_slice(payload);
    }
    out
}
