//! Growable payload buffer.

use std::io::{self, Read};

/// Initial payload capacity in bytes.
pub const INITIAL_CAPACITY: usize = 2048;

/// Reusable byte buffer for record payloads.
///
/// Capacity only ever grows: a payload larger than the current capacity
/// reallocates once, smaller payloads reuse the existing allocation.
/// The allocation is released when the buffer is dropped.
#[derive(Debug)]
pub struct ChunkBuffer {
    data: Vec<u8>,
    len: usize,
}

impl ChunkBuffer {
    /// Create a buffer with [`INITIAL_CAPACITY`] bytes.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            len: 0,
        }
    }

    /// Current capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes filled by the last [`fill`](Self::fill).
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Read up to `len` bytes from `reader`, growing the buffer if needed.
    ///
    /// Returns the number of bytes actually read, which is less than `len`
    /// only when the reader hit end of stream. The buffer grows in doubling
    /// steps as bytes arrive, so a bogus `len` cannot allocate more than
    /// twice the data actually present.
    pub fn fill<R: Read>(&mut self, reader: &mut R, len: usize) -> io::Result<usize> {
        let mut filled = 0;
        self.len = 0;
        while filled < len {
            if filled == self.data.len() {
                let grown = (self.data.len() * 2).max(INITIAL_CAPACITY).min(len);
                self.data.resize(grown, 0);
            }
            let end = self.data.len().min(len);
            let n = read_full(reader, &mut self.data[filled..end])?;
            filled += n;
            if filled < end {
                break;
            }
        }
        self.len = filled;
        Ok(filled)
    }
}

impl Default for ChunkBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Like `read_exact`, but reports how many bytes were read before EOF
/// instead of failing.
pub(crate) fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_initial_capacity() {
        let buf = ChunkBuffer::new();
        assert_eq!(buf.capacity(), INITIAL_CAPACITY);
        assert!(buf.as_slice().is_empty());
    }

    #[test]
    fn grows_for_large_payload_and_never_shrinks() {
        let mut buf = ChunkBuffer::with_capacity(4);
        let big = vec![7u8; 10];
        assert_eq!(buf.fill(&mut &big[..], 10).unwrap(), 10);
        assert_eq!(buf.capacity(), 10);

        let small = [1u8, 2];
        assert_eq!(buf.fill(&mut &small[..], 2).unwrap(), 2);
        assert_eq!(buf.capacity(), 10);
        assert_eq!(buf.as_slice(), &[1, 2]);
    }

    #[test]
    fn short_read_reports_bytes_available() {
        let mut buf = ChunkBuffer::new();
        let data = [1u8, 2, 3];
        assert_eq!(buf.fill(&mut &data[..], 8).unwrap(), 3);
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn claimed_length_does_not_drive_allocation() {
        let mut buf = ChunkBuffer::new();
        let data = *b"abc";
        assert_eq!(buf.fill(&mut &data[..], 0x1000_0000).unwrap(), 3);
        assert_eq!(buf.as_slice(), b"abc");
        assert_eq!(buf.capacity(), INITIAL_CAPACITY);
    }

    #[test]
    fn grows_in_steps_up_to_exact_length() {
        let mut buf = ChunkBuffer::new();
        let big = vec![9u8; INITIAL_CAPACITY * 3];
        assert_eq!(buf.fill(&mut &big[..], big.len()).unwrap(), big.len());
        assert_eq!(buf.capacity(), big.len());
        assert_eq!(buf.as_slice(), &big[..]);
    }

    /// Reader that hands out one byte per call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn read_full_collects_partial_reads() {
        let mut reader = Trickle(b"abcd");
        let mut out = [0u8; 4];
        assert_eq!(read_full(&mut reader, &mut out).unwrap(), 4);
        assert_eq!(&out, b"abcd");
    }
}
