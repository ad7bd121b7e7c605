//! Byte-source capability boundary for the two I/O disciplines.

use std::io::{self, Read};

use bytes::{Bytes, BytesMut};

/// Capability interface over a connection's read direction.
///
/// Selected once at session construction, never branched on again: buffered
/// sources report how many bytes are immediately obtainable so the codec
/// can fail insufficiency checks without consuming anything, while
/// streaming sources block until the requested count is delivered. A source
/// is exclusively owned by its session for the connection's lifetime.
pub trait FrameSource {
    /// Bytes obtainable right now without blocking, or `None` when the
    /// source only supports blocking reads.
    fn available(&self) -> Option<usize>;

    /// Obtain exactly `len` bytes, consuming them from the source.
    fn take(&mut self, len: usize) -> io::Result<Bytes>;
}

/// Fully-buffered source fed by the caller.
///
/// Arriving bytes are appended with [`feed`](Self::feed). Insufficiency is
/// checked against the buffered count before anything is consumed, so a
/// failed check leaves the buffer untouched and the caller can retry the
/// same frame boundary once more input has arrived.
#[derive(Debug, Default)]
pub struct BufferedSource {
    buf: BytesMut,
}

impl BufferedSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes that arrived on the connection.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Currently buffered byte count.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }
}

impl FrameSource for BufferedSource {
    fn available(&self) -> Option<usize> {
        Some(self.buf.len())
    }

    fn take(&mut self, len: usize) -> io::Result<Bytes> {
        if self.buf.len() < len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "buffered source holds {} of {len} requested bytes",
                    self.buf.len()
                ),
            ));
        }
        Ok(self.buf.split_to(len).freeze())
    }
}

/// Streaming source with guaranteed-delivery reads.
///
/// [`take`](FrameSource::take) blocks the calling thread until the
/// requested count is satisfied, topping up on short reads. End of stream
/// before that is a hard failure; no partial result is ever surfaced.
#[derive(Debug)]
pub struct StreamingSource<R> {
    inner: R,
}

impl<R: Read> StreamingSource<R> {
    /// Wrap a blocking reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read> FrameSource for StreamingSource<R> {
    fn available(&self) -> Option<usize> {
        None
    }

    fn take(&mut self, len: usize) -> io::Result<Bytes> {
        let mut buf = vec![0u8; len];
        let mut filled = 0;
        while filled < len {
            let n = self.inner.read(&mut buf[filled..])?;
            if n == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("source exhausted after {filled} of {len} bytes"),
                ));
            }
            filled += n;
        }
        Ok(Bytes::from(buf))
    }
}
