use std::io::Write;

use crate::error::WireError;
use crate::header::{ChannelSelect, FrameHeader, HEADER_SIZE, SAMPLE_SIZE};

/// Largest sample count the writer will accept.
///
/// Matches the widest decodable record (14 interleaved dual-channel
/// samples), so anything a `FrameWriter` emits can always be decoded
/// back into a shaped record rather than a malformed one.
pub const MAX_WRITABLE_SAMPLES: usize = 14;

/// Frame writer — the encode direction of the wire format.
///
/// Wire layout written per record:
///   1. `payload_len` as u64 little-endian (`samples.len() * 8`)
///   2. `channel_select` as a single byte
///   3. each sample as an f64 little-endian
///
/// The writer is strictly sequential; bytes appear on the wire in the
/// order records are written.
pub struct FrameWriter<W> {
    inner: W,
}

impl<W: Write> FrameWriter<W> {
    /// Create a writer over any `std::io::Write` sink.
    #[must_use]
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write one complete record (header + payload).
    ///
    /// # Returns
    ///
    /// Total number of bytes written: `9 + samples.len() * 8`.
    ///
    /// # Errors
    ///
    /// - [`WireError::TooManySamples`] if `samples` is wider than
    ///   [`MAX_WRITABLE_SAMPLES`].
    /// - [`WireError::Io`] on any write failure.
    pub fn write_record(
        &mut self,
        channel_select: ChannelSelect,
        samples: &[f64],
    ) -> Result<usize, WireError> {
        if samples.len() > MAX_WRITABLE_SAMPLES {
            return Err(WireError::TooManySamples {
                count: samples.len(),
                max: MAX_WRITABLE_SAMPLES,
            });
        }

        let header = FrameHeader::for_samples(channel_select, samples.len());
        let mut header_buf = [0u8; HEADER_SIZE];
        header.write_to(&mut header_buf)?;
        self.inner.write_all(&header_buf)?;

        for sample in samples {
            self.inner.write_all(&sample.to_le_bytes())?;
        }

        Ok(HEADER_SIZE + samples.len() * SAMPLE_SIZE)
    }

    /// Flush the underlying sink.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the flush fails.
    pub fn flush(&mut self) -> Result<(), WireError> {
        self.inner.flush()?;
        Ok(())
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Serialize a single record to a fresh byte vector.
///
/// Convenience for tests and fixtures; panics are impossible because
/// writing to a `Vec` cannot fail, so only [`WireError::TooManySamples`]
/// can be returned.
pub fn frame_bytes(channel_select: ChannelSelect, samples: &[f64]) -> Result<Vec<u8>, WireError> {
    let mut writer = FrameWriter::new(Vec::with_capacity(
        HEADER_SIZE + samples.len() * SAMPLE_SIZE,
    ));
    writer.write_record(channel_select, samples)?;
    Ok(writer.into_inner())
}
