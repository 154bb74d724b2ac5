use bytes::{Buf, BytesMut};
use srd_wire::WireError;
use srd_wire::header::{FrameHeader, HEADER_SIZE};
use tracing::trace;

use crate::error::ParserFault;

/// Incremental stream parser — the byte-buffering half of the decoder.
///
/// Accumulates pushed bytes in a single growable buffer and parses the
/// frame at the front of it on demand. Nothing is consumed until a
/// complete frame (header + full payload) is available, so a decode
/// attempt against a truncated frame loses no state: the caller pushes
/// more bytes and retries.
///
/// A fault (an impossible header at the front of the buffer) poisons
/// the parser: every subsequent operation repeats the fault until
/// [`reset`](Self::reset). Buffered bytes are only discarded by reset,
/// never by the fault itself.
#[derive(Debug, Default)]
pub struct StreamParser {
    buf: BytesMut,
    fault: Option<ParserFault>,
}

impl StreamParser {
    /// Create a parser with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes to the internal buffer.
    ///
    /// Append-only: repeated calls never reorder. The bytes are not
    /// inspected here; faults are detected when the header is parsed.
    ///
    /// # Errors
    ///
    /// Repeats the pending [`ParserFault`] if the parser is poisoned.
    pub fn put(&mut self, bytes: &[u8]) -> Result<(), ParserFault> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        self.buf.extend_from_slice(bytes);
        trace!(
            appended = bytes.len(),
            buffered = self.buf.len(),
            "bytes accepted"
        );
        Ok(())
    }

    /// Parse the frame header at the front of the buffer without
    /// consuming anything.
    ///
    /// Returns `Ok(None)` when fewer than 9 bytes are buffered. Both
    /// header fields come from one parse pass, so whenever the length
    /// field is available the channel-select field is too.
    ///
    /// # Errors
    ///
    /// An impossible length field poisons the parser and returns the
    /// fault; so does any operation after an unreset fault.
    pub fn peek_header(&mut self) -> Result<Option<FrameHeader>, ParserFault> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        match FrameHeader::read_from(&self.buf) {
            Ok(None) => Ok(None),
            Ok(Some((header, _))) => Ok(Some(header)),
            Err(e) => Err(self.poison(&e)),
        }
    }

    /// Consume the frame described by `header` and decode its samples.
    ///
    /// Returns `Ok(None)` — consuming nothing — while fewer than
    /// `payload_len` bytes follow the header. On success the whole
    /// frame (header included) is removed from the buffer and the
    /// payload is returned as little-endian `f64` values.
    ///
    /// `header` must be the value returned by the immediately
    /// preceding [`peek_header`](Self::peek_header) call.
    ///
    /// # Errors
    ///
    /// Repeats the pending [`ParserFault`] if the parser is poisoned.
    pub fn take_payload(&mut self, header: &FrameHeader) -> Result<Option<Vec<f64>>, ParserFault> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        let payload_len = header.payload_len as usize;
        if self.buf.len() < HEADER_SIZE + payload_len {
            return Ok(None);
        }

        self.buf.advance(HEADER_SIZE);
        let mut samples = Vec::with_capacity(header.sample_count());
        for _ in 0..header.sample_count() {
            samples.push(self.buf.get_f64_le());
        }
        Ok(Some(samples))
    }

    /// Payload bytes currently buffered past the header, for
    /// truncation diagnostics.
    #[must_use]
    pub fn payload_buffered(&self) -> usize {
        self.buf.len().saturating_sub(HEADER_SIZE)
    }

    /// Total bytes currently buffered.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// True once a fault has been recorded and not yet reset.
    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        self.fault.is_some()
    }

    /// Discard all buffered bytes and any recorded fault, returning
    /// the parser to its freshly-initialized condition.
    pub fn reset(&mut self) {
        trace!(discarded = self.buf.len(), "parser reset");
        self.buf.clear();
        self.fault = None;
    }

    /// Record a wire-level header fault and return it as a
    /// [`ParserFault`].
    fn poison(&mut self, error: &WireError) -> ParserFault {
        let fault = match *error {
            WireError::LengthNotSampleAligned { len } => {
                ParserFault::LengthNotSampleAligned { len }
            }
            WireError::PayloadTooLarge { len, max } => ParserFault::PayloadTooLarge { len, max },
            // Header parsing over an in-memory slice has no other
            // failure mode; anything else still poisons the stream.
            _ => ParserFault::Poisoned,
        };
        self.fault = Some(fault);
        fault
    }
}

#[cfg(test)]
mod tests {
    use srd_wire::header::ChannelSelect;

    use super::*;

    fn header_bytes(payload_len: u64, channel: u8) -> Vec<u8> {
        let mut bytes = payload_len.to_le_bytes().to_vec();
        bytes.push(channel);
        bytes
    }

    #[test]
    fn no_header_until_nine_bytes() {
        let mut parser = StreamParser::new();
        parser.put(&[0u8; 8]).unwrap();
        assert!(parser.peek_header().unwrap().is_none());

        parser.put(&[1u8]).unwrap();
        let header = parser.peek_header().unwrap().unwrap();
        assert_eq!(header.payload_len, 0);
        assert_eq!(header.channel_select, ChannelSelect::CH1);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut parser = StreamParser::new();
        parser.put(&header_bytes(0, 1)).unwrap();

        let first = parser.peek_header().unwrap().unwrap();
        let second = parser.peek_header().unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(parser.buffered(), HEADER_SIZE);
    }

    #[test]
    fn take_payload_waits_for_full_frame() {
        let mut parser = StreamParser::new();
        parser.put(&header_bytes(16, 1)).unwrap();
        parser.put(&1.5f64.to_le_bytes()).unwrap();

        let header = parser.peek_header().unwrap().unwrap();
        // Only 8 of 16 payload bytes buffered: nothing is consumed.
        assert!(parser.take_payload(&header).unwrap().is_none());
        assert_eq!(parser.buffered(), HEADER_SIZE + 8);

        parser.put(&2.5f64.to_le_bytes()).unwrap();
        let samples = parser.take_payload(&header).unwrap().unwrap();
        assert_eq!(samples, vec![1.5, 2.5]);
        assert_eq!(parser.buffered(), 0);
    }

    #[test]
    fn bad_length_poisons_until_reset() {
        let mut parser = StreamParser::new();
        parser.put(&header_bytes(13, 1)).unwrap();

        assert_eq!(
            parser.peek_header(),
            Err(ParserFault::LengthNotSampleAligned { len: 13 })
        );
        // The fault repeats on every operation...
        assert!(parser.put(&[0u8]).is_err());
        assert!(parser.peek_header().is_err());
        assert!(parser.is_poisoned());

        // ...until reset clears both fault and buffer.
        parser.reset();
        assert!(!parser.is_poisoned());
        assert_eq!(parser.buffered(), 0);
        parser.put(&header_bytes(0, 2)).unwrap();
        assert!(parser.peek_header().unwrap().is_some());
    }

    #[test]
    fn reset_discards_partial_frame() {
        let mut parser = StreamParser::new();
        parser.put(&header_bytes(32, 1)).unwrap();
        parser.put(&[0u8; 16]).unwrap();

        parser.reset();
        assert_eq!(parser.buffered(), 0);
        assert!(parser.peek_header().unwrap().is_none());
    }
}
