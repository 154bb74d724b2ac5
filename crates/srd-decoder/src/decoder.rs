use tracing::{debug, warn};

use crate::error::ParserFault;
use crate::parser::StreamParser;
use crate::record::{Decoded, NotReady, Record};
use crate::shaper::{ShapeLimits, shape};

/// Streaming record decoder — push raw bytes in, pull shaped records
/// out.
///
/// One decoder serves one byte stream. The model is single-threaded
/// and synchronous: `put` and `decode` are blocking, complete before
/// returning, and must not run concurrently against one instance (the
/// parser holds mutable buffered state). Independent streams get
/// independent instances; nothing is shared between them.
///
/// Decoding one call proceeds in three steps:
///
///   1. **Header**: parse the 9-byte header at the front of the
///      buffer. Absent → [`NotReady::HeaderMissing`].
///   2. **Payload**: wait for `payload_len` bytes after the header.
///      Truncated → [`NotReady::PayloadIncomplete`], nothing consumed.
///   3. **Shape**: consume the frame and demultiplex the samples by
///      the channel-select field — including [`Record::Malformed`]
///      for impossible counts, which consumes the bad frame so the
///      stream continues.
///
/// # Example
///
/// ```rust
/// use srd_decoder::{Decoded, Record, RecordDecoder};
///
/// let mut decoder = RecordDecoder::new();
/// decoder.put(&8u64.to_le_bytes()).unwrap();
/// decoder.put(&[1u8]).unwrap();
/// decoder.put(&3.5f64.to_le_bytes()).unwrap();
///
/// assert_eq!(
///     decoder.decode().unwrap(),
///     Decoded::Record(Record::Scalar(3.5))
/// );
/// ```
#[derive(Debug, Default)]
pub struct RecordDecoder {
    parser: StreamParser,
    limits: ShapeLimits,
}

impl RecordDecoder {
    /// Create a decoder with the default shape limits (7 flat, 14
    /// paired).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with custom shape limits.
    #[must_use]
    pub fn with_limits(limits: ShapeLimits) -> Self {
        Self {
            parser: StreamParser::new(),
            limits,
        }
    }

    /// Append raw stream bytes.
    ///
    /// # Errors
    ///
    /// Repeats the pending [`ParserFault`] if the instance is
    /// poisoned; reset before reuse.
    pub fn put(&mut self, bytes: &[u8]) -> Result<(), ParserFault> {
        self.parser.put(bytes)
    }

    /// Attempt to decode the next record.
    ///
    /// Returns [`Decoded::NotReady`] while the frame at the front of
    /// the buffer is incomplete; buffered state is untouched and the
    /// caller should push more bytes and retry. A complete frame is
    /// always consumed, whether it shapes cleanly or comes back
    /// [`Record::Malformed`].
    ///
    /// # Errors
    ///
    /// [`ParserFault`] when the stream itself is broken (impossible
    /// header). The fault repeats until [`reset`](Self::reset).
    pub fn decode(&mut self) -> Result<Decoded, ParserFault> {
        let Some(header) = self.parser.peek_header().inspect_err(|fault| {
            warn!(%fault, "stream fault");
        })?
        else {
            return Ok(Decoded::NotReady(NotReady::HeaderMissing));
        };

        let Some(samples) = self.parser.take_payload(&header)? else {
            return Ok(Decoded::NotReady(NotReady::PayloadIncomplete {
                have: self.parser.payload_buffered(),
                need: header.payload_len as usize,
            }));
        };

        debug!(
            count = samples.len(),
            channel = %header.channel_select,
            "frame complete"
        );

        let record = shape(header.channel_select, &samples, self.limits);
        if let Record::Malformed {
            channel_select,
            count,
        } = record
        {
            warn!(count, channel_select, "malformed frame consumed");
        }
        Ok(Decoded::Record(record))
    }

    /// Decode until the stream runs dry, collecting completed records.
    ///
    /// Stops at the first `NotReady` — the remaining partial frame (if
    /// any) stays buffered for a later push. Malformed records are
    /// collected like any other.
    ///
    /// # Errors
    ///
    /// Stops and returns the [`ParserFault`] if one is hit; records
    /// decoded before the fault are lost, which is acceptable because
    /// a faulted stream needs a reset anyway.
    pub fn drain(&mut self) -> Result<Vec<Record>, ParserFault> {
        let mut records = Vec::new();
        loop {
            match self.decode()? {
                Decoded::Record(record) => records.push(record),
                Decoded::NotReady(_) => return Ok(records),
            }
        }
    }

    /// Bytes currently buffered and not yet consumed by a frame.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.parser.buffered()
    }

    /// True once a fault has been recorded and not yet reset.
    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        self.parser.is_poisoned()
    }

    /// Discard all buffered partial state and any recorded fault.
    ///
    /// Deterministic: no record survives a reset. The next `put`
    /// starts a brand-new stream from scratch.
    pub fn reset(&mut self) {
        self.parser.reset();
    }
}

#[cfg(test)]
mod tests {
    use srd_wire::frame::frame_bytes;
    use srd_wire::header::ChannelSelect;

    use super::*;

    #[test]
    fn cold_start_reports_header_missing() {
        let mut decoder = RecordDecoder::new();
        assert_eq!(
            decoder.decode().unwrap(),
            Decoded::NotReady(NotReady::HeaderMissing)
        );
    }

    #[test]
    fn truncated_payload_reports_progress() {
        let mut decoder = RecordDecoder::new();
        let frame = frame_bytes(ChannelSelect::CH1, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        decoder.put(&frame[..9 + 16]).unwrap();

        assert_eq!(
            decoder.decode().unwrap(),
            Decoded::NotReady(NotReady::PayloadIncomplete { have: 16, need: 32 })
        );
        // Retry after the rest arrives; nothing was lost.
        decoder.put(&frame[9 + 16..]).unwrap();
        assert_eq!(
            decoder.decode().unwrap(),
            Decoded::Record(Record::Flat(vec![1.0, 2.0, 3.0, 4.0]))
        );
    }

    #[test]
    fn zero_length_frame_is_empty_record() {
        let mut decoder = RecordDecoder::new();
        decoder.put(&frame_bytes(ChannelSelect::CH2, &[]).unwrap()).unwrap();

        assert_eq!(decoder.decode().unwrap(), Decoded::Record(Record::Empty));
        assert_eq!(decoder.buffered(), 0);
    }

    #[test]
    fn malformed_frame_is_consumed_and_stream_continues() {
        let mut decoder = RecordDecoder::new();
        // 5 samples on both channels: odd, malformed.
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0];
        decoder
            .put(&frame_bytes(ChannelSelect::from_raw(9), &samples).unwrap())
            .unwrap();
        decoder
            .put(&frame_bytes(ChannelSelect::CH1, &[6.5]).unwrap())
            .unwrap();

        assert_eq!(
            decoder.decode().unwrap(),
            Decoded::Record(Record::Malformed {
                channel_select: 9,
                count: 5
            })
        );
        assert_eq!(
            decoder.decode().unwrap(),
            Decoded::Record(Record::Scalar(6.5))
        );
    }

    #[test]
    fn drain_stops_at_partial_frame() {
        let mut decoder = RecordDecoder::new();
        decoder
            .put(&frame_bytes(ChannelSelect::CH1, &[1.0]).unwrap())
            .unwrap();
        decoder
            .put(&frame_bytes(ChannelSelect::CH2, &[2.0, 3.0]).unwrap())
            .unwrap();
        // A dangling header with no payload yet.
        decoder.put(&16u64.to_le_bytes()).unwrap();
        decoder.put(&[1u8]).unwrap();

        let records = decoder.drain().unwrap();
        assert_eq!(
            records,
            vec![Record::Scalar(1.0), Record::Flat(vec![2.0, 3.0])]
        );
        assert_eq!(decoder.buffered(), 9);
    }

    #[test]
    fn custom_limits_flow_through() {
        let mut decoder = RecordDecoder::with_limits(ShapeLimits {
            max_flat: 9,
            max_paired: 14,
        });
        let samples: Vec<f64> = (0..9).map(f64::from).collect();
        decoder
            .put(&frame_bytes(ChannelSelect::CH1, &samples).unwrap())
            .unwrap();

        assert_eq!(
            decoder.decode().unwrap(),
            Decoded::Record(Record::Flat(samples))
        );
    }
}
