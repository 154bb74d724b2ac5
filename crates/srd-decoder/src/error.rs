/// Fatal parser faults — the only error the decoder ever returns.
///
/// Everything recoverable is a value, not an error: "not ready" and
/// "malformed frame" are [`Decoded`](crate::Decoded) /
/// [`Record`](crate::Record) variants so callers pattern-match instead
/// of unwinding. A `ParserFault` means the byte stream itself is
/// broken (an impossible header) and the instance must be
/// [`reset`](crate::RecordDecoder::reset) before reuse.
///
/// Error hierarchy:
///
/// ```text
///   ParserFault
///   ├── LengthNotSampleAligned  ← length field not a multiple of 8
///   ├── PayloadTooLarge         ← length field over the frame cap
///   └── Poisoned                ← operation after an unreset fault
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParserFault {
    /// The header's length field is not a whole number of samples.
    ///
    /// No writer can produce this, so the stream is desynchronized —
    /// the bytes being parsed as a header are not a header.
    #[error("payload length {len} is not a multiple of the 8-byte sample size")]
    LengthNotSampleAligned { len: u64 },

    /// The header's length field exceeds the frame sanity cap.
    #[error("payload length {len} exceeds the {max}-byte frame cap")]
    PayloadTooLarge { len: u64, max: u64 },

    /// The parser already faulted and has not been reset.
    ///
    /// Buffered bytes are left untouched after a fault; only
    /// `reset` clears them and this state.
    #[error("parser poisoned by an earlier fault; reset the decoder before reuse")]
    Poisoned,
}
