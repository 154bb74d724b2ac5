#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete header or payload could be written.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// The payload-length field is not a whole number of f64 samples.
    ///
    /// Every valid frame carries `payload_len % 8 == 0`. Anything else
    /// cannot have come from a well-formed writer and usually means the
    /// stream is desynchronized.
    #[error("payload length {len} is not a multiple of the 8-byte sample size")]
    LengthNotSampleAligned { len: u64 },

    /// The payload-length field exceeds the sanity cap.
    ///
    /// A desynchronized stream read as a header tends to produce a huge
    /// length value; treating it as "keep buffering" would make the
    /// decoder wait forever, so it is rejected outright.
    #[error("payload length {len} exceeds the {max}-byte frame cap")]
    PayloadTooLarge { len: u64, max: u64 },

    /// A record was handed to the writer with more samples than any
    /// decoder shape admits.
    #[error("record has {count} samples, more than the writable maximum of {max}")]
    TooManySamples { count: usize, max: usize },

    /// I/O error during read or write.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
