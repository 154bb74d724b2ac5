use crate::error::WireError;

/// Size of one wire sample: a little-endian IEEE-754 `f64`.
pub const SAMPLE_SIZE: usize = 8;

/// Total header size in bytes (fixed): `u64` payload length + `u8`
/// channel select. The two fields parse atomically — once the length
/// field is readable, the channel field is readable from the same pass.
pub const HEADER_SIZE: usize = 9;

/// Sanity cap on the payload-length field.
///
/// The largest meaningful record is 14 samples (dual-channel cap), so a
/// header claiming megabytes of payload is a desynchronized stream, not
/// a frame we should sit and buffer for. The cap is deliberately far
/// above any real record so raising the shaping limits never trips it.
pub const MAX_PAYLOAD_BYTES: u64 = 64 * 1024;

/// Channel-select field — the second header field, one byte on the wire.
///
/// Wire values:
///   1     = channel 1 only
///   2     = channel 2 only
///   other = both channels, samples interleaved A,B,A,B,…
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelSelect(u8);

/// How many logical channels a frame carries, derived from the raw
/// channel-select byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelMode {
    /// Exactly one channel active; samples are a flat run.
    Single,
    /// Both channels active; samples alternate by channel.
    Both,
}

impl ChannelSelect {
    /// Channel 1 only.
    pub const CH1: Self = Self(1);

    /// Channel 2 only.
    pub const CH2: Self = Self(2);

    /// Create from the raw wire byte.
    #[must_use]
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Get the underlying wire byte.
    #[must_use]
    pub fn raw(self) -> u8 {
        self.0
    }

    /// True when exactly one channel is active (wire value 1 or 2).
    #[must_use]
    pub fn is_single(self) -> bool {
        self.0 == 1 || self.0 == 2
    }

    /// Classify the raw byte into a channel mode.
    ///
    /// Every byte other than 1 and 2 means "both channels" — that is
    /// the observed wire behavior, there is no invalid value.
    #[must_use]
    pub fn mode(self) -> ChannelMode {
        if self.is_single() {
            ChannelMode::Single
        } else {
            ChannelMode::Both
        }
    }
}

impl std::fmt::Display for ChannelSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mode() {
            ChannelMode::Single => write!(f, "ch{}", self.0),
            ChannelMode::Both => write!(f, "both(0x{:02X})", self.0),
        }
    }
}

/// Frame header — the first 9 bytes of every frame.
///
/// ```text
/// ┌────────┬─────────┬─────────────────────────────────────┐
/// │ Offset │ Size    │ Description                         │
/// ├────────┼─────────┼─────────────────────────────────────┤
/// │ 0x00   │ 8 bytes │ payload_len (u64 LE, multiple of 8) │
/// │ 0x08   │ 1 byte  │ channel_select                      │
/// └────────┴─────────┴─────────────────────────────────────┘
/// ```
///
/// `payload_len` counts the bytes that follow the header; the sample
/// count is always `payload_len / 8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    pub payload_len: u64,
    pub channel_select: ChannelSelect,
}

impl FrameHeader {
    /// Create a header for a record of `count` samples.
    #[must_use]
    pub fn for_samples(channel_select: ChannelSelect, count: usize) -> Self {
        Self {
            payload_len: (count * SAMPLE_SIZE) as u64,
            channel_select,
        }
    }

    /// Number of f64 samples the payload holds.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        (self.payload_len / SAMPLE_SIZE as u64) as usize
    }

    /// Parse a header from the front of `buf` without consuming it.
    ///
    /// Returns `Ok(Some((header, HEADER_SIZE)))` on success and
    /// `Ok(None)` when fewer than [`HEADER_SIZE`] bytes are available —
    /// that is the "push more bytes and retry" signal, not an error.
    ///
    /// # Errors
    ///
    /// - [`WireError::LengthNotSampleAligned`] if the length field is
    ///   not a multiple of 8.
    /// - [`WireError::PayloadTooLarge`] if it exceeds
    ///   [`MAX_PAYLOAD_BYTES`].
    pub fn read_from(buf: &[u8]) -> Result<Option<(Self, usize)>, WireError> {
        if buf.len() < HEADER_SIZE {
            return Ok(None);
        }

        let mut len_bytes = [0u8; 8];
        len_bytes.copy_from_slice(&buf[0..8]);
        let payload_len = u64::from_le_bytes(len_bytes);
        let channel_select = ChannelSelect::from_raw(buf[8]);

        if payload_len % SAMPLE_SIZE as u64 != 0 {
            return Err(WireError::LengthNotSampleAligned { len: payload_len });
        }
        if payload_len > MAX_PAYLOAD_BYTES {
            return Err(WireError::PayloadTooLarge {
                len: payload_len,
                max: MAX_PAYLOAD_BYTES,
            });
        }

        Ok(Some((
            Self {
                payload_len,
                channel_select,
            },
            HEADER_SIZE,
        )))
    }

    /// Write the 9-byte header into the provided buffer.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if `buf` is shorter than
    /// [`HEADER_SIZE`].
    pub fn write_to(&self, buf: &mut [u8]) -> Result<usize, WireError> {
        if buf.len() < HEADER_SIZE {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        }

        buf[0..8].copy_from_slice(&self.payload_len.to_le_bytes());
        buf[8] = self.channel_select.raw();

        Ok(HEADER_SIZE)
    }
}
