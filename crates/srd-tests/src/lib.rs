//! Shared byte-level fixture builders for the SRD integration tests
//! and benchmarks.
//!
//! Frames are assembled by hand here — independently of
//! [`srd_wire::frame::FrameWriter`] — so the integration suite checks
//! the decoder against the wire layout itself, not against the
//! writer's idea of it.

/// Build one wire frame: `[u64 LE payload_len][u8 channel][samples]`.
#[must_use]
pub fn frame(channel: u8, samples: &[f64]) -> Vec<u8> {
    let mut bytes = ((samples.len() * 8) as u64).to_le_bytes().to_vec();
    bytes.push(channel);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

/// Concatenate frames into one contiguous stream.
#[must_use]
pub fn stream(frames: &[Vec<u8>]) -> Vec<u8> {
    frames.concat()
}

/// A run of `count` ascending samples, `0.0, 1.0, …`.
#[must_use]
pub fn ascending(count: usize) -> Vec<f64> {
    (0..count).map(|i| i as f64).collect()
}
