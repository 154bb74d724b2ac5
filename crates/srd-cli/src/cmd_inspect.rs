/// Implementation of `srd inspect`.
///
/// Walks the stream frame by frame at the wire level and prints a
/// structured summary to stdout. When `--frame N` is given, only the
/// frame at index N is shown.
///
/// # Output format
///
/// ```text
/// Frame 0: offset 0x0000 ch1       1 sample   (8 bytes)  → Scalar
/// Frame 1: offset 0x0011 both(0x09) 4 samples (32 bytes) → Paired
/// Frame 2: offset 0x003A ch2       5 samples  (40 bytes) → Flat
/// ---
/// 3 frames, 80 payload bytes
/// ```
use std::fs;

use anyhow::{Context, Result};
use srd_decoder::{Record, ShapeLimits, shape};
use srd_wire::header::{FrameHeader, HEADER_SIZE, SAMPLE_SIZE};

use crate::InspectArgs;

/// Run the `srd inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a frame header is
/// structurally impossible (bad length field).
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let mut offset = 0usize;
    let mut index = 0usize;
    let mut payload_total = 0usize;

    while offset < bytes.len() {
        let Some((header, _)) = FrameHeader::read_from(&bytes[offset..])
            .with_context(|| format!("impossible header in frame {index} at offset {offset:#06X}"))?
        else {
            println!("---");
            println!(
                "trailing partial frame: {} of {} header bytes at offset {:#06X}",
                bytes.len() - offset,
                HEADER_SIZE,
                offset
            );
            return Ok(());
        };

        let payload_len = header.payload_len as usize;
        let frame_end = offset + HEADER_SIZE + payload_len;
        if frame_end > bytes.len() {
            println!("---");
            println!(
                "trailing partial frame {index} at offset {offset:#06X}: {} of {payload_len} payload bytes",
                bytes.len() - offset - HEADER_SIZE,
            );
            return Ok(());
        }

        if args.frame.is_none_or(|target| target == index) {
            let samples = decode_samples(&bytes[offset + HEADER_SIZE..frame_end]);
            let record = shape(header.channel_select, &samples, ShapeLimits::default());
            println!(
                "Frame {index}: offset {offset:#06X} {:<10} {:>2} sample{} ({} bytes) \u{2192} {}",
                header.channel_select.to_string(),
                samples.len(),
                if samples.len() == 1 { " " } else { "s" },
                payload_len,
                shape_label(&record),
            );
        }

        payload_total += payload_len;
        offset = frame_end;
        index += 1;
    }

    println!("---");
    println!("{index} frames, {payload_total} payload bytes");
    Ok(())
}

/// Decode a complete payload slice into little-endian f64 samples.
fn decode_samples(payload: &[u8]) -> Vec<f64> {
    payload
        .chunks_exact(SAMPLE_SIZE)
        .map(|chunk| {
            let mut raw = [0u8; SAMPLE_SIZE];
            raw.copy_from_slice(chunk);
            f64::from_le_bytes(raw)
        })
        .collect()
}

/// Short label for the shape a record decodes to.
fn shape_label(record: &Record) -> &'static str {
    match record {
        Record::Empty => "Empty",
        Record::Scalar(_) => "Scalar",
        Record::Flat(_) => "Flat",
        Record::Paired { .. } => "Paired",
        Record::Malformed { .. } => "MALFORMED",
    }
}
