/// Implementation of `srd validate`.
///
/// Runs a full decode and reports a checkmark per structural property.
/// Unlike `decode`, a malformed frame is a validation failure here —
/// the command answers "is every frame in this file well-shaped?".
use std::fs;

use anyhow::{Context, Result, bail};
use srd_decoder::{Decoded, NotReady, Record, RecordDecoder};

use crate::ValidateArgs;

/// Run the `srd validate` command.
///
/// # Errors
///
/// Returns an error for unreadable files, parser faults, truncated
/// trailing frames, and malformed records.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let mut decoder = RecordDecoder::new();
    decoder.put(&bytes).context("parser fault")?;

    let mut frames = 0usize;
    loop {
        match decoder.decode().context("parser fault")? {
            Decoded::Record(Record::Malformed {
                channel_select,
                count,
            }) => {
                bail!(
                    "frame {frames} is malformed: {count} samples with \
                     channel_select=0x{channel_select:02X}"
                );
            }
            Decoded::Record(_) => frames += 1,
            Decoded::NotReady(NotReady::HeaderMissing) => break,
            Decoded::NotReady(NotReady::PayloadIncomplete { have, need }) => {
                bail!("file ends mid-frame: {have} of {need} payload bytes present");
            }
        }
    }

    if decoder.buffered() > 0 {
        bail!(
            "{} trailing bytes do not form a complete header",
            decoder.buffered()
        );
    }

    println!("\u{2713} headers parse");
    println!("\u{2713} payloads complete");
    println!("\u{2713} every frame well-shaped");
    println!("{frames} frames OK");
    Ok(())
}
