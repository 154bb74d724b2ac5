/// Implementation of `srd decode`.
///
/// Streams the file through a [`RecordDecoder`] and prints one record
/// per line, either human-readable (the default) or as JSON documents
/// (`--json`). Malformed frames go to stderr and decoding continues;
/// only a parser fault aborts.
use std::fs;

use anyhow::{Context, Result, bail};
use srd_decoder::{Decoded, NotReady, Record, RecordDecoder};

use crate::DecodeArgs;

/// Run the `srd decode` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the stream carries
/// an impossible header (parser fault).
pub fn run(args: &DecodeArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let mut decoder = RecordDecoder::new();
    decoder
        .put(&bytes)
        .with_context(|| format!("parser rejected {}", args.file.display()))?;

    loop {
        match decoder.decode().context("stream fault")? {
            Decoded::Record(record) => {
                if let Record::Malformed {
                    channel_select,
                    count,
                } = record
                {
                    eprintln!(
                        "warning: malformed frame skipped \
                         ({count} samples, channel_select=0x{channel_select:02X})"
                    );
                    continue;
                }
                if args.json {
                    println!("{}", to_json(&record));
                } else {
                    println!("{record}");
                }
            }
            Decoded::NotReady(NotReady::HeaderMissing) => break,
            Decoded::NotReady(NotReady::PayloadIncomplete { have, need }) => {
                bail!("file ends mid-frame: {have} of {need} payload bytes present");
            }
        }
    }

    if decoder.buffered() > 0 {
        eprintln!(
            "warning: {} trailing bytes do not form a complete header",
            decoder.buffered()
        );
    }
    Ok(())
}

/// Render a record as a single JSON document.
///
/// Scalars become a bare number, flat records an array, paired records
/// a two-element array of per-channel arrays, and empty records an
/// empty array. Malformed records are filtered out before this point.
fn to_json(record: &Record) -> serde_json::Value {
    match record {
        Record::Empty => serde_json::json!([]),
        Record::Scalar(value) => serde_json::json!(value),
        Record::Flat(values) => serde_json::json!(values),
        Record::Paired { a, b } => serde_json::json!([a, b]),
        Record::Malformed {
            channel_select,
            count,
        } => serde_json::json!({
            "malformed": { "count": count, "channel_select": channel_select }
        }),
    }
}
