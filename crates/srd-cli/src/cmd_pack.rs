/// Implementation of `srd pack`.
///
/// Reads a JSON manifest (an array of `{channels, samples}` objects)
/// and writes the corresponding binary record stream. The inverse of
/// `srd decode --json` for well-formed streams.
use std::fs;
use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use srd_wire::frame::FrameWriter;
use srd_wire::header::ChannelSelect;
use tracing::debug;

use crate::PackArgs;

/// One record in the pack manifest.
#[derive(Deserialize)]
struct ManifestRecord {
    channels: Channels,
    samples: Vec<f64>,
}

/// The `channels` manifest field: a raw channel-select byte, or the
/// string `"both"` for dual-channel records.
#[derive(Deserialize)]
#[serde(untagged)]
enum Channels {
    Byte(u8),
    Name(String),
}

impl Channels {
    /// Conventional select byte packed for `"both"` — any value other
    /// than 1 or 2 means dual-channel on the wire.
    const BOTH_BYTE: u8 = 3;

    fn to_select(&self) -> Result<ChannelSelect> {
        match self {
            Channels::Byte(raw) => Ok(ChannelSelect::from_raw(*raw)),
            Channels::Name(name) if name == "both" => {
                Ok(ChannelSelect::from_raw(Self::BOTH_BYTE))
            }
            Channels::Name(name) => bail!("unknown channels value {name:?} (use 1, 2, or \"both\")"),
        }
    }
}

/// Run the `srd pack` command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed, a
/// record is wider than the wire format admits, or the output cannot
/// be written.
pub fn run(args: &PackArgs) -> Result<()> {
    let manifest =
        fs::read(&args.input).with_context(|| format!("cannot read {}", args.input.display()))?;
    let records: Vec<ManifestRecord> =
        serde_json::from_slice(&manifest).context("manifest is not a JSON record array")?;

    let out = File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;
    let mut writer = FrameWriter::new(BufWriter::new(out));

    let mut total = 0usize;
    for (index, record) in records.iter().enumerate() {
        let select = record
            .channels
            .to_select()
            .with_context(|| format!("record {index}"))?;
        total += writer
            .write_record(select, &record.samples)
            .with_context(|| format!("record {index}"))?;
        debug!(index, count = record.samples.len(), "record packed");
    }
    writer.flush().context("flushing output")?;

    println!(
        "packed {} record{} ({total} bytes) into {}",
        records.len(),
        if records.len() == 1 { "" } else { "s" },
        args.output.display()
    );
    Ok(())
}
