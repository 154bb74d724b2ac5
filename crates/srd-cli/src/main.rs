/// SRD command-line tool — inspect, decode, validate, and pack `.srd`
/// sample-record streams.
///
/// # Command overview
///
/// ```text
/// srd <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print a per-frame summary of a record stream
///   decode     Decode a record stream and print each record
///   validate   Check a record stream for structural correctness
///   pack       Build a record stream from a JSON manifest
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Enable debug logging on stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                  |
/// |------|------------------------------------------|
/// | 0    | Success                                  |
/// | 1    | Error (I/O failure, parser fault, etc.)  |
///
/// All error details and log output go to stderr so stdout can be
/// piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_inspect;
mod cmd_pack;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The SRD (sample record demultiplexer) command-line tool.
#[derive(Parser)]
#[command(name = "srd", version, about = "Sample record stream CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print a per-frame summary of a record stream.
    Inspect(InspectArgs),
    /// Decode a record stream and print each record.
    Decode(DecodeArgs),
    /// Check a record stream for structural correctness.
    Validate(ValidateArgs),
    /// Build a record stream from a JSON manifest.
    Pack(PackArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `srd inspect`.
///
/// Walks the stream frame by frame and prints one summary line per
/// frame: byte offset, channel select, sample count, and the shape
/// the record decodes to. A trailing partial frame is reported as
/// such rather than treated as an error.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the `.srd` stream to inspect.
    pub file: PathBuf,

    /// Inspect only the frame at this zero-based index.
    #[arg(long)]
    pub frame: Option<usize>,
}

/// Arguments for `srd decode`.
///
/// Decodes every complete frame and prints one record per line.
/// Malformed frames are reported on stderr and decoding continues —
/// only a parser fault (impossible header) aborts.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the `.srd` stream to decode.
    pub file: PathBuf,

    /// Emit records as JSON, one document per line.
    ///
    /// Scalars print as a number, flat records as an array, paired
    /// records as a two-element array of per-channel arrays.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `srd validate`.
///
/// Attempts a full decode of the stream and reports either a set of
/// success checkmarks or a diagnostic error. Exit code 0 on success,
/// 1 on any structural problem (including malformed frames).
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the `.srd` stream to validate.
    pub file: PathBuf,
}

/// Arguments for `srd pack`.
///
/// Reads a JSON manifest describing records and serialises them into
/// a binary record stream. The manifest format is:
///
/// ```json
/// [
///   { "channels": 1,      "samples": [3.5] },
///   { "channels": 2,      "samples": [1.0, 2.0, 3.0] },
///   { "channels": "both", "samples": [1.0, 2.0, 3.0, 4.0] }
/// ]
/// ```
///
/// `channels` is either a raw channel-select byte or the string
/// `"both"`; `"both"` packs the conventional select byte 3.
#[derive(clap::Args)]
pub struct PackArgs {
    /// Path to the JSON manifest file describing the records to pack.
    pub input: PathBuf,

    /// Output `.srd` file path.
    #[arg(short, long)]
    pub output: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Pack(args) => cmd_pack::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
