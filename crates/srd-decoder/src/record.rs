/// A fully decoded record, shaped by its channel configuration.
///
/// ```text
///   count 0            → Empty
///   single channel:
///     count 1          → Scalar
///     count 2..=7      → Flat (original order)
///     otherwise        → Malformed
///   both channels:
///     count 2          → Flat pair (wire quirk, see below)
///     count 4..=14 even → Paired (de-interleaved)
///     otherwise        → Malformed
/// ```
///
/// `Malformed` is a value, not an error: the offending frame has been
/// consumed and subsequent frames decode normally.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    /// A frame existed with zero samples. Valid output, not an error.
    Empty,

    /// Exactly one sample on a single active channel.
    Scalar(f64),

    /// A flat run of samples in wire order.
    ///
    /// Produced on the single-channel path for 2..=`max_flat` samples,
    /// and — as a preserved wire-format quirk — for a dual-channel
    /// frame of exactly two samples, which is reported as one flat
    /// pair rather than two one-element groups.
    Flat(Vec<f64>),

    /// Both channels active, de-interleaved by index parity.
    ///
    /// `a` holds the even-indexed wire samples, `b` the odd-indexed
    /// ones; both are equal length and order-preserved.
    Paired { a: Vec<f64>, b: Vec<f64> },

    /// A complete frame whose sample count fits no shape for its
    /// channel configuration. Carries the observed values for
    /// diagnostics.
    Malformed { channel_select: u8, count: usize },
}

impl Record {
    /// True for the `Malformed` variant.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Record::Malformed { .. })
    }

    /// Number of sample values carried by this record.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        match self {
            Record::Empty => 0,
            Record::Scalar(_) => 1,
            Record::Flat(values) => values.len(),
            Record::Paired { a, b } => a.len() + b.len(),
            Record::Malformed { count, .. } => *count,
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn join(values: &[f64]) -> String {
            values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        }

        match self {
            Record::Empty => write!(f, "Empty"),
            Record::Scalar(value) => write!(f, "Scalar({value})"),
            Record::Flat(values) => write!(f, "Flat({})", join(values)),
            Record::Paired { a, b } => {
                write!(f, "Paired(a: [{}], b: [{}])", join(a), join(b))
            }
            Record::Malformed {
                channel_select,
                count,
            } => write!(
                f,
                "Malformed({count} samples, channel_select=0x{channel_select:02X})"
            ),
        }
    }
}

/// Why a decode call produced no record yet.
///
/// Both cases mean "push more bytes and retry"; nothing buffered is
/// lost. The two reasons are distinguished so callers can tell
/// cold-start from mid-frame truncation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotReady {
    /// Fewer than 9 bytes buffered — no header to parse yet.
    HeaderMissing,

    /// The header is parsed but the payload is still truncated.
    PayloadIncomplete {
        /// Payload bytes currently buffered past the header.
        have: usize,
        /// Payload bytes the header promises.
        need: usize,
    },
}

/// The outcome of one decode call.
#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    /// More bytes are required before a record can complete.
    NotReady(NotReady),

    /// A complete frame was consumed and shaped.
    Record(Record),
}

impl Decoded {
    /// The record, if this call completed one.
    #[must_use]
    pub fn into_record(self) -> Option<Record> {
        match self {
            Decoded::Record(record) => Some(record),
            Decoded::NotReady(_) => None,
        }
    }
}
