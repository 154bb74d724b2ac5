use srd_wire::header::{ChannelMode, ChannelSelect};

use crate::record::Record;

/// Upper bounds on decodable sample counts.
///
/// The observed wire traffic never carries more than 7 samples on a
/// single channel or 14 interleaved dual-channel samples, but nothing
/// in the header encodes that cap — it may be an incidental limit of
/// the producing instruments rather than a protocol guarantee. The
/// bounds are therefore configurable; the defaults preserve observed
/// behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeLimits {
    /// Widest single-channel record (`Flat`).
    pub max_flat: usize,
    /// Widest dual-channel record, counted in wire samples (`Paired`
    /// halves are each half this wide).
    pub max_paired: usize,
}

impl Default for ShapeLimits {
    fn default() -> Self {
        Self {
            max_flat: 7,
            max_paired: 14,
        }
    }
}

/// Shape a flat sample buffer into a channel-demultiplexed record.
///
/// Pure function of its inputs; never fails. Count mismatches become
/// [`Record::Malformed`] values so stream processing can continue past
/// one bad frame.
///
/// Shaping rules:
///
/// - `count == 0` → [`Record::Empty`], whatever the channel config.
/// - Single channel (select byte 1 or 2): one sample → [`Record::Scalar`],
///   `2..=max_flat` samples → [`Record::Flat`] in wire order.
/// - Both channels (any other select byte): samples alternate
///   A,B,A,B,…; even counts `4..=max_paired` de-interleave into
///   [`Record::Paired`] — channel A takes even wire indices, channel B
///   odd ones, order preserved within each.
/// - Both channels with exactly two samples → `Flat([s0, s1])`, one
///   flat pair rather than two singleton groups. This asymmetry is a
///   wire-format quirk the format has always had; downstream consumers
///   depend on it, so it is preserved rather than generalized away.
#[must_use]
pub fn shape(channel_select: ChannelSelect, samples: &[f64], limits: ShapeLimits) -> Record {
    let count = samples.len();
    if count == 0 {
        return Record::Empty;
    }

    let malformed = Record::Malformed {
        channel_select: channel_select.raw(),
        count,
    };

    match channel_select.mode() {
        ChannelMode::Single => match count {
            1 => Record::Scalar(samples[0]),
            n if n <= limits.max_flat => Record::Flat(samples.to_vec()),
            _ => malformed,
        },
        ChannelMode::Both => {
            if count % 2 != 0 || count > limits.max_paired {
                return malformed;
            }
            if count == 2 {
                // Wire quirk: a dual-channel pair stays flat.
                return Record::Flat(samples.to_vec());
            }
            Record::Paired {
                a: samples.iter().step_by(2).copied().collect(),
                b: samples.iter().skip(1).step_by(2).copied().collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nth(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn zero_samples_is_empty_for_any_channel() {
        for raw in [1u8, 2, 0, 9, 0xFF] {
            let record = shape(ChannelSelect::from_raw(raw), &[], ShapeLimits::default());
            assert_eq!(record, Record::Empty, "channel byte {raw}");
        }
    }

    #[test]
    fn single_channel_one_sample_is_scalar() {
        let record = shape(ChannelSelect::CH1, &[3.5], ShapeLimits::default());
        assert_eq!(record, Record::Scalar(3.5));
    }

    #[test]
    fn single_channel_preserves_order_up_to_the_cap() {
        for ch in [ChannelSelect::CH1, ChannelSelect::CH2] {
            for count in 2..=7 {
                let samples = nth(count);
                let record = shape(ch, &samples, ShapeLimits::default());
                assert_eq!(record, Record::Flat(samples), "count {count}");
            }
        }
    }

    #[test]
    fn single_channel_over_the_cap_is_malformed() {
        let record = shape(ChannelSelect::CH2, &nth(8), ShapeLimits::default());
        assert_eq!(
            record,
            Record::Malformed {
                channel_select: 2,
                count: 8
            }
        );
    }

    #[test]
    fn dual_channel_deinterleaves_by_index_parity() {
        for count in [4usize, 6, 8, 10, 12, 14] {
            let samples = nth(count);
            let record = shape(ChannelSelect::from_raw(9), &samples, ShapeLimits::default());

            let a: Vec<f64> = samples.iter().step_by(2).copied().collect();
            let b: Vec<f64> = samples.iter().skip(1).step_by(2).copied().collect();
            assert_eq!(record, Record::Paired { a, b }, "count {count}");
        }
    }

    #[test]
    fn dual_channel_pair_stays_flat() {
        // The preserved quirk: two samples on both channels come back
        // as one flat pair, not two singleton groups.
        let record = shape(ChannelSelect::from_raw(0), &[7.5, -1.0], ShapeLimits::default());
        assert_eq!(record, Record::Flat(vec![7.5, -1.0]));
    }

    #[test]
    fn dual_channel_odd_count_is_malformed() {
        let record = shape(ChannelSelect::from_raw(9), &nth(5), ShapeLimits::default());
        assert_eq!(
            record,
            Record::Malformed {
                channel_select: 9,
                count: 5
            }
        );
    }

    #[test]
    fn dual_channel_over_the_cap_is_malformed() {
        let record = shape(ChannelSelect::from_raw(3), &nth(16), ShapeLimits::default());
        assert!(record.is_malformed());
    }

    #[test]
    fn limits_are_configurable() {
        let wide = ShapeLimits {
            max_flat: 9,
            max_paired: 20,
        };
        assert_eq!(
            shape(ChannelSelect::CH1, &nth(9), wide),
            Record::Flat(nth(9))
        );
        assert!(matches!(
            shape(ChannelSelect::from_raw(7), &nth(16), wide),
            Record::Paired { .. }
        ));
    }
}
