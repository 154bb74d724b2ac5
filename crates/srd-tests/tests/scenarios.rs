//! Byte-level decode scenarios.
//!
//! Each test feeds hand-assembled wire bytes into a [`RecordDecoder`]
//! and asserts the exact shaped output. These pin the observable
//! contract of the format:
//!
//! - single-channel records come back flat, in wire order;
//! - dual-channel records de-interleave by index parity — except the
//!   two-sample case, which stays a flat pair (wire quirk);
//! - truncated frames report `NotReady` and lose nothing;
//! - a reset discards partial frames deterministically.

use srd_decoder::{Decoded, NotReady, Record, RecordDecoder};
use srd_tests::{ascending, frame, stream};

// ── Complete single frames ────────────────────────────────────────────────────

#[test]
fn single_channel_scalar() {
    // [u64=8][u8=1][one f64 = 3.5] → Scalar(3.5)
    let mut decoder = RecordDecoder::new();
    decoder.put(&frame(1, &[3.5])).unwrap();

    assert_eq!(
        decoder.decode().unwrap(),
        Decoded::Record(Record::Scalar(3.5))
    );
}

#[test]
fn single_channel_triple_stays_flat() {
    // [u64=24][u8=2][v0 v1 v2] → Flat(v0, v1, v2)
    let mut decoder = RecordDecoder::new();
    decoder.put(&frame(2, &[10.0, -2.5, 0.125])).unwrap();

    assert_eq!(
        decoder.decode().unwrap(),
        Decoded::Record(Record::Flat(vec![10.0, -2.5, 0.125]))
    );
}

#[test]
fn dual_channel_pair_reported_flat() {
    // [u64=16][u8=9][v0 v1] → the flat pair (v0, v1), not two
    // singleton groups.
    let mut decoder = RecordDecoder::new();
    decoder.put(&frame(9, &[1.5, 2.5])).unwrap();

    assert_eq!(
        decoder.decode().unwrap(),
        Decoded::Record(Record::Flat(vec![1.5, 2.5]))
    );
}

#[test]
fn dual_channel_deinterleaves() {
    let mut decoder = RecordDecoder::new();
    decoder
        .put(&frame(0xFF, &[1.0, 10.0, 2.0, 20.0, 3.0, 30.0]))
        .unwrap();

    assert_eq!(
        decoder.decode().unwrap(),
        Decoded::Record(Record::Paired {
            a: vec![1.0, 2.0, 3.0],
            b: vec![10.0, 20.0, 30.0],
        })
    );
}

#[test]
fn dual_channel_odd_count_is_malformed() {
    // [u64=40][u8=9][five f64] → odd count on both channels.
    let mut decoder = RecordDecoder::new();
    decoder.put(&frame(9, &ascending(5))).unwrap();

    assert_eq!(
        decoder.decode().unwrap(),
        Decoded::Record(Record::Malformed {
            channel_select: 9,
            count: 5
        })
    );
}

#[test]
fn zero_sample_frame_is_empty() {
    let mut decoder = RecordDecoder::new();
    decoder.put(&frame(1, &[])).unwrap();

    assert_eq!(decoder.decode().unwrap(), Decoded::Record(Record::Empty));
}

// ── Incremental arrival ───────────────────────────────────────────────────────

#[test]
fn half_payload_is_not_ready_then_completes() {
    // [u64=32][u8=1] + 16 of 32 payload bytes → NotReady; the rest →
    // Flat of 4.
    let bytes = frame(1, &[1.0, 2.0, 3.0, 4.0]);
    let mut decoder = RecordDecoder::new();
    decoder.put(&bytes[..9 + 16]).unwrap();

    assert_eq!(
        decoder.decode().unwrap(),
        Decoded::NotReady(NotReady::PayloadIncomplete { have: 16, need: 32 })
    );

    decoder.put(&bytes[9 + 16..]).unwrap();
    assert_eq!(
        decoder.decode().unwrap(),
        Decoded::Record(Record::Flat(vec![1.0, 2.0, 3.0, 4.0]))
    );
}

#[test]
fn byte_at_a_time_feed() {
    let bytes = frame(2, &[0.5, 1.5]);
    let mut decoder = RecordDecoder::new();

    for (i, byte) in bytes.iter().enumerate() {
        // Every prefix short of the full frame is NotReady.
        if i > 0 {
            assert!(matches!(decoder.decode().unwrap(), Decoded::NotReady(_)));
        }
        decoder.put(&[*byte]).unwrap();
    }

    assert_eq!(
        decoder.decode().unwrap(),
        Decoded::Record(Record::Flat(vec![0.5, 1.5]))
    );
}

#[test]
fn back_to_back_frames_decode_in_order() {
    let bytes = stream(&[
        frame(1, &[3.5]),
        frame(9, &ascending(4)),
        frame(1, &[]),
        frame(2, &ascending(7)),
    ]);
    let mut decoder = RecordDecoder::new();
    decoder.put(&bytes).unwrap();

    let records = decoder.drain().unwrap();
    assert_eq!(
        records,
        vec![
            Record::Scalar(3.5),
            Record::Paired {
                a: vec![0.0, 2.0],
                b: vec![1.0, 3.0],
            },
            Record::Empty,
            Record::Flat(ascending(7)),
        ]
    );
}

// ── Reset semantics ───────────────────────────────────────────────────────────

#[test]
fn reset_mid_frame_discards_partial_state() {
    let mut decoder = RecordDecoder::new();
    // Header promising 32 payload bytes, then only half of them.
    let partial = frame(1, &[1.0, 2.0, 3.0, 4.0]);
    decoder.put(&partial[..9 + 16]).unwrap();
    assert!(matches!(decoder.decode().unwrap(), Decoded::NotReady(_)));

    decoder.reset();

    // A brand-new frame decodes from scratch; the orphaned half
    // payload is gone, not misread as a header.
    decoder.put(&frame(2, &[42.0])).unwrap();
    assert_eq!(
        decoder.decode().unwrap(),
        Decoded::Record(Record::Scalar(42.0))
    );
    assert_eq!(decoder.decode().unwrap(), Decoded::NotReady(NotReady::HeaderMissing));
}
