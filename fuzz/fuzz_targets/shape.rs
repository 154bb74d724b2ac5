#![no_main]

use libfuzzer_sys::fuzz_target;
use srd_decoder::{shape, Record, ShapeLimits};
use srd_wire::header::ChannelSelect;

// Fuzz target: the record shaper over arbitrary channel bytes and
// sample buffers.
//
// Invariants checked:
// - shape never panics and never drops samples: the output's sample
//   count always equals the input count
// - zero samples is always Empty
fuzz_target!(|input: (u8, Vec<f64>)| {
    let (channel, samples) = input;
    let record = shape(
        ChannelSelect::from_raw(channel),
        &samples,
        ShapeLimits::default(),
    );

    assert_eq!(record.sample_count(), samples.len());
    if samples.is_empty() {
        assert_eq!(record, Record::Empty);
    }
});
