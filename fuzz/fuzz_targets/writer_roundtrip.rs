#![no_main]

use libfuzzer_sys::fuzz_target;
use srd_decoder::{Decoded, RecordDecoder};
use srd_wire::frame::frame_bytes;
use srd_wire::header::ChannelSelect;

// Fuzz target: write→decode roundtrip.
//
// Serializes an arbitrary record with the frame writer, feeds the
// bytes to a fresh decoder, and asserts a complete record of the same
// sample count comes back.
fuzz_target!(|input: (u8, Vec<f64>)| {
    let (channel, samples) = input;

    let Ok(bytes) = frame_bytes(ChannelSelect::from_raw(channel), &samples) else {
        // Wider than the writer admits; nothing to roundtrip.
        return;
    };

    let mut decoder = RecordDecoder::new();
    decoder.put(&bytes).expect("fresh decoder accepts bytes");

    match decoder.decode().expect("written frames never fault") {
        Decoded::Record(record) => assert_eq!(record.sample_count(), samples.len()),
        Decoded::NotReady(state) => panic!("complete frame reported {state:?}"),
    }
});
