#![no_main]

use libfuzzer_sys::fuzz_target;
use srd_decoder::{Decoded, RecordDecoder};

// Fuzz target: the full put→decode loop over arbitrary bytes.
//
// Input format:
//   byte 0: chunk size selector (0 = everything in one put)
//   bytes 1..: the raw stream
//
// Catches bugs in:
// - Buffer accounting across split puts
// - Fault poisoning (decode after a fault must error, not panic)
// - Frame consumption (decode must always terminate)
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let chunk = usize::from(data[0]).max(1);
    let stream = &data[1..];

    let mut decoder = RecordDecoder::new();
    for piece in stream.chunks(chunk) {
        if decoder.put(piece).is_err() {
            return;
        }
        loop {
            match decoder.decode() {
                Ok(Decoded::Record(_)) => {}
                Ok(Decoded::NotReady(_)) => break,
                Err(_) => return,
            }
        }
    }
});
