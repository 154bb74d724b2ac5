#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: FrameHeader::read_from header parsing.
//
// Catches bugs in:
// - Short-buffer handling (must be Ok(None), never a panic)
// - Length field validation (alignment, cap)
fuzz_target!(|data: &[u8]| {
    let _ = srd_wire::header::FrameHeader::read_from(data);
});
