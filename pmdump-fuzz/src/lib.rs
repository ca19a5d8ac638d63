//! Fuzzing entry points for pmdump-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decode

use pmdump_core::{decode, encoder::encode_frame, FrameSchema};

pub fn fuzz_decode(data: &[u8]) {
    let schema = FrameSchema::telemetry();
    let frame_size = schema.frame_size();

    // Must never panic, and every record must lie inside the buffer
    let outcome = decode(data, &schema);
    for record in &outcome.records {
        assert!(record.offset + frame_size <= data.len());
    }
}

pub fn fuzz_encode(data: &[u8]) {
    let schema = FrameSchema::telemetry();

    // Arbitrary values, some of which will not fit their field
    let values: Vec<u64> = data
        .chunks(4)
        .map(|c| c.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
        .collect();

    if let Ok(frame) = encode_frame(&schema, &values) {
        let outcome = decode(&frame, &schema);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].values, values);
    }
}
