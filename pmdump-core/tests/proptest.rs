//! Property-based tests using proptest

use pmdump_core::{
    constants::{FOOTER_MAGIC, FRAME_SIZE, HEADER_MAGIC},
    decode,
    encoder::encode_frame,
    FrameSchema, FrameScanner,
};
use proptest::prelude::*;

fn telemetry_values() -> impl Strategy<Value = Vec<u64>> {
    (
        any::<u32>(),
        any::<u32>(),
        prop::collection::vec(any::<u16>(), 9),
    )
        .prop_map(|(counter, ts, sensors)| {
            let mut values = vec![u64::from(counter), u64::from(ts)];
            values.extend(sensors.into_iter().map(u64::from));
            values
        })
}

proptest! {
    #[test]
    fn prop_single_frame_round_trip(values in telemetry_values()) {
        let schema = FrameSchema::telemetry();
        let frame = encode_frame(&schema, &values).unwrap();

        let outcome = decode(&frame, &schema);

        prop_assert_eq!(outcome.records.len(), 1);
        prop_assert_eq!(outcome.records[0].offset, 0);
        prop_assert_eq!(&outcome.records[0].values, &values);
    }

    #[test]
    fn prop_decode_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..8192)
    ) {
        let _ = decode(&data, &FrameSchema::telemetry());
    }

    #[test]
    fn prop_records_satisfy_framing_invariant(
        data in prop::collection::vec(
            prop_oneof![Just(b'O'), Just(b'A'), Just(0xAA), Just(0xBB), any::<u8>()],
            0..4096
        )
    ) {
        let schema = FrameSchema::telemetry();
        let outcome = decode(&data, &schema);

        let mut previous_end = 0;
        for record in &outcome.records {
            prop_assert!(record.offset >= previous_end);
            prop_assert!(record.offset + FRAME_SIZE <= data.len());
            prop_assert_eq!(&data[record.offset..record.offset + 2], HEADER_MAGIC);
            prop_assert_eq!(
                &data[record.offset + FRAME_SIZE - 2..record.offset + FRAME_SIZE],
                FOOTER_MAGIC
            );
            previous_end = record.offset + FRAME_SIZE;
        }

        prop_assert_eq!(outcome.stats.records_recovered, outcome.records.len());
        prop_assert_eq!(
            outcome.stats.unframed_bytes,
            data.len() - outcome.records.len() * FRAME_SIZE
        );
        let max_rejections = (data.len() + 1).saturating_sub(FRAME_SIZE);
        prop_assert!(outcome.stats.rejected_matches <= max_rejections);
    }

    #[test]
    fn prop_headerless_noise_has_no_rejections(
        data in prop::collection::vec(any::<u8>().prop_filter("no 'O'", |b| *b != b'O'), 0..4096)
    ) {
        let outcome = decode(&data, &FrameSchema::telemetry());
        prop_assert!(outcome.is_empty());
        prop_assert_eq!(outcome.stats.rejected_matches, 0);
    }

    #[test]
    fn prop_frames_in_gaps_all_recovered(
        frames in prop::collection::vec(telemetry_values(), 1..20),
        gaps in prop::collection::vec(
            prop::collection::vec(any::<u8>().prop_filter("no 'O'", |b| *b != b'O'), 0..64),
            20
        )
    ) {
        // Gap bytes never contain 'O', and field values never form a header
        // that could start inside the gap, so every frame must be found.
        let schema = FrameSchema::telemetry();
        let mut stream = Vec::new();
        let mut offsets = Vec::new();
        for (values, gap) in frames.iter().zip(&gaps) {
            stream.extend_from_slice(gap);
            offsets.push(stream.len());
            stream.extend_from_slice(&encode_frame(&schema, values).unwrap());
        }

        let outcome = decode(&stream, &schema);

        let found: Vec<usize> = outcome.records.iter().map(|r| r.offset).collect();
        prop_assert_eq!(found, offsets);
    }

    #[test]
    fn prop_lazy_scan_matches_eager_decode(
        data in prop::collection::vec(
            prop_oneof![Just(b'O'), Just(b'A'), Just(0xAA), Just(0xBB), any::<u8>()],
            0..2048
        )
    ) {
        let schema = FrameSchema::telemetry();
        let outcome = decode(&data, &schema);

        let mut scanner = FrameScanner::new(&data, &schema);
        let lazy: Vec<_> = scanner.by_ref().collect();

        prop_assert_eq!(lazy, outcome.records);
        prop_assert_eq!(scanner.stats(), outcome.stats);
    }
}
