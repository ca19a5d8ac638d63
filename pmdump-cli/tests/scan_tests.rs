use std::fs;
use tempfile::tempdir;

use pmdump_cli::commands::scan::{self, ScanReport};
use pmdump_core::encoder::encode_telemetry;
use pmdump_core::Telemetry;

/// Helper: a dump with `num_frames` frames separated by erased-flash padding
fn create_dump(num_frames: u32) -> Vec<u8> {
    let mut result = vec![0xFF; 16];

    for i in 0..num_frames {
        let t = Telemetry {
            counter: i + 1,
            timestamp_ms: 2000 * (i + 1),
            ..Default::default()
        };
        result.extend_from_slice(&encode_telemetry(&t));
        result.extend_from_slice(&[0xFF; 7]);
    }

    result
}

#[test]
fn test_scan_writes_json_report() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("log_1.bin");
    let output_path = td.path().join("output.json");

    fs::write(&input_path, create_dump(3)).unwrap();

    let stats = scan::execute(
        input_path.to_str().unwrap(),
        Some(output_path.to_str().unwrap()),
        false,
    )
    .unwrap();
    assert_eq!(stats.records_recovered, 3);

    let json = fs::read_to_string(&output_path).unwrap();
    let report: ScanReport = serde_json::from_str(&json).unwrap();

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.columns[0], "Counter");
    assert_eq!(report.columns.len(), 11);
    assert_eq!(report.records[0].offset, 16);
    for (i, record) in report.records.iter().enumerate() {
        assert_eq!(record.values[0], i as u64 + 1);
    }
    assert_eq!(report.stats.unframed_bytes, 16 + 3 * 7);
}

#[test]
fn test_scan_stats_only() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("stats.bin");
    let output_path = td.path().join("unused.json");

    fs::write(&input_path, create_dump(4)).unwrap();

    let stats = scan::execute(
        input_path.to_str().unwrap(),
        Some(output_path.to_str().unwrap()),
        true,
    )
    .unwrap();

    assert_eq!(stats.records_recovered, 4);
    // stats_only never writes the report
    assert!(!output_path.exists());
}

#[test]
fn test_scan_to_stdout() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("stdout.bin");
    fs::write(&input_path, create_dump(2)).unwrap();

    let stats = scan::execute(input_path.to_str().unwrap(), None, false).unwrap();
    assert_eq!(stats.records_recovered, 2);
}

#[test]
fn test_scan_counts_rejected_headers() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("stray.bin");

    let mut data = b"OA".to_vec();
    data.extend_from_slice(&[0u8; 40]);
    data.extend_from_slice(&create_dump(1));
    fs::write(&input_path, data).unwrap();

    let stats = scan::execute(input_path.to_str().unwrap(), None, true).unwrap();

    assert_eq!(stats.records_recovered, 1);
    assert_eq!(stats.rejected_matches, 1);
}

#[test]
fn test_scan_missing_file() {
    let td = tempdir().unwrap();
    let missing = td.path().join("nope.bin");

    let result = scan::execute(missing.to_str().unwrap(), None, false);
    assert!(result.is_err());
}
