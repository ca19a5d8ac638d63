use anyhow::{Context, Result};
use pmdump_core::{decode, DecodedRecord, FrameSchema, ScanStats};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;

/// JSON document written by `scan --output`
#[derive(Debug, Serialize, Deserialize)]
pub struct ScanReport {
    /// Scan statistics
    pub stats: ScanStats,
    /// Column names, matching the order of each record's values
    pub columns: Vec<String>,
    /// Recovered records in buffer order
    pub records: Vec<DecodedRecord>,
}

pub fn execute(input: &str, output: Option<&str>, stats_only: bool) -> Result<ScanStats> {
    info!("Scanning file: {}", input);

    // Read input file
    let data = fs::read(input).with_context(|| format!("Failed to read input file: {}", input))?;

    info!("File size: {} bytes", data.len());

    let schema = FrameSchema::telemetry();
    let outcome = decode(&data, &schema);
    let stats = outcome.stats;

    // Print statistics
    println!("\n=== Scan Results ===");
    println!("Bytes scanned:     {} bytes", stats.bytes_scanned);
    println!("Valid records:     {}", stats.records_recovered);
    println!("Rejected matches:  {}", stats.rejected_matches);
    println!("Unframed bytes:    {} bytes", stats.unframed_bytes);
    println!("Recovery rate:     {:.2}%", stats.recovery_rate());
    println!();

    if stats_only {
        return Ok(stats);
    }

    if let Some(output_path) = output {
        let report = ScanReport {
            stats,
            columns: schema.column_names().map(String::from).collect(),
            records: outcome.records,
        };

        let json = serde_json::to_string_pretty(&report)
            .with_context(|| "Failed to serialize recovered records")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Recovered records written to: {}", output_path);
    } else {
        // Print to stdout
        println!("=== Recovered Records ===");
        let counter = schema.field_index("Counter");
        for record in &outcome.records {
            match counter.and_then(|i| record.values.get(i)) {
                Some(c) => println!("Record {} @ offset {}", c, record.offset),
                None => println!("Record @ offset {}", record.offset),
            }
        }
    }

    Ok(stats)
}
