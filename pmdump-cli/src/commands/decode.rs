use anyhow::{bail, Context, Result};
use colored::*;
use pmdump_core::table::{output_stem, write_table_file, TableOptions};
use pmdump_core::{decode, DecodeStatus, FrameSchema, ScanStats};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, trace, warn};

/// What decoding one input file produced
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Records were recovered and written
    Recovered {
        /// Table that was written
        output: PathBuf,
        /// Scan statistics
        stats: ScanStats,
    },
    /// The file was scanned completely but held no valid frame; a header-only
    /// table was still written
    NoRecordsFound {
        /// Table that was written
        output: PathBuf,
        /// Scan statistics
        stats: ScanStats,
    },
}

impl FileOutcome {
    /// Path of the written table
    pub fn output(&self) -> &Path {
        match self {
            FileOutcome::Recovered { output, .. } | FileOutcome::NoRecordsFound { output, .. } => {
                output
            }
        }
    }

    /// Scan statistics for the file
    pub fn stats(&self) -> &ScanStats {
        match self {
            FileOutcome::Recovered { stats, .. } | FileOutcome::NoRecordsFound { stats, .. } => {
                stats
            }
        }
    }
}

/// Decode `input` with `schema` and write `<output_dir>/<stem>.csv`
pub fn decode_file(
    input: &Path,
    output_dir: &Path,
    schema: &FrameSchema,
    options: &TableOptions,
) -> Result<FileOutcome> {
    if !input.is_file() {
        bail!("File '{}' not found", input.display());
    }

    info!("Scanning {} for valid packets...", input.display());

    let data =
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let outcome = decode(&data, schema);

    for record in &outcome.records {
        let frame = &data[record.offset..record.offset + schema.frame_size()];
        trace!("Frame @ {}: {}", record.offset, hex::encode(frame));
    }

    let output = write_table_file(
        output_dir,
        &output_stem(input),
        schema,
        &outcome.records,
        options,
    )
    .with_context(|| format!("Failed to write table to {}", output_dir.display()))?;

    let stats = outcome.stats;
    Ok(match outcome.status() {
        DecodeStatus::Recovered(_) => FileOutcome::Recovered { output, stats },
        DecodeStatus::NoRecordsFound => FileOutcome::NoRecordsFound { output, stats },
    })
}

/// Print the per-file completion summary
pub fn report(input: &Path, outcome: &FileOutcome) {
    let stats = outcome.stats();
    match outcome {
        FileOutcome::Recovered { output, .. } => {
            println!(
                "{} Decoded {} valid records from '{}' into '{}' ({} rejected candidates)",
                "✓".green(),
                stats.records_recovered,
                input.display(),
                output.display(),
                stats.rejected_matches
            );
        }
        FileOutcome::NoRecordsFound { output, .. } => {
            warn!(
                "No valid records in {} ({} bytes, {} rejected candidates)",
                input.display(),
                stats.bytes_scanned,
                stats.rejected_matches
            );
            println!(
                "{} No valid records found in '{}'; wrote header-only table '{}'",
                "!".yellow(),
                input.display(),
                output.display()
            );
        }
    }
}

pub fn execute(input: &str, output_dir: &str, trailing_comma: bool) -> Result<FileOutcome> {
    info!("Processing: {}", input);

    let schema = FrameSchema::telemetry();
    let options = TableOptions {
        trailing_delimiter: trailing_comma,
        ..Default::default()
    };

    let input = Path::new(input);
    let outcome = decode_file(input, Path::new(output_dir), &schema, &options)?;
    report(input, &outcome);

    Ok(outcome)
}
