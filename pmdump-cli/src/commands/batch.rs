use super::decode::{decode_file, report, FileOutcome};
use anyhow::{Context, Result};
use colored::*;
use pmdump_core::table::{output_stem, TableOptions};
use pmdump_core::FrameSchema;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Totals over one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files that yielded at least one record
    pub recovered: usize,
    /// Files scanned without finding a record
    pub empty: usize,
    /// Files that could not be read or written
    pub failed: usize,
    /// Records recovered across all files
    pub records: usize,
}

impl BatchSummary {
    /// Number of files attempted
    pub fn files(&self) -> usize {
        self.recovered + self.empty + self.failed
    }
}

/// Regular files directly inside `dir`, sorted by name
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// Decode every file in `input_dir`; a failing file does not stop the batch
///
/// Files whose names share a stem with a file already decoded (`log.bin`
/// and `log.txt`) would write the same table, so the later one is counted
/// as failed instead of overwriting it.
pub fn execute(input_dir: &str, output_dir: &str, trailing_comma: bool) -> Result<BatchSummary> {
    info!("Decoding files in {}", input_dir);

    let files = list_files(Path::new(input_dir))?;
    let mut summary = BatchSummary::default();

    if files.is_empty() {
        warn!("No files found in {}", input_dir);
        println!(
            "{} No files found in '{}'. Was the image unpacked?",
            "!".yellow(),
            input_dir
        );
        return Ok(summary);
    }

    let schema = FrameSchema::telemetry();
    let options = TableOptions {
        trailing_delimiter: trailing_comma,
        ..Default::default()
    };
    let output_dir = Path::new(output_dir);
    let mut stems = HashSet::new();

    for path in &files {
        let stem = output_stem(path);
        if !stems.insert(stem.clone()) {
            error!(
                "Skipping {}: table {}.csv was already written in this batch",
                path.display(),
                stem
            );
            println!(
                "{} {}: output '{}.csv' already written by another file",
                "✗".red(),
                path.display(),
                stem
            );
            summary.failed += 1;
            continue;
        }

        match decode_file(path, output_dir, &schema, &options) {
            Ok(outcome) => {
                report(path, &outcome);
                summary.records += outcome.stats().records_recovered;
                match outcome {
                    FileOutcome::Recovered { .. } => summary.recovered += 1,
                    FileOutcome::NoRecordsFound { .. } => summary.empty += 1,
                }
            }
            Err(e) => {
                error!("Failed to decode {}: {:#}", path.display(), e);
                println!("{} {}: {:#}", "✗".red(), path.display(), e);
                summary.failed += 1;
            }
        }
    }

    println!("\n=== Batch Results ===");
    println!("Files processed:   {}", summary.files());
    println!("With records:      {}", summary.recovered.to_string().green());
    println!("Without records:   {}", summary.empty);
    if summary.failed > 0 {
        println!("Failed:            {}", summary.failed.to_string().red());
    } else {
        println!("Failed:            {}", summary.failed);
    }
    println!("Records total:     {}", summary.records);

    Ok(summary)
}
