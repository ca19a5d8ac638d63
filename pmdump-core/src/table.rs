//! Tabular output of decoded records
//!
//! One header line naming every schema column, then one comma separated line
//! per record in decode order. Values are written verbatim, including the
//! saturation sentinel.

use crate::error::FrameError;
use crate::schema::FrameSchema;
use crate::types::DecodedRecord;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(feature = "logging")]
use tracing::debug;

/// Formatting options for the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Field delimiter
    pub delimiter: u8,

    /// End every data row with a delimiter, as the logger's original
    /// converter did; readers treat it as an unnamed empty column
    pub trailing_delimiter: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trailing_delimiter: true,
        }
    }
}

/// Write the header line and one row per record to `writer`
pub fn write_table<W: Write>(
    writer: W,
    schema: &FrameSchema,
    records: &[DecodedRecord],
    options: &TableOptions,
) -> Result<(), FrameError> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .flexible(true)
        .from_writer(writer);

    csv.write_record(schema.column_names())?;

    let mut row: Vec<String> = Vec::with_capacity(schema.fields().len() + 1);
    for record in records {
        row.clear();
        row.extend(record.values.iter().map(u64::to_string));
        if options.trailing_delimiter {
            row.push(String::new());
        }
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write records to `<dir>/<stem>.csv`, creating `dir` if needed
///
/// An existing file is truncated. Returns the path written.
pub fn write_table_file(
    dir: &Path,
    stem: &str,
    schema: &FrameSchema,
    records: &[DecodedRecord],
    options: &TableOptions,
) -> Result<PathBuf, FrameError> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;

        #[cfg(feature = "logging")]
        debug!("Created directory: {}", dir.display());
    }

    let path = dir.join(format!("{}.csv", stem));
    let file = File::create(&path)?;
    write_table(file, schema, records, options)?;

    Ok(path)
}

/// Output file stem for an input path: its file name without extension
pub fn output_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("decoded"))
}
