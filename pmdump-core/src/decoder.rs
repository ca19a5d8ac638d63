//! Resynchronizing frame decoder for noisy flash dumps
//!
//! Frames carry no length prefix and no checksum. A candidate is accepted
//! only when a full `frame_size` window that starts with the header magic
//! also ends with the footer magic. On any mismatch the cursor moves forward
//! by a single byte, so a genuine frame overlapping a false-positive header
//! is never skipped.

use crate::schema::FrameSchema;
use crate::types::{DecodeOutcome, DecodedRecord, ScanStats};
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Lazy, restartable scanner over a borrowed buffer
///
/// Iterating yields records in buffer order. Statistics accumulate as the
/// scan proceeds and are complete once the iterator returns `None`.
#[derive(Debug, Clone)]
pub struct FrameScanner<'a> {
    data: &'a [u8],
    schema: &'a FrameSchema,
    pos: usize,
    stats: ScanStats,
}

impl<'a> FrameScanner<'a> {
    /// Create a scanner positioned at the start of `data`
    pub fn new(data: &'a [u8], schema: &'a FrameSchema) -> Self {
        Self {
            data,
            schema,
            pos: 0,
            stats: Self::fresh_stats(data),
        }
    }

    /// Statistics gathered so far
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Rewind to the start of the buffer and clear statistics
    pub fn reset(&mut self) {
        self.pos = 0;
        self.stats = Self::fresh_stats(self.data);
    }

    /// True once no further frame can start in the remaining bytes
    pub fn is_finished(&self) -> bool {
        self.last_start().map_or(true, |last| self.pos > last)
    }

    fn fresh_stats(data: &[u8]) -> ScanStats {
        ScanStats {
            bytes_scanned: data.len(),
            unframed_bytes: data.len(),
            ..Default::default()
        }
    }

    /// Highest offset at which a complete frame still fits
    fn last_start(&self) -> Option<usize> {
        self.data.len().checked_sub(self.schema.frame_size())
    }

    /// Next offset `>= self.pos` where the header magic starts and a full frame fits
    ///
    /// The search is an exact substring match, so every position it passes
    /// over is one where the header does not start.
    fn next_header(&self, last_start: usize) -> Option<usize> {
        if self.pos > last_start {
            return None;
        }
        let header = self.schema.header_magic();
        let haystack = &self.data[self.pos..last_start + header.len()];
        memchr::memmem::find(haystack, header).map(|rel| self.pos + rel)
    }

    fn footer_matches(&self, window: &[u8]) -> bool {
        let footer = self.schema.footer_magic();
        window[window.len() - footer.len()..] == *footer
    }
}

impl<'a> Iterator for FrameScanner<'a> {
    type Item = DecodedRecord;

    fn next(&mut self) -> Option<DecodedRecord> {
        let last_start = self.last_start()?;
        let frame_size = self.schema.frame_size();

        while let Some(at) = self.next_header(last_start) {
            let window = &self.data[at..at + frame_size];

            if self.footer_matches(window) {
                let record = DecodedRecord {
                    offset: at,
                    values: self.schema.parse_fields(window),
                };

                #[cfg(feature = "logging")]
                trace!("Accepted frame at offset {}", at);

                // Skip the whole frame; no overlap scanning inside a confirmed frame
                self.pos = at + frame_size;
                self.stats.records_recovered += 1;
                self.stats.unframed_bytes -= frame_size;
                return Some(record);
            }

            #[cfg(feature = "logging")]
            trace!("Rejected header match at offset {}: footer mismatch", at);

            self.stats.rejected_matches += 1;
            self.pos = at + 1;
        }

        // Nothing else can start before the tail
        self.pos = last_start + 1;
        None
    }
}

/// Decode every frame in `data`
///
/// This function:
/// 1. Searches byte-by-byte for the header magic
/// 2. Checks that the full frame window ends with the footer magic
/// 3. On success emits a record and jumps past the frame
/// 4. On failure counts a rejected match and advances by exactly one byte
///
/// Buffers shorter than one frame, pure noise and truncated tails are not
/// errors; they simply produce no records.
pub fn decode(data: &[u8], schema: &FrameSchema) -> DecodeOutcome {
    #[cfg(feature = "logging")]
    debug!("Starting decode of {} bytes", data.len());

    let mut scanner = FrameScanner::new(data, schema);
    let records: Vec<DecodedRecord> = scanner.by_ref().collect();
    let stats = scanner.stats();

    #[cfg(feature = "logging")]
    debug!(
        "Decode complete: {} records, {} rejected header matches, {} unframed bytes",
        stats.records_recovered, stats.rejected_matches, stats.unframed_bytes
    );

    DecodeOutcome { records, stats }
}
