//! Core types for decoded telemetry

use crate::constants::{SATURATION_SENTINEL, TELEMETRY_COLUMNS};
use crate::schema::FrameSchema;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// A frame that passed header, length and footer validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedRecord {
    /// Byte offset where the header magic was found
    pub offset: usize,

    /// One value per schema field, in frame order
    pub values: Vec<u64>,
}

impl DecodedRecord {
    /// Value of the field called `name` under `schema`
    pub fn get(&self, schema: &FrameSchema, name: &str) -> Option<u64> {
        schema
            .field_index(name)
            .and_then(|i| self.values.get(i).copied())
    }
}

/// Scan statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Total bytes in the scanned buffer
    pub bytes_scanned: usize,

    /// Number of frames accepted
    pub records_recovered: usize,

    /// Header matches rejected because the footer did not match
    pub rejected_matches: usize,

    /// Bytes not covered by an accepted frame (noise, padding and the tail)
    pub unframed_bytes: usize,
}

impl ScanStats {
    /// Share of the buffer covered by accepted frames, as a percentage
    pub fn recovery_rate(&self) -> f64 {
        if self.bytes_scanned == 0 {
            0.0
        } else {
            let framed = self.bytes_scanned - self.unframed_bytes;
            (framed as f64 / self.bytes_scanned as f64) * 100.0
        }
    }
}

/// Whether a decode produced anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodeStatus {
    /// At least one record was recovered
    Recovered(usize),
    /// The buffer was scanned completely but held no valid frame
    NoRecordsFound,
}

/// Result of decoding one buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOutcome {
    /// Records in the order they were found
    pub records: Vec<DecodedRecord>,

    /// Statistics gathered during the scan
    pub stats: ScanStats,
}

impl DecodeOutcome {
    /// Distinguish an empty result from a successful one
    pub fn status(&self) -> DecodeStatus {
        if self.records.is_empty() {
            DecodeStatus::NoRecordsFound
        } else {
            DecodeStatus::Recovered(self.records.len())
        }
    }

    /// True when no record was recovered
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Particle count and mass concentration from one sensor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Number of particles
    pub particles: u16,
    /// Concentration in µg/m³
    pub concentration: u16,
}

/// Typed view of a record decoded with [`FrameSchema::telemetry`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Telemetry {
    /// Monotonic record counter
    pub counter: u32,
    /// Milliseconds since device boot
    pub timestamp_ms: u32,
    /// Sensirion SPS30
    pub sps30: SensorReading,
    /// Plantower PMSA003I
    pub pmsa003i: SensorReading,
    /// Cubic PM2012, concentration calibrated against GRIMM
    pub pm2012: SensorReading,
    /// Cubic PM2012 concentration calibrated against TSI
    pub pm2012_tsi_concentration: u16,
    /// Cubic PM2016
    pub pm2016: SensorReading,
}

impl Telemetry {
    /// Build the typed view; `None` unless the record has the default layout's shape
    pub fn from_record(record: &DecodedRecord) -> Option<Self> {
        let v = &record.values;
        if v.len() != TELEMETRY_COLUMNS.len() {
            return None;
        }

        let u16_at = |i: usize| u16::try_from(v[i]).ok();
        let reading = |i: usize| {
            Some(SensorReading {
                particles: u16_at(i)?,
                concentration: u16_at(i + 1)?,
            })
        };

        Some(Self {
            counter: u32::try_from(v[0]).ok()?,
            timestamp_ms: u32::try_from(v[1]).ok()?,
            sps30: reading(2)?,
            pmsa003i: reading(4)?,
            pm2012: reading(6)?,
            pm2012_tsi_concentration: u16_at(8)?,
            pm2016: reading(9)?,
        })
    }

    /// Field values in the column order of [`FrameSchema::telemetry`]
    pub fn to_values(&self) -> Vec<u64> {
        let mut values = Vec::with_capacity(TELEMETRY_COLUMNS.len());
        values.push(u64::from(self.counter));
        values.push(u64::from(self.timestamp_ms));
        values.extend(self.sensor_values().iter().map(|&v| u64::from(v)));
        values
    }

    /// Names of sensor columns holding the saturation sentinel
    pub fn saturated_fields(&self) -> Vec<&'static str> {
        self.sensor_values()
            .iter()
            .zip(&TELEMETRY_COLUMNS[2..])
            .filter(|&(&v, _)| v == SATURATION_SENTINEL)
            .map(|(_, &name)| name)
            .collect()
    }

    fn sensor_values(&self) -> [u16; 9] {
        [
            self.sps30.particles,
            self.sps30.concentration,
            self.pmsa003i.particles,
            self.pmsa003i.concentration,
            self.pm2012.particles,
            self.pm2012.concentration,
            self.pm2012_tsi_concentration,
            self.pm2016.particles,
            self.pm2016.concentration,
        ]
    }
}
