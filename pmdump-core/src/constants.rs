//! Constants for the OpenAir telemetry frame format

/// Frame header magic - 2 bytes for synchronization ("OA")
pub const HEADER_MAGIC: &[u8; 2] = b"OA";

/// Frame footer magic - the last 2 bytes of every frame
pub const FOOTER_MAGIC: &[u8; 2] = &[0xAA, 0xBB];

/// Total size of one telemetry frame in bytes
///
/// 2 (header) + 4 (counter) + 4 (timestamp) + 9 * 2 (sensor readings) + 2 (footer) = 30 bytes
pub const FRAME_SIZE: usize = 30;

/// Sensor value reported when a reading is unavailable or overflowed
///
/// The decoder and table writer pass this through untouched; consumers are
/// expected to treat it as a missing value.
pub const SATURATION_SENTINEL: u16 = u16::MAX;

/// Input file name used when none is supplied on the command line
pub const DEFAULT_INPUT: &str = "littlefs_raw.bin";

/// Directory decoded tables are written to when none is supplied
pub const DEFAULT_OUTPUT_DIR: &str = "./decoded_results";

/// Column names of the default telemetry layout, in frame order
pub const TELEMETRY_COLUMNS: [&str; 11] = [
    "Counter",
    "Timestamp_ms",
    "SPS30_Particles",
    "SPS30_Conc",
    "PMSA_Particles",
    "PMSA_Conc",
    "PM2012_Particles",
    "PM2012_Conc_GRIMM",
    "PM2012_Conc_TSI",
    "PM2016_Particles",
    "PM2016_Conc",
];

/// Byte order of a multi-byte field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    /// Least significant byte first
    Little,
    /// Most significant byte first
    Big,
}

/// Width of an unsigned integer field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    /// 1 byte
    U8,
    /// 2 bytes
    U16,
    /// 4 bytes
    U32,
    /// 8 bytes
    U64,
}

impl FieldWidth {
    /// Returns the size of the field in bytes
    pub const fn size(&self) -> usize {
        match self {
            FieldWidth::U8 => 1,
            FieldWidth::U16 => 2,
            FieldWidth::U32 => 4,
            FieldWidth::U64 => 8,
        }
    }

    /// Largest value a field of this width can hold
    pub const fn max_value(&self) -> u64 {
        match self {
            FieldWidth::U8 => u8::MAX as u64,
            FieldWidth::U16 => u16::MAX as u64,
            FieldWidth::U32 => u32::MAX as u64,
            FieldWidth::U64 => u64::MAX,
        }
    }
}
