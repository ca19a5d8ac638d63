//! # pmdump Core
//!
//! Recovery of fixed-layout sensor telemetry frames from raw flash dumps.
//!
//! ## Modules
//!
//! - `constants`: Frame format constants
//! - `schema`: Frame layout description (`FrameSchema`)
//! - `decoder`: Resynchronizing frame scanner
//! - `encoder`: Frame encoding
//! - `types`: Decoded records, scan statistics and the typed telemetry view
//! - `table`: Delimited text output (requires `std`)

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod schema;
#[cfg(feature = "std")]
pub mod table;
pub mod types;

// Re-export commonly used types
pub use decoder::{decode, FrameScanner};
pub use error::{FrameError, SchemaError};
pub use schema::{FieldDescriptor, FrameSchema};
pub use types::{DecodeOutcome, DecodeStatus, DecodedRecord, ScanStats, Telemetry};

/// Result type alias for pmdump operations
pub type Result<T> = core::result::Result<T, FrameError>;
