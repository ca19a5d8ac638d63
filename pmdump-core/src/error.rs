//! Error types for pmdump operations
//!
//! Malformed input data is never an error: the decoder simply does not frame
//! it. Errors describe malformed invocations (a broken schema, values that do
//! not fit a field) and I/O failures while writing tables.

use alloc::string::String;

/// Errors raised when a [`FrameSchema`](crate::schema::FrameSchema) is constructed
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Declared frame size disagrees with header + fields + footer
    #[cfg_attr(
        feature = "std",
        error("Frame size {declared} does not match layout size {computed}")
    )]
    SizeMismatch {
        /// The frame size passed to the schema.
        declared: usize,
        /// Header width + field widths + footer width.
        computed: usize,
    },

    /// Header or footer magic is empty
    #[cfg_attr(feature = "std", error("Magic sequence must not be empty"))]
    EmptyMagic,

    /// Layout has no fields between header and footer
    #[cfg_attr(feature = "std", error("Schema declares no fields"))]
    NoFields,

    /// A field has an empty name
    #[cfg_attr(feature = "std", error("Field at position {0} has an empty name"))]
    EmptyFieldName(usize),

    /// Two fields share a name
    #[cfg_attr(feature = "std", error("Duplicate field name: {0}"))]
    DuplicateField(String),
}

/// Errors that can occur while encoding frames or writing decoded tables
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    /// Number of values does not match the number of schema fields
    #[cfg_attr(
        feature = "std",
        error("Value count mismatch: schema has {expected} fields, got {actual}")
    )]
    ValueCountMismatch {
        /// The number of fields in the schema.
        expected: usize,
        /// The number of values supplied.
        actual: usize,
    },

    /// Value does not fit the width of its field
    #[cfg_attr(
        feature = "std",
        error("Value {value} does not fit field {field} (max {max})")
    )]
    ValueOutOfRange {
        /// Name of the offending field.
        field: String,
        /// The supplied value.
        value: u64,
        /// Largest value the field can hold.
        max: u64,
    },

    /// Named field is not part of the schema
    #[cfg_attr(feature = "std", error("Unknown field: {0}"))]
    UnknownField(String),

    /// IO error during read/write
    #[cfg_attr(feature = "std", error("IO error: {0}"))]
    Io(String),
}

#[cfg(feature = "std")]
impl From<std::io::Error> for FrameError {
    fn from(err: std::io::Error) -> Self {
        FrameError::Io(err.to_string())
    }
}

#[cfg(feature = "std")]
impl From<csv::Error> for FrameError {
    fn from(err: csv::Error) -> Self {
        FrameError::Io(err.to_string())
    }
}
