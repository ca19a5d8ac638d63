//! Frame encoding

use crate::constants::Endianness;
use crate::error::FrameError;
use crate::schema::FrameSchema;
use crate::types::Telemetry;
use alloc::string::String;
use alloc::vec::Vec;
use bytes::{BufMut, Bytes, BytesMut};

/// Encode one frame from field values given in schema order
///
/// The frame is laid out as:
/// 1. Header magic
/// 2. Each field at its declared width and byte order
/// 3. Footer magic
pub fn encode_frame(schema: &FrameSchema, values: &[u64]) -> Result<Bytes, FrameError> {
    let fields = schema.fields();

    if values.len() != fields.len() {
        return Err(FrameError::ValueCountMismatch {
            expected: fields.len(),
            actual: values.len(),
        });
    }

    let mut buf = BytesMut::with_capacity(schema.frame_size());

    buf.put_slice(schema.header_magic());

    for (field, &value) in fields.iter().zip(values) {
        let max = field.width.max_value();
        if value > max {
            return Err(FrameError::ValueOutOfRange {
                field: field.name.clone(),
                value,
                max,
            });
        }

        let size = field.width.size();
        match field.endianness {
            Endianness::Little => buf.put_uint_le(value, size),
            Endianness::Big => buf.put_uint(value, size),
        }
    }

    buf.put_slice(schema.footer_magic());

    debug_assert_eq!(buf.len(), schema.frame_size());
    Ok(buf.freeze())
}

/// Encode a typed telemetry record with the default layout
pub fn encode_telemetry(telemetry: &Telemetry) -> Bytes {
    // Every Telemetry field fits its column, so this cannot fail
    let schema = FrameSchema::telemetry();
    let values = telemetry.to_values();
    let mut buf = BytesMut::with_capacity(schema.frame_size());
    buf.put_slice(schema.header_magic());
    for (field, value) in schema.fields().iter().zip(values) {
        buf.put_uint_le(value, field.width.size());
    }
    buf.put_slice(schema.footer_magic());
    buf.freeze()
}

/// Builder for frames whose fields are set by name
///
/// Fields that are never set encode as zero.
pub struct FrameBuilder<'a> {
    schema: &'a FrameSchema,
    values: Vec<u64>,
    unknown: Option<String>,
}

impl<'a> FrameBuilder<'a> {
    /// Create a new frame builder with every field zeroed
    pub fn new(schema: &'a FrameSchema) -> Self {
        Self {
            schema,
            values: alloc::vec![0; schema.fields().len()],
            unknown: None,
        }
    }

    /// Set the field called `name`
    pub fn field(mut self, name: &str, value: u64) -> Self {
        match self.schema.field_index(name) {
            Some(i) => self.values[i] = value,
            None => {
                if self.unknown.is_none() {
                    self.unknown = Some(String::from(name));
                }
            }
        }
        self
    }

    /// Set all values at once, in schema order
    pub fn values(mut self, values: &[u64]) -> Self {
        self.values = values.to_vec();
        self
    }

    /// Build and encode the frame
    pub fn build(self) -> Result<Bytes, FrameError> {
        if let Some(name) = self.unknown {
            return Err(FrameError::UnknownField(name));
        }
        encode_frame(self.schema, &self.values)
    }
}
