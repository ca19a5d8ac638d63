//! Frame schema: the static description of one record's binary layout

use crate::constants::{
    Endianness, FieldWidth, FOOTER_MAGIC, FRAME_SIZE, HEADER_MAGIC, TELEMETRY_COLUMNS,
};
use crate::error::SchemaError;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// One field between the header and the footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Column name used in tabular output
    pub name: String,

    /// Width of the unsigned integer
    pub width: FieldWidth,

    /// Byte order of the field
    pub endianness: Endianness,
}

impl FieldDescriptor {
    /// Create a new field descriptor
    pub fn new(name: impl Into<String>, width: FieldWidth, endianness: Endianness) -> Self {
        Self {
            name: name.into(),
            width,
            endianness,
        }
    }

    /// Little-endian field, the byte order of the logger firmware
    pub fn le(name: impl Into<String>, width: FieldWidth) -> Self {
        Self::new(name, width, Endianness::Little)
    }

    /// Read this field from the start of `bytes`
    ///
    /// `bytes` must hold at least `self.width.size()` bytes; the schema
    /// guarantees this for every window the decoder hands out.
    pub(crate) fn read(&self, bytes: &[u8]) -> u64 {
        let raw = &bytes[..self.width.size()];
        match self.endianness {
            Endianness::Little => raw
                .iter()
                .rev()
                .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
            Endianness::Big => raw.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
        }
    }
}

/// Immutable, validated frame layout
///
/// A schema is passed explicitly to every decode and write call, so several
/// layout versions can be used side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSchema {
    header_magic: Vec<u8>,
    footer_magic: Vec<u8>,
    frame_size: usize,
    fields: Vec<FieldDescriptor>,
}

impl FrameSchema {
    /// Build a schema, checking that the layout adds up to `frame_size`
    pub fn new(
        header_magic: &[u8],
        footer_magic: &[u8],
        frame_size: usize,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self, SchemaError> {
        if header_magic.is_empty() || footer_magic.is_empty() {
            return Err(SchemaError::EmptyMagic);
        }

        if fields.is_empty() {
            return Err(SchemaError::NoFields);
        }

        for (i, field) in fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName(i));
            }
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        let computed = header_magic.len()
            + fields.iter().map(|f| f.width.size()).sum::<usize>()
            + footer_magic.len();

        if computed != frame_size {
            return Err(SchemaError::SizeMismatch {
                declared: frame_size,
                computed,
            });
        }

        Ok(Self {
            header_magic: header_magic.to_vec(),
            footer_magic: footer_magic.to_vec(),
            frame_size,
            fields,
        })
    }

    /// The 30-byte OpenAir multi-sensor layout
    ///
    /// Counter and timestamp are u32, followed by particle count and
    /// concentration (u16) for SPS30, PMSA003I, PM2012 and PM2016. The PM2012
    /// reports two concentrations, calibrated against GRIMM and TSI reference
    /// instruments.
    pub fn telemetry() -> Self {
        let fields = TELEMETRY_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let width = if i < 2 {
                    FieldWidth::U32
                } else {
                    FieldWidth::U16
                };
                FieldDescriptor::le(name.to_string(), width)
            })
            .collect();

        Self {
            header_magic: HEADER_MAGIC.to_vec(),
            footer_magic: FOOTER_MAGIC.to_vec(),
            frame_size: FRAME_SIZE,
            fields,
        }
    }

    /// Total frame size in bytes
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Bytes that open every frame
    pub fn header_magic(&self) -> &[u8] {
        &self.header_magic
    }

    /// Bytes that close every frame
    pub fn footer_magic(&self) -> &[u8] {
        &self.footer_magic
    }

    /// Field descriptors in frame order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Position of the field called `name`
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Column names in frame order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Parse every field out of a complete frame window
    pub(crate) fn parse_fields(&self, window: &[u8]) -> Vec<u64> {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut at = self.header_magic.len();
        for field in &self.fields {
            values.push(field.read(&window[at..]));
            at += field.width.size();
        }
        values
    }
}

impl Default for FrameSchema {
    fn default() -> Self {
        Self::telemetry()
    }
}
