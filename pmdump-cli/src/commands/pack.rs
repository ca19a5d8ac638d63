use anyhow::{bail, Context, Result};
use pmdump_core::encoder::{encode_frame, FrameBuilder};
use pmdump_core::FrameSchema;
use serde_json::Value;
use std::fs;
use tracing::info;

/// Turn one JSON record into frame bytes
///
/// A record is either an array of integers in column order or an object
/// keyed by column name (missing columns encode as zero).
fn encode_value(schema: &FrameSchema, index: usize, value: &Value) -> Result<Vec<u8>> {
    let frame = match value {
        Value::Array(items) => {
            let values = items
                .iter()
                .enumerate()
                .map(|(i, v)| as_u64(v, index, &format!("value {}", i)))
                .collect::<Result<Vec<u64>>>()?;
            encode_frame(schema, &values)
        }
        Value::Object(map) => {
            let mut builder = FrameBuilder::new(schema);
            for (name, v) in map {
                builder = builder.field(name, as_u64(v, index, name)?);
            }
            builder.build()
        }
        _ => bail!("Record {}: expected an array or an object", index),
    }
    .with_context(|| format!("Failed to encode record {}", index))?;

    Ok(frame.to_vec())
}

fn as_u64(value: &Value, index: usize, what: &str) -> Result<u64> {
    value
        .as_u64()
        .with_context(|| format!("Record {}: {} is not an unsigned integer", index, what))
}

/// Pack a JSON array of records into a synthetic dump
///
/// `gap` filler bytes of value `noise_byte` precede every frame.
pub fn execute(input: &str, output: &str, gap: usize, noise_byte: u8) -> Result<usize> {
    info!("Packing records from {} to {}", input, output);

    // Read input JSON
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input))?;

    let records: Vec<Value> =
        serde_json::from_str(&content).with_context(|| "Failed to parse JSON input")?;

    info!("Found {} records to pack", records.len());

    let schema = FrameSchema::telemetry();
    let total = schema
        .frame_size()
        .checked_add(gap)
        .and_then(|per_record| per_record.checked_mul(records.len()));
    let Some(total) = total else {
        bail!("Gap of {} bytes is too large for {} records", gap, records.len());
    };
    let mut output_data = Vec::with_capacity(total);

    for (i, record) in records.iter().enumerate() {
        let Some(filled) = output_data.len().checked_add(gap) else {
            bail!("Gap of {} bytes is too large", gap);
        };
        output_data.resize(filled, noise_byte);
        output_data.extend_from_slice(&encode_value(&schema, i, record)?);
    }

    // Write output file
    fs::write(output, &output_data)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    info!(
        "Successfully packed {} records ({} bytes total)",
        records.len(),
        output_data.len()
    );

    Ok(records.len())
}
