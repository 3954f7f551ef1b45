//! Fixed-width record decoding for sounding tables
//!
//! Each observation line is sliced into eleven seven-byte fields at fixed
//! offsets. A field of exactly seven spaces is the absent sentinel; any other
//! content must parse as a float or the whole line fails. The table build is
//! atomic: one bad line abandons the entire retrieval.

use tracing::debug;

use crate::app::models::{ObservationRecord, SoundingTable};
use crate::app::services::request::Encoding;
use crate::constants::{
    BLANK_FIELD, FIELD_COUNT, FIELD_SPANS, KNOTS_PER_METER_PER_SECOND, RECORD_WIDTH,
};
use crate::{Error, Result};

/// Decode one fixed-width observation line
///
/// `index` is the zero-based position of the line among the retained lines
/// and is carried into any error for diagnosis.
pub fn decode_record(line: &str, index: usize, encoding: Encoding) -> Result<ObservationRecord> {
    let bytes = line.as_bytes();
    if bytes.len() < RECORD_WIDTH {
        return Err(Error::malformed_record(
            index,
            line,
            format!(
                "line is {} bytes, expected at least {}",
                bytes.len(),
                RECORD_WIDTH
            ),
        ));
    }

    let mut values = [None; FIELD_COUNT];
    for (slot, &(name, start, end)) in values.iter_mut().zip(FIELD_SPANS.iter()) {
        let field = std::str::from_utf8(&bytes[start..end]).map_err(|_| {
            Error::malformed_record(index, line, format!("field {} is not valid UTF-8", name))
        })?;

        // Exact-width blank check; a partially blank field is attempted as a
        // number below.
        if field == BLANK_FIELD {
            continue;
        }

        let value = field.trim().parse::<f64>().map_err(|_| {
            Error::malformed_record(
                index,
                line,
                format!("field {} is non-blank but not numeric: {:?}", name, field),
            )
        })?;
        *slot = Some(value);
    }

    let mut record = ObservationRecord::from_values(values);
    if encoding.profile().wind_in_mps {
        record.sknt = record.sknt.map(|speed| speed * KNOTS_PER_METER_PER_SECOND);
    }

    Ok(record)
}

/// Decode every retained line in order into a sounding table
///
/// Fails atomically: the first decoder error aborts the build and no partial
/// table is returned.
pub fn build_table(lines: &[&str], encoding: Encoding) -> Result<SoundingTable> {
    let mut records = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        let record = decode_record(line, index, encoding).map_err(|error| {
            Error::parse_failure(
                format!("sounding table aborted at line {}", index),
                Some(error),
            )
        })?;
        records.push(record);
    }

    debug!("Decoded {} observation levels", records.len());
    Ok(SoundingTable::new(records))
}
