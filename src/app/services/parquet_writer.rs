//! Parquet persistence for sounding tables
//!
//! Writes the table as a single record batch of eleven nullable Float64
//! columns, attaching the field-name and unit strings as file-level key-value
//! metadata so the file is self-describing. Read-back reproduces the table
//! and both attribute strings.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::properties::WriterProperties;
use parquet::format::KeyValue;
use tracing::{debug, info};

use crate::app::models::{ObservationRecord, SoundingTable};
use crate::constants::{
    DATASET_ATTRIBUTE_KEY, DATASET_NAME, FIELD_COUNT, FIELD_NAMES, NAME_ATTRIBUTE_KEY,
    UNIT_ATTRIBUTE_KEY,
};
use crate::{Error, Result};

/// A sounding table read back from disk, with its descriptive attributes
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTable {
    /// The reconstructed table
    pub table: SoundingTable,
    /// The space-joined field name attribute
    pub name_attribute: String,
    /// The space-joined unit attribute
    pub unit_attribute: String,
}

/// Arrow schema for the sounding dataset: eleven nullable Float64 columns in
/// source column order
pub fn sounding_schema() -> SchemaRef {
    let fields: Vec<Field> = FIELD_NAMES
        .iter()
        .map(|name| Field::new(*name, DataType::Float64, true))
        .collect();
    Arc::new(Schema::new(fields))
}

fn table_to_record_batch(table: &SoundingTable) -> std::result::Result<RecordBatch, arrow::error::ArrowError> {
    let arrays: Vec<ArrayRef> = (0..FIELD_COUNT)
        .map(|index| Arc::new(Float64Array::from(table.column(index))) as ArrayRef)
        .collect();

    RecordBatch::try_new(sounding_schema(), arrays)
}

/// Write a sounding table to a Parquet file at `path`
///
/// The file carries the dataset name plus `Name` and `Unit` string attributes
/// in its key-value metadata. Any write failure surfaces as
/// [`Error::Persistence`]; the in-memory table passed in is never affected.
pub fn write_table(table: &SoundingTable, path: &Path) -> Result<()> {
    info!(
        "Writing {} observation levels to {}",
        table.len(),
        path.display()
    );

    let batch = table_to_record_batch(table)
        .map_err(|e| Error::persistence_with(path, "failed to assemble record batch", Box::new(e)))?;

    let metadata = vec![
        KeyValue::new(DATASET_ATTRIBUTE_KEY.to_string(), DATASET_NAME.to_string()),
        KeyValue::new(NAME_ATTRIBUTE_KEY.to_string(), SoundingTable::field_names()),
        KeyValue::new(UNIT_ATTRIBUTE_KEY.to_string(), SoundingTable::field_units()),
    ];
    let props = WriterProperties::builder()
        .set_key_value_metadata(Some(metadata))
        .build();

    let file = File::create(path)
        .map_err(|e| Error::persistence_with(path, "failed to create output file", Box::new(e)))?;

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .map_err(|e| Error::persistence_with(path, "failed to create Parquet writer", Box::new(e)))?;

    writer
        .write(&batch)
        .map_err(|e| Error::persistence_with(path, "failed to write record batch", Box::new(e)))?;

    writer
        .close()
        .map_err(|e| Error::persistence_with(path, "failed to finalize Parquet file", Box::new(e)))?;

    debug!("Parquet file written: {}", path.display());
    Ok(())
}

/// Read a persisted sounding table and its attributes back from `path`
pub fn read_table(path: &Path) -> Result<PersistedTable> {
    debug!("Reading sounding table from {}", path.display());

    let file = File::open(path)
        .map_err(|e| Error::persistence_with(path, "failed to open file", Box::new(e)))?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| Error::persistence_with(path, "failed to read Parquet metadata", Box::new(e)))?;

    let key_values = builder
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .cloned()
        .unwrap_or_default();
    let name_attribute = attribute(&key_values, NAME_ATTRIBUTE_KEY, path)?;
    let unit_attribute = attribute(&key_values, UNIT_ATTRIBUTE_KEY, path)?;

    let reader = builder
        .build()
        .map_err(|e| Error::persistence_with(path, "failed to create Parquet reader", Box::new(e)))?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch
            .map_err(|e| Error::persistence_with(path, "failed to read record batch", Box::new(e)))?;
        append_records(&batch, path, &mut records)?;
    }

    Ok(PersistedTable {
        table: SoundingTable::new(records),
        name_attribute,
        unit_attribute,
    })
}

fn attribute(key_values: &[KeyValue], key: &str, path: &Path) -> Result<String> {
    key_values
        .iter()
        .find(|kv| kv.key == key)
        .and_then(|kv| kv.value.clone())
        .ok_or_else(|| Error::persistence(path, format!("missing '{}' attribute", key)))
}

fn append_records(
    batch: &RecordBatch,
    path: &Path,
    records: &mut Vec<ObservationRecord>,
) -> Result<()> {
    let mut columns: Vec<&Float64Array> = Vec::with_capacity(FIELD_COUNT);
    for name in FIELD_NAMES {
        let column = batch
            .column_by_name(name)
            .and_then(|array| array.as_any().downcast_ref::<Float64Array>())
            .ok_or_else(|| {
                Error::persistence(path, format!("missing or mistyped '{}' column", name))
            })?;
        columns.push(column);
    }

    for row in 0..batch.num_rows() {
        let mut values = [None; FIELD_COUNT];
        for (slot, column) in values.iter_mut().zip(columns.iter()) {
            if !column.is_null(row) {
                *slot = Some(column.value(row));
            }
        }
        records.push(ObservationRecord::from_values(values));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_table() -> SoundingTable {
        let surface = ObservationRecord {
            pres: Some(1000.0),
            hght: Some(116.0),
            ..Default::default()
        };
        let aloft = ObservationRecord {
            pres: Some(925.0),
            hght: Some(786.0),
            temp: Some(24.6),
            dwpt: Some(21.6),
            relh: Some(83.0),
            mixr: Some(17.3),
            drct: Some(150.0),
            sknt: Some(13.0),
            thta: Some(301.6),
            thte: Some(352.2),
            thtv: Some(304.7),
        };
        SoundingTable::new(vec![surface, aloft])
    }

    #[test]
    fn test_schema_field_order() {
        let schema = sounding_schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, FIELD_NAMES);
        assert!(schema.fields().iter().all(|f| f.is_nullable()));
    }

    #[test]
    fn test_write_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sounding.parquet");
        let table = sample_table();

        write_table(&table, &path).unwrap();
        let persisted = read_table(&path).unwrap();

        assert_eq!(persisted.table, table);
        assert_eq!(persisted.name_attribute, SoundingTable::field_names());
        assert_eq!(persisted.unit_attribute, SoundingTable::field_units());
    }

    #[test]
    fn test_absent_values_survive_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sounding.parquet");
        let table = sample_table();

        write_table(&table, &path).unwrap();
        let persisted = read_table(&path).unwrap();

        let surface = &persisted.table.records()[0];
        assert_eq!(surface.temp, None);
        assert_eq!(surface.pres, Some(1000.0));
    }

    #[test]
    fn test_empty_table_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.parquet");
        let table = SoundingTable::new(Vec::new());

        write_table(&table, &path).unwrap();
        let persisted = read_table(&path).unwrap();

        assert!(persisted.table.is_empty());
        assert_eq!(persisted.name_attribute, SoundingTable::field_names());
    }

    #[test]
    fn test_unwritable_destination_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no-such-dir").join("sounding.parquet");
        let table = sample_table();

        let result = write_table(&table, &path);
        assert!(matches!(result, Err(Error::Persistence { .. })));
    }
}
