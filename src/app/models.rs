//! Data models for sounding retrieval
//!
//! This module contains the core data structures for representing one
//! atmospheric sounding: a fixed set of eleven numeric fields per observation
//! level, with `None` as the distinguishable absent sentinel.

use crate::constants::{FIELD_COUNT, FIELD_NAMES, FIELD_UNITS};

// =============================================================================
// Observation Record
// =============================================================================

/// One atmospheric sounding level
///
/// All eleven fields are always present as named slots; a field the source
/// left blank is `None`, never zero. Field order matches the column layout of
/// the archive table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObservationRecord {
    /// Atmospheric pressure [hPa]
    pub pres: Option<f64>,
    /// Geopotential height [m]
    pub hght: Option<f64>,
    /// Temperature [C]
    pub temp: Option<f64>,
    /// Dewpoint temperature [C]
    pub dwpt: Option<f64>,
    /// Relative humidity [%]
    pub relh: Option<f64>,
    /// Mixing ratio [g/kg]
    pub mixr: Option<f64>,
    /// Wind direction [degrees true]
    pub drct: Option<f64>,
    /// Wind speed [knot]
    pub sknt: Option<f64>,
    /// Potential temperature [K]
    pub thta: Option<f64>,
    /// Equivalent potential temperature [K]
    pub thte: Option<f64>,
    /// Virtual potential temperature [K]
    pub thtv: Option<f64>,
}

impl ObservationRecord {
    /// Build a record from field values in source column order
    pub fn from_values(values: [Option<f64>; FIELD_COUNT]) -> Self {
        Self {
            pres: values[0],
            hght: values[1],
            temp: values[2],
            dwpt: values[3],
            relh: values[4],
            mixr: values[5],
            drct: values[6],
            sknt: values[7],
            thta: values[8],
            thte: values[9],
            thtv: values[10],
        }
    }

    /// Field values in source column order
    pub fn values(&self) -> [Option<f64>; FIELD_COUNT] {
        [
            self.pres, self.hght, self.temp, self.dwpt, self.relh, self.mixr, self.drct, self.sknt,
            self.thta, self.thte, self.thtv,
        ]
    }

    /// True when every field is the absent sentinel
    pub fn is_blank(&self) -> bool {
        self.values().iter().all(Option::is_none)
    }
}

// =============================================================================
// Sounding Table
// =============================================================================

/// An ordered sequence of observation records for one station, date, and hour
///
/// Records are ordered by increasing line index, which corresponds to
/// increasing altitude in the source table. Created fresh per request and
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundingTable {
    records: Vec<ObservationRecord>,
}

impl SoundingTable {
    /// Create a table from decoded records
    pub fn new(records: Vec<ObservationRecord>) -> Self {
        Self { records }
    }

    /// The observation records in altitude order
    pub fn records(&self) -> &[ObservationRecord] {
        &self.records
    }

    /// Number of observation levels
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table holds no observation levels
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the table and return the records
    pub fn into_records(self) -> Vec<ObservationRecord> {
        self.records
    }

    /// One column of the table, by field index in source order
    pub fn column(&self, index: usize) -> Vec<Option<f64>> {
        self.records
            .iter()
            .map(|record| record.values()[index])
            .collect()
    }

    /// Space-joined field names, in source column order
    pub fn field_names() -> String {
        FIELD_NAMES.join(" ")
    }

    /// Space-joined physical units, in matching order
    pub fn field_units() -> String {
        FIELD_UNITS.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_values_roundtrip_in_source_order() {
        let mut values = [None; FIELD_COUNT];
        for (index, value) in values.iter_mut().enumerate() {
            *value = Some(index as f64);
        }

        let record = ObservationRecord::from_values(values);
        assert_eq!(record.values(), values);
        assert_eq!(record.pres, Some(0.0));
        assert_eq!(record.sknt, Some(7.0));
        assert_eq!(record.thtv, Some(10.0));
    }

    #[test]
    fn test_blank_record() {
        let record = ObservationRecord::default();
        assert!(record.is_blank());

        let record = ObservationRecord {
            temp: Some(0.0),
            ..Default::default()
        };
        assert!(!record.is_blank());
    }

    #[test]
    fn test_field_name_string() {
        assert_eq!(
            SoundingTable::field_names(),
            "PRES HGHT TEMP DWPT RELH MIXR DRCT SKNT THTA THTE THTV"
        );
    }

    #[test]
    fn test_field_unit_string() {
        assert_eq!(SoundingTable::field_units(), "hPa m C C % g/kg deg knot K K K");
    }

    #[test]
    fn test_table_columns() {
        let first = ObservationRecord {
            pres: Some(1000.0),
            ..Default::default()
        };
        let second = ObservationRecord {
            pres: Some(925.0),
            temp: Some(24.6),
            ..Default::default()
        };
        let table = SoundingTable::new(vec![first, second]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.column(0), vec![Some(1000.0), Some(925.0)]);
        assert_eq!(table.column(2), vec![None, Some(24.6)]);
    }
}
