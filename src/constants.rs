//! Application constants for the radiosonde fetcher
//!
//! This module contains the fixed-width column layout of the Wyoming sounding
//! table, the archive URL templates, and the persistence attribute keys used
//! throughout the application.

// =============================================================================
// Fixed-Width Column Layout
// =============================================================================

/// Number of fields in one observation record
pub const FIELD_COUNT: usize = 11;

/// Width of one fixed-width field in bytes
pub const FIELD_WIDTH: usize = 7;

/// Minimum expected width of one observation line in bytes
pub const RECORD_WIDTH: usize = FIELD_COUNT * FIELD_WIDTH;

/// Field names in source column order
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "PRES", "HGHT", "TEMP", "DWPT", "RELH", "MIXR", "DRCT", "SKNT", "THTA", "THTE", "THTV",
];

/// Physical units for each field, in matching order
pub const FIELD_UNITS: [&str; FIELD_COUNT] = [
    "hPa", "m", "C", "C", "%", "g/kg", "deg", "knot", "K", "K", "K",
];

/// Byte spans of each field within an observation line: (name, start, end)
pub const FIELD_SPANS: [(&str, usize, usize); FIELD_COUNT] = [
    ("PRES", 0, 7),
    ("HGHT", 7, 14),
    ("TEMP", 14, 21),
    ("DWPT", 21, 28),
    ("RELH", 28, 35),
    ("MIXR", 35, 42),
    ("DRCT", 42, 49),
    ("SKNT", 49, 56),
    ("THTA", 56, 63),
    ("THTE", 63, 70),
    ("THTV", 70, 77),
];

/// A field of exactly this content decodes as the absent sentinel
pub const BLANK_FIELD: &str = "       ";

/// Number of header/banner lines to discard from the top of the `<pre>` block
pub const HEADER_LINE_COUNT: usize = 5;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Wind speed conversion factor from m/s to knots
pub const KNOTS_PER_METER_PER_SECOND: f64 = 1.944;

// =============================================================================
// Archive Query Templates
// =============================================================================

/// Query template for the TEXT:LIST encoding (wind reported in m/s)
pub const TEXT_LIST_URL_TEMPLATE: &str =
    "http://weather.uwyo.edu/wsgi/sounding?datetime={datetime}&id={station}&type=TEXT:LIST";

/// Datetime serialization for the TEXT:LIST encoding (space URL-escaped)
pub const TEXT_LIST_DATETIME_FORMAT: &str = "%Y-%m-%d%%20%H:%M:%S";

/// Query template for the BUFR-derived encoding (wind reported in knots)
pub const BUFR_URL_TEMPLATE: &str =
    "http://weather.uwyo.edu/cgi-bin/bufrraob.py?src=bufr&datetime={datetime}&id={station}&type=TEXT:LIST";

/// Datetime serialization for the BUFR-derived encoding
pub const BUFR_DATETIME_FORMAT: &str = "%Y%m%d%H%M";

/// Default station identifier (WMO 57494, Wuhan)
pub const DEFAULT_STATION: u32 = 57494;

// =============================================================================
// Persistence Layout
// =============================================================================

/// Dataset name recorded in persisted files
pub const DATASET_NAME: &str = "RadioSonde";

/// Metadata key for the space-joined field name string
pub const NAME_ATTRIBUTE_KEY: &str = "Name";

/// Metadata key for the space-joined unit string
pub const UNIT_ATTRIBUTE_KEY: &str = "Unit";

/// Metadata key for the dataset name
pub const DATASET_ATTRIBUTE_KEY: &str = "Dataset";
