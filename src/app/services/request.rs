//! Query formatting for the Wyoming sounding archive
//!
//! The two supported response encodings differ in URL template, datetime
//! serialization, and wind-speed unit. They are modeled as a closed enum with
//! a per-variant profile so adding an encoding is a one-entry change.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::constants::{
    BUFR_DATETIME_FORMAT, BUFR_URL_TEMPLATE, TEXT_LIST_DATETIME_FORMAT, TEXT_LIST_URL_TEMPLATE,
};
use crate::{Error, Result};

/// Supported archive response encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// The `TEXT:LIST` listing; wind speed arrives in m/s
    TextList,
    /// The BUFR-derived listing; wind speed arrives in knots
    Bufr,
}

/// Per-encoding query configuration
#[derive(Debug, Clone, Copy)]
pub struct EncodingProfile {
    /// URL template with `{datetime}` and `{station}` placeholders
    pub url_template: &'static str,
    /// chrono format string for the `{datetime}` placeholder
    pub datetime_format: &'static str,
    /// True when the source reports wind speed in m/s and SKNT needs the
    /// m/s-to-knots conversion
    pub wind_in_mps: bool,
}

const TEXT_LIST_PROFILE: EncodingProfile = EncodingProfile {
    url_template: TEXT_LIST_URL_TEMPLATE,
    datetime_format: TEXT_LIST_DATETIME_FORMAT,
    wind_in_mps: true,
};

const BUFR_PROFILE: EncodingProfile = EncodingProfile {
    url_template: BUFR_URL_TEMPLATE,
    datetime_format: BUFR_DATETIME_FORMAT,
    wind_in_mps: false,
};

impl Encoding {
    /// The query configuration for this encoding
    pub fn profile(&self) -> &'static EncodingProfile {
        match self {
            Encoding::TextList => &TEXT_LIST_PROFILE,
            Encoding::Bufr => &BUFR_PROFILE,
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "textlist" | "text:list" => Ok(Encoding::TextList),
            "bufr" => Ok(Encoding::Bufr),
            other => Err(Error::unsupported_encoding(other)),
        }
    }
}

/// One validated sounding request: station, UTC datetime, and encoding
///
/// Construction validates the calendar combination; an invalid date or hour
/// fails with [`Error::InvalidDate`] before any network activity occurs.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundingRequest {
    datetime: NaiveDateTime,
    station: u32,
    encoding: Encoding,
}

impl SoundingRequest {
    /// Create a request, validating the calendar fields
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        station: u32,
        encoding: Encoding,
    ) -> Result<Self> {
        let datetime = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .ok_or_else(|| Error::invalid_date(year, month, day, hour))?;

        Ok(Self {
            datetime,
            station,
            encoding,
        })
    }

    /// The fully formed archive query URL for this request
    pub fn url(&self) -> String {
        let profile = self.encoding.profile();
        let datetime = self.datetime.format(profile.datetime_format).to_string();

        profile
            .url_template
            .replace("{datetime}", &datetime)
            .replace("{station}", &self.station.to_string())
    }

    /// The requested observation time (UTC)
    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    /// The WMO station identifier
    pub fn station(&self) -> u32 {
        self.station
    }

    /// The selected response encoding
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_calendar_day_rejected() {
        let result = SoundingRequest::new(2021, 2, 30, 12, 57494, Encoding::TextList);
        assert!(matches!(
            result,
            Err(Error::InvalidDate {
                year: 2021,
                month: 2,
                day: 30,
                hour: 12,
            })
        ));
    }

    #[test]
    fn test_invalid_hour_rejected() {
        let result = SoundingRequest::new(2021, 9, 21, 24, 57494, Encoding::TextList);
        assert!(matches!(result, Err(Error::InvalidDate { .. })));
    }

    #[test]
    fn test_text_list_url() {
        let request = SoundingRequest::new(2021, 9, 21, 12, 57494, Encoding::TextList).unwrap();
        assert_eq!(
            request.url(),
            "http://weather.uwyo.edu/wsgi/sounding?datetime=2021-09-21%2012:00:00&id=57494&type=TEXT:LIST"
        );
    }

    #[test]
    fn test_bufr_url() {
        let request = SoundingRequest::new(2014, 5, 8, 0, 54511, Encoding::Bufr).unwrap();
        assert_eq!(
            request.url(),
            "http://weather.uwyo.edu/cgi-bin/bufrraob.py?src=bufr&datetime=201405080000&id=54511&type=TEXT:LIST"
        );
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("text".parse::<Encoding>().unwrap(), Encoding::TextList);
        assert_eq!("TEXT:LIST".parse::<Encoding>().unwrap(), Encoding::TextList);
        assert_eq!("bufr".parse::<Encoding>().unwrap(), Encoding::Bufr);

        let result = "grib".parse::<Encoding>();
        assert!(matches!(
            result,
            Err(Error::UnsupportedEncoding { selector }) if selector == "grib"
        ));
    }

    #[test]
    fn test_profiles_differ_in_wind_unit() {
        assert!(Encoding::TextList.profile().wind_in_mps);
        assert!(!Encoding::Bufr.profile().wind_in_mps);
    }
}
