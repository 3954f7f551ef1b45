//! Command-line argument definitions for the radiosonde fetcher
//!
//! The CLI exposes only the direct parameters of the single retrieval
//! operation; there is no configuration file and no environment variable
//! beyond the standard `RUST_LOG` logging override.

use std::path::PathBuf;

use clap::Parser;

use crate::app::services::request::Encoding;
use crate::constants::DEFAULT_STATION;

/// CLI arguments for the radiosonde fetcher
///
/// Retrieves one upper-air sounding from the University of Wyoming weather
/// archive for a station, date, and hour, and optionally saves it to a
/// Parquet file.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "radiosonde-fetcher",
    version,
    about = "Retrieve one upper-air radiosonde sounding from the Wyoming archive"
)]
pub struct Args {
    /// Four-digit year of the sounding (UTC), e.g. 2021
    #[arg(long = "year", value_name = "YEAR")]
    pub year: i32,

    /// Month of the sounding, 1-12
    #[arg(long = "month", value_name = "MONTH")]
    pub month: u32,

    /// Day of the sounding, 1-31
    #[arg(long = "day", value_name = "DAY")]
    pub day: u32,

    /// Observation hour (UTC); soundings are usually launched at 00 and 12
    #[arg(long = "hour", value_name = "HOUR")]
    pub hour: u32,

    /// Five-digit WMO station identifier
    #[arg(
        short = 's',
        long = "station",
        value_name = "WMO_ID",
        default_value_t = DEFAULT_STATION
    )]
    pub station: u32,

    /// Response encoding: 'text' (wind in m/s) or 'bufr' (wind in knots)
    #[arg(short = 'e', long = "encoding", value_name = "ENCODING", default_value = "text")]
    pub encoding: Encoding,

    /// Save the sounding to this Parquet file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args::parse_from([
            "radiosonde-fetcher",
            "--year",
            "2021",
            "--month",
            "9",
            "--day",
            "21",
            "--hour",
            "12",
        ])
    }

    #[test]
    fn test_defaults() {
        let args = base_args();
        assert_eq!(args.station, DEFAULT_STATION);
        assert_eq!(args.encoding, Encoding::TextList);
        assert!(args.output.is_none());
        assert!(!args.quiet);
    }

    #[test]
    fn test_encoding_selector_parsing() {
        let args = Args::parse_from([
            "radiosonde-fetcher",
            "--year",
            "2021",
            "--month",
            "9",
            "--day",
            "21",
            "--hour",
            "12",
            "--encoding",
            "bufr",
        ]);
        assert_eq!(args.encoding, Encoding::Bufr);

        let result = Args::try_parse_from([
            "radiosonde-fetcher",
            "--year",
            "2021",
            "--month",
            "9",
            "--day",
            "21",
            "--hour",
            "12",
            "--encoding",
            "grib",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = base_args();
        assert_eq!(args.get_log_level(), "warn");

        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");

        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");

        args.verbose = 0;
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }
}
