//! CLI command implementation for the radiosonde fetcher
//!
//! Wires argument parsing, logging setup, the retrieval operation, and the
//! human-readable summary together.

use tracing::debug;

use crate::app::services::request::SoundingRequest;
use crate::app::services::retrieval;
use crate::cli::args::Args;
use crate::{Result, SoundingTable};

/// Run the single retrieval operation described by the CLI arguments
pub fn run(args: Args) -> Result<SoundingTable> {
    setup_logging(&args);

    let request = SoundingRequest::new(
        args.year,
        args.month,
        args.day,
        args.hour,
        args.station,
        args.encoding,
    )?;
    debug!("Query URL: {}", request.url());

    let table = retrieval::retrieve(&request, args.output.as_deref())?;

    report(&request, &table, &args);
    Ok(table)
}

/// Print a summary of the retrieved sounding unless in quiet mode
fn report(request: &SoundingRequest, table: &SoundingTable, args: &Args) {
    if args.quiet {
        return;
    }

    println!(
        "Station {} at {}: {} observation levels",
        request.station(),
        request.datetime(),
        table.len()
    );
    println!("Fields: {}", SoundingTable::field_names());
    println!("Units:  {}", SoundingTable::field_units());

    if let Some(output) = &args.output {
        println!("Saved to {}", output.display());
    }
}

/// Set up structured logging driven by the verbosity flags
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("radiosonde_fetcher={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}
