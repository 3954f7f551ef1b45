use clap::Parser;
use radiosonde_fetcher::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    match commands::run(args) {
        Ok(_table) => {
            // Success - the summary has already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            let mut source = std::error::Error::source(&error);
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            process::exit(1);
        }
    }
}
