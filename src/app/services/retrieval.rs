//! Single-shot sounding retrieval
//!
//! Composes the request formatter, transport, HTML extraction, decoder, and
//! optional persistence into the one operation this crate exposes: fetch one
//! station/date/hour combination and return its table.

use std::path::Path;

use tracing::info;

use crate::app::models::SoundingTable;
use crate::app::services::request::{Encoding, SoundingRequest};
use crate::app::services::{decoder, fetch, parquet_writer};
use crate::Result;

/// Parse a full archive page into a sounding table
///
/// Pure with respect to the network; `url` is only used to identify the
/// request in parse errors.
pub fn table_from_html(html: &str, url: &str, encoding: Encoding) -> Result<SoundingTable> {
    let block = fetch::extract_pre_block(html, url)?;
    let lines = fetch::retained_lines(&block)?;
    decoder::build_table(&lines, encoding)
}

/// Retrieve one sounding, optionally persisting it to `output`
///
/// Persistence failure is fatal to the call: the decoded table is dropped and
/// the error is surfaced. Callers that need the table regardless can pass no
/// output path and persist separately.
pub fn retrieve(request: &SoundingRequest, output: Option<&Path>) -> Result<SoundingTable> {
    let url = request.url();
    let html = fetch::fetch_html(&url)?;
    let table = table_from_html(&html, &url, request.encoding())?;

    info!(
        "Retrieved {} observation levels for station {} at {}",
        table.len(),
        request.station(),
        request.datetime()
    );

    if let Some(path) = output {
        parquet_writer::write_table(&table, path)?;
    }

    Ok(table)
}
