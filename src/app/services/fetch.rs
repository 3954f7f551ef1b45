//! HTTP retrieval and HTML extraction for sounding pages
//!
//! One synchronous GET per request, no retry. The archive embeds the sounding
//! table in a single `<pre>` block; everything else on the page is discarded.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use crate::constants::HEADER_LINE_COUNT;
use crate::{Error, Result};

/// Fetch the archive page for a formatted query URL
pub fn fetch_html(url: &str) -> Result<String> {
    info!("Fetching sounding page: {}", url);

    let response = reqwest::blocking::get(url)
        .map_err(|e| Error::transport(url, "request failed", Some(e)))?
        .error_for_status()
        .map_err(|e| Error::transport(url, "non-success HTTP status", Some(e)))?;

    let body = response
        .text()
        .map_err(|e| Error::transport(url, "failed to read response body", Some(e)))?;

    debug!("Fetched {} bytes", body.len());
    Ok(body)
}

fn pre_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<pre[^>]*>(.*?)</pre>").expect("valid regex literal"))
}

/// Isolate the first `<pre>` block from the response body
///
/// The URL is carried into the error so a malformed page identifies the
/// request that produced it.
pub fn extract_pre_block(html: &str, url: &str) -> Result<String> {
    let captures = pre_block_regex().captures(html).ok_or_else(|| {
        Error::parse_failure(format!("no <pre> block in response from '{}'", url), None)
    })?;

    Ok(captures[1].to_string())
}

/// The observation lines of a `<pre>` block
///
/// Discards the first five header/banner lines and the trailing blank line,
/// matching the archive's listing layout.
pub fn retained_lines(block: &str) -> Result<Vec<&str>> {
    let lines: Vec<&str> = block.split('\n').collect();

    if lines.len() <= HEADER_LINE_COUNT + 1 {
        return Err(Error::parse_failure(
            format!(
                "sounding block has {} lines, expected more than {}",
                lines.len(),
                HEADER_LINE_COUNT + 1
            ),
            None,
        ));
    }

    Ok(lines[HEADER_LINE_COUNT..lines.len() - 1].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = "<html><body><h2>Sounding</h2>\
        <PRE>\nbanner\nPRES HGHT\nhPa m\n-----\nline one\nline two\n</PRE>\
        <p>footer</p></body></html>";

    #[test]
    fn test_extract_pre_block() {
        let block = extract_pre_block(SAMPLE_PAGE, "http://example/sounding").unwrap();
        assert!(block.starts_with("\nbanner"));
        assert!(block.ends_with("line two\n"));
        assert!(!block.contains("footer"));
    }

    #[test]
    fn test_extract_pre_block_missing() {
        let result = extract_pre_block("<html><body>nothing here</body></html>", "http://x");
        assert!(matches!(
            result,
            Err(Error::ParseFailure { message, .. }) if message.contains("http://x")
        ));
    }

    #[test]
    fn test_retained_lines_drop_header_and_trailing_blank() {
        let block = "\nbanner\nPRES HGHT\nhPa m\n-----\nline one\nline two\n";
        let lines = retained_lines(block).unwrap();
        assert_eq!(lines, vec!["line one", "line two"]);
    }

    #[test]
    fn test_retained_lines_too_short() {
        let result = retained_lines("\nbanner\nonly\n");
        assert!(matches!(result, Err(Error::ParseFailure { .. })));
    }
}
