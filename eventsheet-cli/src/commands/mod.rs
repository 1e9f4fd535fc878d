pub mod config;
pub mod events;
pub mod sources;
pub mod stats;
pub mod venues;

use anyhow::Result;
use eventsheet_core::ParseReport;
use eventsheet_core::config::Source;
use owo_colors::OwoColorize;

use crate::fetch::fetch_text;
use crate::render::render_skip_summary;

/// Fetch and parse a source, reporting a missing header on stderr.
pub async fn load(source: &Source, verbose: bool) -> Result<ParseReport> {
    let text = fetch_text(source).await?;
    let report = eventsheet_core::parse_report(&text, &source.schema);

    if !report.header_found() {
        eprintln!(
            "{}",
            format!("No header row found in {}", source.location).yellow()
        );
    }
    if verbose {
        if let Some(summary) = render_skip_summary(&report) {
            eprintln!("{}", summary);
        }
    }

    Ok(report)
}
