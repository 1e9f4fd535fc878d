use anyhow::Result;
use eventsheet_core::config::Source;
use eventsheet_core::filter::{EventStats, VenueStats};
use eventsheet_core::{EventRecord, Field, VenueRecord};

use crate::render::Render;

/// Counts per venue type for venue-like sheets, per start month otherwise.
pub async fn run(source: Source, json: bool, verbose: bool) -> Result<()> {
    let is_venue_sheet = source
        .schema
        .columns
        .iter()
        .any(|c| c.field == Field::VenueType);

    let report = super::load(&source, verbose).await?;

    if is_venue_sheet {
        let venues: Vec<VenueRecord> = report.into_records();
        let stats = VenueStats::from_venues(&venues);
        print_stats(&stats, json)
    } else {
        let events: Vec<EventRecord> = report.into_records();
        let stats = EventStats::from_events(&events);
        print_stats(&stats, json)
    }
}

fn print_stats<S: Render + serde::Serialize>(stats: &S, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        println!("{}", stats.render());
    }
    Ok(())
}
