use anyhow::Result;
use eventsheet_core::VenueRecord;
use eventsheet_core::config::Source;
use eventsheet_core::filter::filter_venues_by_type;
use owo_colors::OwoColorize;

use crate::render::{Render, VenueCard};

pub async fn run(source: Source, type_slug: &str, json: bool, verbose: bool) -> Result<()> {
    let report = super::load(&source, verbose).await?;
    let venues: Vec<VenueRecord> = report.into_records();
    let venues = filter_venues_by_type(&venues, type_slug);

    let cards: Vec<VenueCard> = venues.iter().map(VenueCard::from).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    if cards.is_empty() {
        println!("{}", "No venues found".dimmed());
        return Ok(());
    }

    for card in &cards {
        println!("{}\n", card.render());
    }
    println!("{}", format!("{} venues", cards.len()).dimmed());

    Ok(())
}
