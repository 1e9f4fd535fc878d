use anyhow::Result;
use eventsheet_core::EventRecord;
use eventsheet_core::config::Source;
use eventsheet_core::filter::{filter_by_month, filter_by_year, search_events, split_upcoming};
use owo_colors::OwoColorize;

use crate::render::{EventCard, ImageCycle, Render};

pub struct EventsArgs {
    /// Zero-based month index.
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub search: Option<String>,
    pub timeframe: Timeframe,
    pub json: bool,
    pub images: Vec<String>,
    pub verbose: bool,
}

/// Which side of today to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    All,
    Upcoming,
    Past,
}

pub async fn run(source: Source, args: EventsArgs) -> Result<()> {
    let report = super::load(&source, args.verbose).await?;
    let events: Vec<EventRecord> = report.into_records();

    let mut events = filter_by_year(&filter_by_month(&events, args.month), args.year);
    if let Some(query) = &args.search {
        events = search_events(&events, query);
    }
    if args.timeframe != Timeframe::All {
        let today = chrono::Local::now().date_naive();
        let (upcoming, past) = split_upcoming(&events, today);
        events = match args.timeframe {
            Timeframe::Past => past,
            _ => upcoming,
        };
    }

    let mut images = ImageCycle::new(args.images);
    let cards: Vec<EventCard> = events
        .iter()
        .map(|event| EventCard::new(event, &mut images))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    if cards.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for card in &cards {
        println!("{}\n", card.render());
    }
    println!("{}", format!("{} events", cards.len()).dimmed());

    Ok(())
}
