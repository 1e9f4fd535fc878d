//! Narrowing record lists by derived fields, and the counts shown above them.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::dates::{derive_date, derive_month_index, derive_year};
use crate::record::{EventRecord, VenueRecord};

/// Slug for a venue type, as used by type filters. Unknown types map to
/// `other`.
pub fn venue_type_slug(venue_type: &str) -> &'static str {
    match venue_type {
        "GastroBar" => "gastrobar",
        "Club Music" => "club-music",
        "Coworking" => "coworking",
        "University" => "university",
        "Restaurant" => "restaurant",
        "Office Partner" => "office-partner",
        "Bar Open Air" => "bar-open-air",
        _ => "other",
    }
}

/// Slug for a partnership status. Anything unrecognised is still "to talk".
pub fn status_slug(status: &str) -> &'static str {
    match status {
        "ACTIVATED" => "activated",
        "OPENING" => "opening",
        _ => "to-talk",
    }
}

/// Events starting in the given zero-based month. `None` keeps everything;
/// events without a recognisable start month are dropped by a month filter.
pub fn filter_by_month(events: &[EventRecord], month: Option<u32>) -> Vec<EventRecord> {
    match month {
        None => events.to_vec(),
        Some(month) => events
            .iter()
            .filter(|e| derive_month_index(&e.start_date) == Some(month))
            .cloned()
            .collect(),
    }
}

/// Events starting in the given year. `None` keeps everything.
pub fn filter_by_year(events: &[EventRecord], year: Option<i32>) -> Vec<EventRecord> {
    match year {
        None => events.to_vec(),
        Some(year) => events
            .iter()
            .filter(|e| derive_year(&e.start_date) == Some(year))
            .cloned()
            .collect(),
    }
}

/// Events whose name or location contains `query`, ignoring case. A blank
/// query keeps everything.
pub fn search_events(events: &[EventRecord], query: &str) -> Vec<EventRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return events.to_vec();
    }
    events
        .iter()
        .filter(|e| {
            e.name.to_lowercase().contains(&query) || e.geo.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Split events around `today` into (upcoming, past).
///
/// Upcoming events run soonest first, followed by undated ones in sheet
/// order. Past events run most recent first. Dates without a year are read
/// as `today`'s year.
pub fn split_upcoming(
    events: &[EventRecord],
    today: NaiveDate,
) -> (Vec<EventRecord>, Vec<EventRecord>) {
    let mut upcoming = Vec::new();
    let mut past = Vec::new();
    let mut undated = Vec::new();

    for event in events {
        match derive_date(&event.start_date, today.year()) {
            Some(date) if date >= today => upcoming.push((date, event.clone())),
            Some(date) => past.push((date, event.clone())),
            None => undated.push(event.clone()),
        }
    }

    upcoming.sort_by_key(|(date, _)| *date);
    past.sort_by_key(|(date, _)| std::cmp::Reverse(*date));

    let mut upcoming: Vec<EventRecord> = upcoming.into_iter().map(|(_, e)| e).collect();
    upcoming.extend(undated);
    (upcoming, past.into_iter().map(|(_, e)| e).collect())
}

/// Venues whose type slug equals `slug`; `all` keeps everything.
pub fn filter_venues_by_type(venues: &[VenueRecord], slug: &str) -> Vec<VenueRecord> {
    if slug == "all" {
        return venues.to_vec();
    }
    venues
        .iter()
        .filter(|v| venue_type_slug(&v.venue_type) == slug)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VenueStats {
    pub total: usize,
    /// Venue type as written in the sheet → count.
    pub by_type: BTreeMap<String, usize>,
}

impl VenueStats {
    pub fn from_venues(venues: &[VenueRecord]) -> Self {
        let mut by_type = BTreeMap::new();
        for venue in venues {
            *by_type.entry(venue.venue_type.clone()).or_insert(0) += 1;
        }
        VenueStats {
            total: venues.len(),
            by_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventStats {
    pub total: usize,
    /// Zero-based start month → count.
    pub by_month: BTreeMap<u32, usize>,
    /// Start year → count, for dates that carry a year.
    pub by_year: BTreeMap<i32, usize>,
    /// Events whose start date has no recognisable month.
    pub undated: usize,
}

impl EventStats {
    pub fn from_events(events: &[EventRecord]) -> Self {
        let mut stats = EventStats {
            total: events.len(),
            ..EventStats::default()
        };
        for event in events {
            match derive_month_index(&event.start_date) {
                Some(month) => *stats.by_month.entry(month).or_insert(0) += 1,
                None => stats.undated += 1,
            }
            if let Some(year) = derive_year(&event.start_date) {
                *stats.by_year.entry(year).or_insert(0) += 1;
            }
        }
        stats
    }
}
