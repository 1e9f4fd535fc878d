//! Parsed rows and the typed records built from them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{Field, Schema};

/// One accepted data row, keyed by field.
///
/// Fields the schema maps but the line does not reach are stored as empty
/// strings, so lookups never need to distinguish "absent" from "blank".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// 1-based line number in the source text.
    pub line: usize,
    values: BTreeMap<Field, String>,
}

impl Row {
    pub(crate) fn new(line: usize, values: BTreeMap<Field, String>) -> Self {
        Row { line, values }
    }

    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.get(Field::Name)
    }
}

/// A record type that can be built from a [`Row`] of its schema.
pub trait FromRow: Sized {
    fn schema() -> Schema;
    fn from_row(row: &Row) -> Self;
}

/// A conference or meetup from the events listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    /// Free-form location, e.g. "Lisbon, POR".
    pub geo: String,
    pub link: String,
    pub social: String,
    pub chat: String,
}

impl FromRow for EventRecord {
    fn schema() -> Schema {
        Schema::events()
    }

    fn from_row(row: &Row) -> Self {
        EventRecord {
            name: row.get(Field::Name).to_string(),
            start_date: row.get(Field::StartDate).to_string(),
            end_date: row.get(Field::EndDate).to_string(),
            geo: row.get(Field::Geo).to_string(),
            link: row.get(Field::Link).to_string(),
            social: row.get(Field::Social).to_string(),
            chat: row.get(Field::Chat).to_string(),
        }
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A partner venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub venue_type: String,
    pub status: String,
    /// Number of activities hosted, kept as text. "0" when the sheet is blank.
    pub activities: String,
    pub url: String,
}

impl FromRow for VenueRecord {
    fn schema() -> Schema {
        Schema::venues()
    }

    fn from_row(row: &Row) -> Self {
        let activities = match row.get(Field::Activities) {
            "" => "0",
            count => count,
        };

        VenueRecord {
            name: row.get(Field::Name).to_string(),
            venue_type: row.get(Field::VenueType).to_string(),
            status: row.get(Field::Status).to_string(),
            activities: activities.to_string(),
            url: row.get(Field::Url).to_string(),
        }
    }
}

impl fmt::Display for VenueRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
