//! Core library for eventsheet.
//!
//! Turns the community's spreadsheet exports (event listings, partner
//! venues) into typed records:
//! - `csv` scans single lines and finds the header row
//! - `schema` describes which column feeds which field
//! - `parser` runs the best-effort parse and reports skipped lines
//! - `dates`, `links` and `filter` derive display and filter values

pub mod config;
pub mod csv;
pub mod dates;
pub mod error;
pub mod filter;
pub mod links;
pub mod parser;
pub mod record;
pub mod schema;

pub use error::{SheetError, SheetResult};
pub use parser::{ParseReport, SkipReason, SkippedRow, parse, parse_records, parse_report};
pub use record::{EventRecord, FromRow, Row, VenueRecord};
pub use schema::{Column, ColumnMapping, Field, Schema};
