//! Sheet parsing: raw export text in, ordered rows out.
//!
//! Parsing is best-effort. Malformed or decorative lines are skipped and
//! listed in the [`ParseReport`]; nothing below the transport layer fails.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::csv::{clean_field, is_noise_line, locate_header, parse_line};
use crate::record::{FromRow, Row};
use crate::schema::{Field, Schema};

/// Why a line after the header did not become a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SkipReason {
    Blank,
    /// Only commas: an empty spreadsheet row.
    Noise,
    Footnote,
    TooFewFields { found: usize, required: usize },
    MissingName,
    /// The name repeats a header label ("Event", "Name", ...).
    Placeholder { name: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Blank => write!(f, "blank line"),
            SkipReason::Noise => write!(f, "empty spreadsheet row"),
            SkipReason::Footnote => write!(f, "footnote"),
            SkipReason::TooFewFields { found, required } => {
                write!(f, "{} fields, need at least {}", found, required)
            }
            SkipReason::MissingName => write!(f, "no name"),
            SkipReason::Placeholder { name } => write!(f, "placeholder name '{}'", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number.
    pub line: usize,
    pub reason: SkipReason,
}

impl SkippedRow {
    /// Skips that point at a broken data row rather than layout noise.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self.reason,
            SkipReason::TooFewFields { .. } | SkipReason::MissingName
        )
    }
}

/// Everything one parse learned about the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// 0-based index of the header line; `None` when scanning found none.
    pub header_line: Option<usize>,
    pub rows: Vec<Row>,
    pub skipped: Vec<SkippedRow>,
}

impl ParseReport {
    pub fn header_found(&self) -> bool {
        self.header_line.is_some()
    }

    pub fn malformed_count(&self) -> usize {
        self.skipped.iter().filter(|s| s.is_malformed()).count()
    }

    pub fn into_records<R: FromRow>(self) -> Vec<R> {
        self.rows.iter().map(R::from_row).collect()
    }
}

/// Parse `text` with `schema`, keeping the skip diagnostics.
pub fn parse_report(text: &str, schema: &Schema) -> ParseReport {
    let lines: Vec<&str> = text.split('\n').collect();

    let Some(header_index) = locate_header(&lines, &schema.header) else {
        warn!(schema = %schema.name, "header row not found; no records parsed");
        return ParseReport::default();
    };
    debug!(schema = %schema.name, line = header_index + 1, "found header");

    let header_fields = parse_line(lines.get(header_index).map_or("", |l| l.trim()));
    let binding = schema.bind(&header_fields);

    let mut report = ParseReport {
        header_line: Some(header_index),
        ..ParseReport::default()
    };

    for (index, raw) in lines.iter().enumerate().skip(header_index + 1) {
        let line_number = index + 1;
        match parse_row(raw, line_number, schema, &binding) {
            Ok(row) => {
                debug!(line = line_number, name = row.name(), "accepted row");
                report.rows.push(row);
            }
            Err(reason) => {
                debug!(line = line_number, %reason, "skipped line");
                report.skipped.push(SkippedRow {
                    line: line_number,
                    reason,
                });
            }
        }
    }

    info!(
        schema = %schema.name,
        rows = report.rows.len(),
        malformed = report.malformed_count(),
        "parsed sheet"
    );

    report
}

/// Parse `text` with `schema` into rows.
///
/// Returns an empty list when the header cannot be found or there are no
/// data rows. Never fails.
pub fn parse(text: &str, schema: &Schema) -> Vec<Row> {
    parse_report(text, schema).rows
}

/// Parse `text` into typed records using the record's own schema.
pub fn parse_records<R: FromRow>(text: &str) -> Vec<R> {
    parse_report(text, &R::schema()).into_records()
}

fn parse_row(
    raw: &str,
    line_number: usize,
    schema: &Schema,
    binding: &[(Field, usize)],
) -> Result<Row, SkipReason> {
    let line = raw.trim();

    if line.is_empty() {
        return Err(SkipReason::Blank);
    }
    if is_noise_line(line) {
        return Err(SkipReason::Noise);
    }
    if schema.is_footnote(line) {
        return Err(SkipReason::Footnote);
    }

    let fields = parse_line(line);
    if fields.len() < schema.min_fields {
        return Err(SkipReason::TooFewFields {
            found: fields.len(),
            required: schema.min_fields,
        });
    }

    let values: BTreeMap<_, _> = binding
        .iter()
        .map(|(field, index)| {
            let value = fields.get(*index).map(|f| clean_field(f)).unwrap_or_default();
            (*field, value)
        })
        .collect();

    let row = Row::new(line_number, values);
    let name = row.name();

    if name.is_empty() {
        return Err(SkipReason::MissingName);
    }
    if schema.is_placeholder(name) {
        return Err(SkipReason::Placeholder {
            name: name.to_string(),
        });
    }

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{EventRecord, VenueRecord};
    use crate::schema::ColumnMapping;

    const EVENTS_CSV: &str = "\
2025 Ethereum Events,,,,,,,
Community maintained list,,,,,,,
,,,,,,,
,Event,startDate,endDate,Geo,Link,Social,Chat
,ETHDenver,23/02/2025,02/03/2025,\"Denver, USA\",ethdenver.com,EthereumDenver,-
,,,,,,,

,EthCC,30/06/2025,03/07/2025,\"Cannes, FRA\",https://ethcc.io,@EthCC,t.me/ethcc
,Event,startDate,endDate,Geo,Link,Social,Chat
,TBD,,,,,,
,Half a row,01/01/2025
,,10/10/2025,,Nowhere,,,
,\"Devcon 8\",03/11/2025,-,\"Mumbai, IND\",devcon.org,EFDevcon,discord.gg/devcon
Last update: 01/05/2025,,,,,,,
*not ethereum specific,,,,,,,
";

    const VENUES_CSV: &str = "\
Name,TYPE,Status,ACTIVIDADES,URL
La Tienda,GastroBar,ACTIVATED,4,https://maps.app/tienda
\"Casa, Club\",Club Music,OPENING,,
Uni Valle,University,TO TALK,1
Name,TYPE,Status,ACTIVIDADES,URL
Stub,Coworking
";

    #[test]
    fn events_are_parsed_in_order() {
        let events: Vec<EventRecord> = parse_records(EVENTS_CSV);
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["ETHDenver", "EthCC", "Devcon 8"]);

        let denver = &events[0];
        assert_eq!(denver.geo, "Denver, USA");
        assert_eq!(denver.start_date, "23/02/2025");
        assert_eq!(denver.chat, "-");
    }

    #[test]
    fn event_report_explains_skips() {
        let report = parse_report(EVENTS_CSV, &Schema::events());
        assert_eq!(report.header_line, Some(3));
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[0].line, 5);

        let reasons: Vec<&SkipReason> = report.skipped.iter().map(|s| &s.reason).collect();
        assert!(reasons.contains(&&SkipReason::Noise));
        assert!(reasons.contains(&&SkipReason::Blank));
        assert!(reasons.contains(&&SkipReason::Footnote));
        assert!(reasons.contains(&&SkipReason::MissingName));
        assert!(reasons.contains(&&SkipReason::Placeholder {
            name: "Event".to_string()
        }));
        assert!(reasons.contains(&&SkipReason::Placeholder {
            name: "TBD".to_string()
        }));
        assert!(reasons.contains(&&SkipReason::TooFewFields {
            found: 3,
            required: 8
        }));
        assert_eq!(report.malformed_count(), 2);
    }

    #[test]
    fn venues_use_first_line_header() {
        let venues: Vec<VenueRecord> = parse_records(VENUES_CSV);
        assert_eq!(venues.len(), 3);
        assert_eq!(venues[1].name, "Casa, Club");
        assert_eq!(venues[1].activities, "0");
        assert_eq!(venues[2].url, "");
        assert_eq!(venues[2].status, "TO TALK");
    }

    #[test]
    fn missing_header_in_scan_mode_yields_nothing() {
        let report = parse_report(VENUES_CSV, &Schema::events());
        assert!(!report.header_found());
        assert!(report.rows.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn header_only_is_empty_not_error() {
        assert!(parse(",Event,startDate,endDate,Geo,Link,Social,Chat\n", &Schema::events()).is_empty());
        assert!(parse("Name,TYPE,Status,ACTIVIDADES,URL", &Schema::venues()).is_empty());
        assert!(parse("", &Schema::venues()).is_empty());
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let text = "Name,TYPE,Status,ACTIVIDADES,URL\r\nLa Tienda,GastroBar,ACTIVATED,4,\r\n";
        let venues: Vec<VenueRecord> = parse_records(text);
        assert_eq!(venues.len(), 1);
        assert_eq!(venues[0].activities, "4");
    }

    #[test]
    fn parsing_is_idempotent() {
        let schema = Schema::events();
        assert_eq!(parse(EVENTS_CSV, &schema), parse(EVENTS_CSV, &schema));
    }

    #[test]
    fn header_name_mapping_reads_reordered_sheet() {
        let mut schema = Schema::venues();
        schema.mapping = ColumnMapping::ByHeaderName;
        let text = "Status,URL,Name,TYPE,ACTIVIDADES\nOPENING,,Parque,Bar Open Air,2\n";

        let rows = parse(text, &schema);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name(), "Parque");
        assert_eq!(rows[0].get(Field::VenueType), "Bar Open Air");
        assert_eq!(rows[0].get(Field::Status), "OPENING");
    }
}
