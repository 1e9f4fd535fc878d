//! Schema descriptors: which columns of a sheet become which record fields.
//!
//! Every sheet flavour is described by data instead of its own parsing code.
//! The two built-in schemas cover the events and venues exports; custom
//! schemas can be declared in the config file (see [`SchemaSpec`]).

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::csv::{HeaderMode, clean_field};
use crate::error::{SheetError, SheetResult};

pub const EVENTS_SCHEMA: &str = "events";
pub const VENUES_SCHEMA: &str = "venues";

/// A named record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    StartDate,
    EndDate,
    Geo,
    Link,
    Social,
    Chat,
    #[serde(alias = "type")]
    VenueType,
    Status,
    Activities,
    Url,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::Name => "name",
            Field::StartDate => "start_date",
            Field::EndDate => "end_date",
            Field::Geo => "geo",
            Field::Link => "link",
            Field::Social => "social",
            Field::Chat => "chat",
            Field::VenueType => "venue_type",
            Field::Status => "status",
            Field::Activities => "activities",
            Field::Url => "url",
        };
        write!(f, "{}", s)
    }
}

/// How column positions are decided once the header row is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMapping {
    /// Use each column's fixed index.
    #[default]
    Positional,
    /// Look each column's header label up in the header row, falling back
    /// to the fixed index when the label is absent.
    ByHeaderName,
}

/// One column of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub field: Field,
    pub index: usize,
    /// Header label, used by [`ColumnMapping::ByHeaderName`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

impl Column {
    fn new(field: Field, index: usize, header: &str) -> Self {
        Column {
            field,
            index,
            header: Some(header.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub name: String,
    pub header: HeaderMode,
    pub mapping: ColumnMapping,
    pub columns: Vec<Column>,
    /// Rows with fewer raw fields than this are skipped.
    pub min_fields: usize,
    /// Name values that mark a repeated header rather than a real row.
    pub placeholders: Vec<String>,
    /// Line prefixes of notes appended below the data.
    pub footnotes: Vec<String>,
}

impl Schema {
    /// The conference listing export: a title block above a header row that
    /// starts with an empty column.
    pub fn events() -> Self {
        Schema {
            name: EVENTS_SCHEMA.to_string(),
            header: HeaderMode::ScanForSignature("Event,startDate,endDate".to_string()),
            mapping: ColumnMapping::Positional,
            columns: vec![
                Column::new(Field::Name, 1, "Event"),
                Column::new(Field::StartDate, 2, "startDate"),
                Column::new(Field::EndDate, 3, "endDate"),
                Column::new(Field::Geo, 4, "Geo"),
                Column::new(Field::Link, 5, "Link"),
                Column::new(Field::Social, 6, "Social"),
                Column::new(Field::Chat, 7, "Chat"),
            ],
            min_fields: 8,
            placeholders: vec!["Event".to_string(), "TBD".to_string()],
            footnotes: vec!["Last update".to_string(), "*not ethereum".to_string()],
        }
    }

    /// The partner venue export: header on line 0, URL column optional.
    pub fn venues() -> Self {
        Schema {
            name: VENUES_SCHEMA.to_string(),
            header: HeaderMode::FirstLine,
            mapping: ColumnMapping::Positional,
            columns: vec![
                Column::new(Field::Name, 0, "Name"),
                Column::new(Field::VenueType, 1, "TYPE"),
                Column::new(Field::Status, 2, "Status"),
                Column::new(Field::Activities, 3, "ACTIVIDADES"),
                Column::new(Field::Url, 4, "URL"),
            ],
            min_fields: 4,
            placeholders: vec!["Name".to_string()],
            footnotes: Vec::new(),
        }
    }

    /// Look up a built-in schema.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            EVENTS_SCHEMA => Some(Self::events()),
            VENUES_SCHEMA => Some(Self::venues()),
            _ => None,
        }
    }

    pub fn validate(&self) -> SheetResult<()> {
        if !self.columns.iter().any(|c| c.field == Field::Name) {
            return Err(SheetError::InvalidSchema(format!(
                "schema '{}' has no name column",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.field) {
                return Err(SheetError::InvalidSchema(format!(
                    "schema '{}' maps field '{}' more than once",
                    self.name, column.field
                )));
            }
        }

        if self.min_fields == 0 {
            return Err(SheetError::InvalidSchema(format!(
                "schema '{}' must require at least one field",
                self.name
            )));
        }

        if self.mapping == ColumnMapping::ByHeaderName && self.header != HeaderMode::FirstLine {
            return Err(SheetError::InvalidSchema(format!(
                "schema '{}' maps by header name but does not read its header from line 0",
                self.name
            )));
        }

        Ok(())
    }

    pub fn is_placeholder(&self, name: &str) -> bool {
        self.placeholders.iter().any(|p| p == name)
    }

    pub fn is_footnote(&self, line: &str) -> bool {
        self.footnotes.iter().any(|f| line.starts_with(f.as_str()))
    }

    /// Resolve the field → column index table for one parse.
    ///
    /// Positional schemas ignore the header row entirely.
    pub fn bind(&self, header_fields: &[String]) -> Vec<(Field, usize)> {
        match self.mapping {
            ColumnMapping::Positional => self.columns.iter().map(|c| (c.field, c.index)).collect(),
            ColumnMapping::ByHeaderName => {
                let labels: Vec<String> = header_fields
                    .iter()
                    .map(|h| clean_field(h).to_lowercase())
                    .collect();

                self.columns
                    .iter()
                    .map(|c| {
                        let index = c
                            .header
                            .as_ref()
                            .and_then(|h| {
                                let wanted = h.to_lowercase();
                                labels.iter().position(|l| *l == wanted)
                            })
                            .unwrap_or(c.index);
                        (c.field, index)
                    })
                    .collect()
            }
        }
    }
}

/// A schema as written in the config file.
///
/// ```toml
/// [schemas.meetups]
/// mapping = "by_header_name"
/// placeholders = ["Name"]
/// columns = [
///   { field = "name", index = 0, header = "Name" },
///   { field = "start_date", index = 1, header = "Date" },
/// ]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaSpec {
    /// Scan for this signature; omit to read the header from line 0.
    pub header_signature: Option<String>,
    #[serde(default)]
    pub mapping: ColumnMapping,
    pub columns: Vec<Column>,
    /// Defaults to the number of columns up to the highest index.
    pub min_fields: Option<usize>,
    #[serde(default)]
    pub placeholders: Vec<String>,
    #[serde(default)]
    pub footnotes: Vec<String>,
}

impl SchemaSpec {
    pub fn into_schema(self, name: &str) -> SheetResult<Schema> {
        let min_fields = self
            .min_fields
            .unwrap_or_else(|| self.columns.iter().map(|c| c.index + 1).max().unwrap_or(0));

        let header = match self.header_signature {
            Some(signature) => HeaderMode::ScanForSignature(signature),
            None => HeaderMode::FirstLine,
        };

        let schema = Schema {
            name: name.to_string(),
            header,
            mapping: self.mapping,
            columns: self.columns,
            min_fields,
            placeholders: self.placeholders,
            footnotes: self.footnotes,
        };
        schema.validate()?;
        Ok(schema)
    }
}
