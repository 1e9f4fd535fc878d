//! Line-level CSV handling for loosely structured spreadsheet exports.
//!
//! This is deliberately not a general CSV reader: records never span lines,
//! and quote characters only toggle whether a comma splits the field.

mod header;
mod line;

pub use header::{HeaderMode, locate_header};
pub use line::{clean_field, is_noise_line, parse_line};
