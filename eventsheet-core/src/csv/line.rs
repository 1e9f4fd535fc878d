//! Single-line field scanning.

/// Split one line into raw fields.
///
/// A `"` toggles the quoted state and is dropped from the output. Commas
/// only separate fields outside quotes. Doubled quotes (`""`) get no special
/// treatment: they toggle twice and vanish. The trailing field is always
/// emitted, so `"a,"` yields `["a", ""]`.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}

/// Trim a raw field and strip one quote from each end, if present.
pub fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}

/// A line made only of commas: an empty spreadsheet row.
pub fn is_noise_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c == ',')
}
