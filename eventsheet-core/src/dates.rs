//! Month and year extraction from the free-text dates used in the sheets.
//!
//! Two shapes occur: `15/03/2025` (day/month/year) and `March 15`.

use chrono::{Month, NaiveDate};

/// Years accepted from space-delimited dates.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 2020..=2030;

/// Zero-based month (January = 0) of a sheet date, if recognisable.
pub fn derive_month_index(date: &str) -> Option<u32> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }

    if date.contains('/') {
        let month = date.split('/').nth(1)?.trim();
        return match month.parse::<u32>() {
            Ok(n) if (1..=12).contains(&n) => Some(n - 1),
            Ok(_) => None,
            Err(_) => month_from_name(month),
        };
    }

    date.split_whitespace().find_map(month_from_name)
}

/// Year of a sheet date, if present.
pub fn derive_year(date: &str) -> Option<i32> {
    let date = date.trim();

    if date.contains('/') {
        let year = date.split('/').nth(2)?;
        return year.split_whitespace().next()?.parse().ok();
    }

    date.split_whitespace()
        .filter_map(|token| token.trim_matches(',').parse::<i32>().ok())
        .find(|year| YEAR_RANGE.contains(year))
}

/// Calendar date of a sheet date. Dates written without a year (`March 15`)
/// fall in `default_year`.
pub fn derive_date(date: &str, default_year: i32) -> Option<NaiveDate> {
    let month = derive_month_index(date)? + 1;
    let year = derive_year(date).unwrap_or(default_year);

    let day = if date.contains('/') {
        date.trim().split('/').next()?.trim().parse().ok()?
    } else {
        date.split_whitespace()
            .filter_map(|token| {
                token
                    .trim_matches(',')
                    .trim_end_matches(|c: char| c.is_alphabetic())
                    .parse::<u32>()
                    .ok()
            })
            .find(|day| (1..=31).contains(day))?
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Resolve an English month name or abbreviation (at least three letters,
/// any case) to its zero-based index.
fn month_from_name(token: &str) -> Option<u32> {
    let token = token
        .trim_matches(|c: char| !c.is_alphabetic())
        .to_lowercase();
    if token.chars().count() < 3 {
        return None;
    }

    (1u8..=12)
        .filter_map(|n| Month::try_from(n).ok())
        .find(|month| month.name().to_lowercase().starts_with(&token))
        .map(|month| month.number_from_month() - 1)
}

/// English name for a zero-based month index.
pub fn month_name(index: u32) -> Option<&'static str> {
    let number = u8::try_from(index.checked_add(1)?).ok()?;
    Month::try_from(number).ok().map(|m| m.name())
}

/// Human display of a start/end pair: "TBD" without a start, the start
/// alone when the end is blank, "-" or the same day.
pub fn format_date_range(start: &str, end: &str) -> String {
    if start.is_empty() {
        return "TBD".to_string();
    }
    if end.is_empty() || end == "-" || end == start {
        return start.to_string();
    }
    format!("{} - {}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_from_slash_date() {
        assert_eq!(derive_month_index("15/03/2025"), Some(2));
        assert_eq!(derive_month_index("1/1/2025"), Some(0));
        assert_eq!(derive_month_index("31/12/2025"), Some(11));
        assert_eq!(derive_month_index("15/Mar/2025"), Some(2));
    }

    #[test]
    fn month_from_name_date() {
        assert_eq!(derive_month_index("March 15"), Some(2));
        assert_eq!(derive_month_index("sept 3"), Some(8));
        assert_eq!(derive_month_index("15 November"), Some(10));
        assert_eq!(derive_month_index("JUN 2025"), Some(5));
    }

    #[test]
    fn month_unrecognised() {
        assert_eq!(derive_month_index(""), None);
        assert_eq!(derive_month_index("TBD"), None);
        assert_eq!(derive_month_index("15/13/2025"), None);
        assert_eq!(derive_month_index("15/xx/2025"), None);
        assert_eq!(derive_month_index("Ma 5"), None);
        assert_eq!(derive_month_index("Q3"), None);
    }

    #[test]
    fn year_from_either_shape() {
        assert_eq!(derive_year("15/03/2025"), Some(2025));
        assert_eq!(derive_year("March 15 2026"), Some(2026));
        assert_eq!(derive_year("March 15, 2024,"), Some(2024));
        assert_eq!(derive_year("March 15"), None);
        assert_eq!(derive_year("Room 1999"), None);
        assert_eq!(derive_year("15/03"), None);
    }

    #[test]
    fn full_dates() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
        assert_eq!(derive_date("15/03/2025", 2030), date(2025, 3, 15));
        assert_eq!(derive_date("March 15", 2025), date(2025, 3, 15));
        assert_eq!(derive_date("Nov 3rd, 2026", 2025), date(2026, 11, 3));
        assert_eq!(derive_date("15/03", 2024), date(2024, 3, 15));
        assert_eq!(derive_date("JUN 2025", 2025), None);
        assert_eq!(derive_date("31/02/2025", 2025), None);
        assert_eq!(derive_date("TBD", 2025), None);
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(0), Some("January"));
        assert_eq!(month_name(11), Some("December"));
        assert_eq!(month_name(12), None);
    }

    #[test]
    fn date_ranges() {
        assert_eq!(format_date_range("", "03/07/2025"), "TBD");
        assert_eq!(format_date_range("30/06/2025", "-"), "30/06/2025");
        assert_eq!(format_date_range("30/06/2025", "30/06/2025"), "30/06/2025");
        assert_eq!(
            format_date_range("30/06/2025", "03/07/2025"),
            "30/06/2025 - 03/07/2025"
        );
    }
}
