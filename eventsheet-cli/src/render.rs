//! Terminal and JSON presentation of parsed records.
//!
//! Records from the core are turned into cards: display-ready values with
//! normalised links. Colours come from owo_colors.

use eventsheet_core::dates::{derive_month_index, derive_year, format_date_range, month_name};
use eventsheet_core::filter::{EventStats, VenueStats, status_slug, venue_type_slug};
use eventsheet_core::links::{normalize_chat_link, normalize_link, normalize_social_link};
use eventsheet_core::{EventRecord, ParseReport, VenueRecord};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Hands out images from a fixed list in rotation, one per rendered card.
///
/// Owned by whoever renders a list, so two renders never share a position.
#[derive(Debug, Clone)]
pub struct ImageCycle {
    images: Vec<String>,
    next: usize,
}

impl ImageCycle {
    pub fn new(images: Vec<String>) -> Self {
        ImageCycle { images, next: 0 }
    }

    /// The next image, or `None` when the list is empty.
    pub fn next_image(&mut self) -> Option<String> {
        if self.images.is_empty() {
            return None;
        }
        let image = self.images[self.next].clone();
        self.next = (self.next + 1) % self.images.len();
        Some(image)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventCard {
    pub name: String,
    pub dates: String,
    /// 1-based month, for consumers that filter on it.
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub location: String,
    pub website: Option<String>,
    pub social: Option<String>,
    pub chat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl EventCard {
    pub fn new(event: &EventRecord, images: &mut ImageCycle) -> Self {
        let location = if event.geo.is_empty() {
            "Location TBD".to_string()
        } else {
            event.geo.clone()
        };

        EventCard {
            name: event.name.clone(),
            dates: format_date_range(&event.start_date, &event.end_date),
            month: derive_month_index(&event.start_date).map(|m| m + 1),
            year: derive_year(&event.start_date),
            location,
            website: normalize_link(&event.link),
            social: normalize_social_link(&event.social),
            chat: normalize_chat_link(&event.chat),
            image: images.next_image(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueCard {
    pub name: String,
    #[serde(rename = "type")]
    pub venue_type: String,
    pub type_slug: &'static str,
    pub status: String,
    pub status_slug: &'static str,
    pub activities: String,
    pub url: Option<String>,
}

impl From<&VenueRecord> for VenueCard {
    fn from(venue: &VenueRecord) -> Self {
        VenueCard {
            name: venue.name.clone(),
            venue_type: venue.venue_type.clone(),
            type_slug: venue_type_slug(&venue.venue_type),
            status_slug: status_slug(&venue.status.to_uppercase()),
            status: venue.status.to_uppercase(),
            activities: venue.activities.clone(),
            url: normalize_link(&venue.url),
        }
    }
}

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventCard {
    fn render(&self) -> String {
        let mut lines = vec![
            format!("{} {}", self.name.bold(), self.dates.dimmed()),
            format!("   {}", self.location),
        ];

        let mut links = Vec::new();
        for (label, link) in [
            ("web", &self.website),
            ("social", &self.social),
            ("chat", &self.chat),
        ] {
            if let Some(link) = link {
                links.push(format!("{} {}", format!("{}:", label).dimmed(), link.cyan()));
            }
        }

        if links.is_empty() {
            lines.push(format!("   {}", "Coming soon".dimmed()));
        } else {
            lines.push(format!("   {}", links.join("  ")));
        }

        if let Some(image) = &self.image {
            lines.push(format!("   {} {}", "image:".dimmed(), image));
        }

        lines.join("\n")
    }
}

impl Render for VenueCard {
    fn render(&self) -> String {
        let status = match self.status_slug {
            "activated" => self.status.green().to_string(),
            "opening" => self.status.yellow().to_string(),
            _ => self.status.dimmed().to_string(),
        };

        let activities = if self.activities == "1" {
            "1 activity".to_string()
        } else {
            format!("{} activities", self.activities)
        };

        let location = match &self.url {
            Some(url) => url.cyan().to_string(),
            None => "no location".dimmed().to_string(),
        };

        format!(
            "{} {} {}\n   {} · {}",
            self.name.bold(),
            format!("[{}]", self.venue_type).dimmed(),
            status,
            activities,
            location
        )
    }
}

impl Render for VenueStats {
    fn render(&self) -> String {
        let mut lines = vec![format!("{} {}", self.total.bold(), "venues total")];
        for (venue_type, count) in &self.by_type {
            lines.push(format!(
                "   {:>3} {} {}",
                count,
                venue_type,
                format!("({})", venue_type_slug(venue_type)).dimmed()
            ));
        }
        lines.join("\n")
    }
}

impl Render for EventStats {
    fn render(&self) -> String {
        let mut lines = vec![format!("{} {}", self.total.bold(), "events total")];
        for (month, count) in &self.by_month {
            let label = month_name(*month).unwrap_or("?");
            lines.push(format!("   {:>3} {}", count, label));
        }
        if self.undated > 0 {
            lines.push(format!("   {:>3} {}", self.undated, "without a date".dimmed()));
        }
        if !self.by_year.is_empty() {
            let years: Vec<String> = self
                .by_year
                .iter()
                .map(|(year, count)| format!("{year}: {count}"))
                .collect();
            lines.push(format!("   {}", years.join("  ").dimmed()));
        }
        lines.join("\n")
    }
}

/// One-line summary of what the parser dropped, for `--verbose` runs.
pub fn render_skip_summary(report: &ParseReport) -> Option<String> {
    let malformed = report.malformed_count();
    if malformed == 0 {
        return None;
    }
    let lines: Vec<String> = report
        .skipped
        .iter()
        .filter(|s| s.is_malformed())
        .map(|s| s.line.to_string())
        .collect();
    Some(
        format!(
            "{} malformed {} skipped (lines {})",
            malformed,
            if malformed == 1 { "row" } else { "rows" },
            lines.join(", ")
        )
        .dimmed()
        .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> EventRecord {
        EventRecord {
            name: "EthCC".to_string(),
            start_date: "30/06/2025".to_string(),
            end_date: "03/07/2025".to_string(),
            geo: String::new(),
            link: "ethcc.io".to_string(),
            social: "@EthCC".to_string(),
            chat: "-".to_string(),
        }
    }

    #[test]
    fn image_cycle_wraps() {
        let mut cycle = ImageCycle::new(vec!["a.png".to_string(), "b.png".to_string()]);
        let picked: Vec<_> = (0..3).filter_map(|_| cycle.next_image()).collect();
        assert_eq!(picked, vec!["a.png", "b.png", "a.png"]);
        assert_eq!(ImageCycle::new(Vec::new()).next_image(), None);
    }

    #[test]
    fn event_card_normalises_links() {
        let mut images = ImageCycle::new(Vec::new());
        let card = EventCard::new(&event(), &mut images);
        assert_eq!(card.dates, "30/06/2025 - 03/07/2025");
        assert_eq!(card.month, Some(6));
        assert_eq!(card.year, Some(2025));
        assert_eq!(card.location, "Location TBD");
        assert_eq!(card.website.as_deref(), Some("https://ethcc.io"));
        assert_eq!(card.social.as_deref(), Some("https://x.com/EthCC"));
        assert_eq!(card.chat, None);
        assert!(card.render().contains("EthCC"));
        assert!(!card.render().contains("image:"));
    }

    #[test]
    fn event_cards_show_assigned_images() {
        let mut images = ImageCycle::new(vec!["a.png".to_string(), "b.png".to_string()]);
        let first = EventCard::new(&event(), &mut images);
        let second = EventCard::new(&event(), &mut images);
        assert!(first.render().contains("a.png"));
        assert!(second.render().contains("b.png"));
    }

    #[test]
    fn event_stats_list_years() {
        let stats = EventStats::from_events(&[event()]);
        let rendered = stats.render();
        assert!(rendered.contains("June"));
        assert!(rendered.contains("2025: 1"));
    }

    #[test]
    fn venue_card_slugs() {
        let venue = VenueRecord {
            name: "Casa".to_string(),
            venue_type: "Club Music".to_string(),
            status: "opening".to_string(),
            activities: "1".to_string(),
            url: String::new(),
        };
        let card = VenueCard::from(&venue);
        assert_eq!(card.type_slug, "club-music");
        assert_eq!(card.status, "OPENING");
        assert_eq!(card.status_slug, "opening");
        assert_eq!(card.url, None);
        assert!(card.render().contains("1 activity"));
    }
}
