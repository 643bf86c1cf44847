//! Wire model for the aggregated news feed and the small display helpers
//! (category tags, rating units, timestamp formatting) derived from it.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// Root document returned by the news endpoint for one fetch. Immutable once
/// received; a new fetch produces a whole new payload.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedPayload {
    pub last_updated: Option<String>,
    pub trending_topics: Option<Vec<String>>,
    pub news_items: Option<Vec<NewsItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsItem {
    pub id: ItemId,
    pub category: String,
    pub relevance_score: Option<i64>,
    pub headline: String,
    pub summary: String,
    pub source_name: Option<String>,
    pub published_date: Option<String>,
}

/// Item ids arrive on the wire as either a JSON string or an integer.
/// Unique within one payload; used as the stable card key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Text(String),
    Number(i64),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Text(s) => f.write_str(s),
            ItemId::Number(n) => write!(f, "{}", n),
        }
    }
}

pub const MAX_RATING_UNITS: i64 = 5;

/// Number of rating glyphs to show for a relevance score. Scores above five
/// are clamped; zero, negative, or absent scores show no rating at all.
pub fn rating_units(score: Option<i64>) -> usize {
    score.unwrap_or(0).clamp(0, MAX_RATING_UNITS) as usize
}

/// CSS tag class for a category badge. Categories outside the known set get
/// the neutral tag; the displayed label is always the raw category string.
pub fn category_tag(category: &str) -> &'static str {
    match category {
        "music" => "tag-music",
        "social" => "tag-social",
        "appearance" => "tag-appearance",
        "fan" => "tag-fan",
        "industry" => "tag-industry",
        _ => "tag-neutral",
    }
}

// The backend emits naive UTC timestamps (no offset), but be liberal and
// accept RFC 3339 and date-only forms too.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format an item's published timestamp for display. A timestamp that does
/// not parse is shown as received rather than hidden.
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Format the payload's last-updated timestamp with time of day.
pub fn format_date_time(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%B %-d, %Y %H:%M UTC").to_string(),
        None => raw.to_string(),
    }
}
