//! Core data types for the news dashboard
//!
//! - `NewsItem`: a current headline as served by the backend
//! - `FutureNewsItem`: a projected headline
//! - `Timeframe`: projection horizon for a generation request
//! - `GenerationRequest`: body of a future-news generation call
//! - `Feed`: which of the two news feeds a card or panel belongs to

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Styles understood by the generation backend. The request field itself is a
/// free string, so anything else is passed through unchanged.
pub const STYLE_PRESETS: &[&str] = &[
    "neutral",
    "optimistic",
    "pessimistic",
    "sensational",
    "analytical",
];

/// A current news record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub source: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Parse a publication timestamp
///
/// Accepts RFC 3339, and ISO 8601 without an offset (as written by Python's
/// `datetime.isoformat()`). Offset-less values are read as local time, so
/// they render with the same wall-clock reading they were written with.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = raw
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid published_at timestamp `{raw}`")))
}

/// A projected news record
///
/// The probability shown next to a projection is not part of the record; it
/// is drawn fresh every time the record is rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FutureNewsItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Projection horizon
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Timeframe {
    Day,
    #[default]
    Week,
    Month,
}

impl Timeframe {
    /// Get all timeframes in display order
    pub fn all() -> &'static [Timeframe] {
        &[Timeframe::Day, Timeframe::Week, Timeframe::Month]
    }

    /// Wire name, as sent in `time_frame`
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Day => "DAY",
            Timeframe::Week => "WEEK",
            Timeframe::Month => "MONTH",
        }
    }

    /// Human readable horizon used in card labels
    pub fn display_text(&self) -> &'static str {
        match self {
            Timeframe::Day => "24 hours",
            Timeframe::Week => "7 days",
            Timeframe::Month => "30 days",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAY" => Ok(Timeframe::Day),
            "WEEK" => Ok(Timeframe::Week),
            "MONTH" => Ok(Timeframe::Month),
            _ => Err(UnknownVariant {
                kind: "timeframe",
                value: s.to_string(),
            }),
        }
    }
}

/// Future-news generation request, sent verbatim to the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationRequest {
    pub time_frame: Timeframe,
    pub style: String,
    pub limit: u32,
}

impl GenerationRequest {
    /// Default number of projections requested per generation
    pub const DEFAULT_LIMIT: u32 = 5;

    pub fn new(time_frame: Timeframe, style: impl Into<String>) -> Self {
        Self {
            time_frame,
            style: style.into(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Builder method: set the number of projections
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::new(Timeframe::default(), "neutral")
    }
}

/// The two feeds shown on the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Feed {
    Current,
    Future,
}

impl Feed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feed::Current => "current",
            Feed::Future => "future",
        }
    }

    pub fn is_future(&self) -> bool {
        matches!(self, Feed::Future)
    }
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feed {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(Feed::Current),
            "future" => Ok(Feed::Future),
            _ => Err(UnknownVariant {
                kind: "feed",
                value: s.to_string(),
            }),
        }
    }
}

/// Returned when a string does not name a known enum variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
