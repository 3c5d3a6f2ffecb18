//! Calendar days in the service's reference time zone.
//!
//! The contents API indexes items by publication day, where "day" means the
//! calendar day in a fixed reference offset (Asia/Seoul, UTC+9, by default).
//! The offset is configuration; nothing here reads the local clock's zone.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use thiserror::Error;

/// Format used in request paths and in `ContentDetail::date`.
const PATH_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
#[error("Invalid day '{input}': expected YYYY-MM-DD")]
pub struct DayParseError {
    input: String,
}

/// A calendar day whose feed can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeedDay(NaiveDate);

impl FeedDay {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The current day in the reference offset.
    pub fn today(offset: FixedOffset) -> Self {
        Self::from_instant(Utc::now(), offset)
    }

    /// The reference-offset day containing `instant`.
    pub fn from_instant(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self(instant.with_timezone(&offset).date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `YYYY-MM-DD`, as embedded in `/api/contents/date/{day}`.
    pub fn as_path_segment(&self) -> String {
        self.0.format(PATH_FORMAT).to_string()
    }

    /// Header label such as `2025년 8월 17일`.
    pub fn display_korean(&self) -> String {
        format!("{}년 {}월 {}일", self.0.year(), self.0.month(), self.0.day())
    }

    pub fn previous(&self) -> Self {
        Self(self.0 - Duration::days(1))
    }

    pub fn next(&self) -> Self {
        Self(self.0 + Duration::days(1))
    }
}

impl FromStr for FeedDay {
    type Err = DayParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), PATH_FORMAT)
            .map(Self)
            .map_err(|_| DayParseError {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for FeedDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(PATH_FORMAT))
    }
}

/// Render a raw `YYYY-MM-DD` string as a header label, or echo it unchanged
/// when it does not parse.
pub fn display_date_label(raw: &str) -> String {
    match raw.parse::<FeedDay>() {
        Ok(day) => day.display_korean(),
        Err(_) => raw.to_string(),
    }
}

/// Offset for the given number of minutes east of UTC, if representable.
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
}
