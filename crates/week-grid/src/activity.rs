//! Activity records as delivered by the registration system.

use std::cell::OnceCell;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::time::{HourConvention, TimeRange};

/// One scheduled session of an activity at a location.
///
/// Field names on the wire follow the registration system's activity list
/// (`time_range`, `days_of_week`, ...). The parsed time range is computed on
/// first use and cached for the lifetime of the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    /// Display name, e.g. `"Swim Creatures 4 - Nigig | Otter"`.
    pub name: String,
    #[serde(default)]
    pub number: String,
    /// Free-text range, e.g. `"9:45 AM - 10:15 AM"`.
    pub time_range: String,
    #[serde(default)]
    pub detail_url: String,
    /// Three-letter day code, `"Sun"` through `"Sat"`.
    #[serde(rename = "days_of_week")]
    pub day_code: String,

    #[serde(skip)]
    parsed: OnceCell<(HourConvention, TimeRange)>,
}

impl PartialEq for Activity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.number == other.number
            && self.time_range == other.time_range
            && self.detail_url == other.detail_url
            && self.day_code == other.day_code
    }
}

impl Activity {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        day_code: impl Into<String>,
        time_range: impl Into<String>,
    ) -> Self {
        Activity {
            id,
            name: name.into(),
            day_code: day_code.into(),
            time_range: time_range.into(),
            ..Default::default()
        }
    }

    /// The parsed start/end times under the default hour convention.
    pub fn times(&self) -> Result<TimeRange> {
        self.times_with(HourConvention::default())
    }

    /// The parsed start/end times.
    ///
    /// The first successful parse is cached. A later call with a different
    /// convention parses again without replacing the cached value.
    pub fn times_with(&self, convention: HourConvention) -> Result<TimeRange> {
        if let Some((cached_convention, range)) = self.parsed.get() {
            if *cached_convention == convention {
                return Ok(*range);
            }
            return TimeRange::parse_with(&self.time_range, convention);
        }

        let range = TimeRange::parse_with(&self.time_range, convention)?;
        let _ = self.parsed.set((convention, range));
        Ok(range)
    }

    pub fn weekday(&self) -> Result<Weekday> {
        parse_day_code(&self.day_code)
    }

    pub fn overlaps(&self, other: &Activity, convention: HourConvention) -> Result<bool> {
        Ok(self
            .times_with(convention)?
            .overlaps(&other.times_with(convention)?))
    }
}

/// Map a three-letter day code (`"Sun"`..`"Sat"`, case-sensitive) to a weekday.
pub fn parse_day_code(code: &str) -> Result<Weekday> {
    match code {
        "Sun" => Ok(Weekday::Sun),
        "Mon" => Ok(Weekday::Mon),
        "Tue" => Ok(Weekday::Tue),
        "Wed" => Ok(Weekday::Wed),
        "Thu" => Ok(Weekday::Thu),
        "Fri" => Ok(Weekday::Fri),
        "Sat" => Ok(Weekday::Sat),
        other => Err(GridError::UnknownWeekday(other.to_string())),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
