//! Time-of-day values and the registration time-range parser.
//!
//! Registration records describe when an activity runs with a free-text
//! range such as `"9:45 AM - 10:15 AM"` or `"Noon - 1:00 PM"`. This module
//! turns that text into a pair of [`TimeOfDay`] values that can be compared,
//! subtracted and rendered.
//!
//! The parser is a small hand-written tokenizer rather than a pattern match,
//! so every failure names the exact token it choked on.
//!
//! # Grammar
//!
//! ```text
//! range := side " - " side
//! side  := "Noon" | digits ":" digits " " ("AM" | "PM")
//! digits := 1 or 2 ASCII digits
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

// ── TimeOfDay ───────────────────────────────────────────────────────────────

/// A wall-clock time within a single day, ordered by (hour, minute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub const NOON: TimeOfDay = TimeOfDay {
        hour: 12,
        minute: 0,
    };

    /// Build a time from an hour (0-23) and minute (0-59).
    ///
    /// Returns `None` when either component is out of range.
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(TimeOfDay { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// Absolute number of minutes between `self` and `other`.
    pub fn minutes_between(&self, other: &TimeOfDay) -> u32 {
        self.minutes_since_midnight()
            .abs_diff(other.minutes_since_midnight())
    }

    /// 12-hour label, e.g. `"09:15 AM"` or `"02:30 PM"`.
    ///
    /// ```
    /// use week_grid::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::from_hm(14, 30).unwrap().label(), "02:30 PM");
    /// assert_eq!(TimeOfDay::NOON.label(), "12:00 PM");
    /// ```
    pub fn label(&self) -> String {
        let (hour, meridiem) = match self.hour {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        format!("{:02}:{:02} {}", hour, self.minute, meridiem)
    }

    /// Zero-padded 24-hour code, e.g. `"0915"` or `"1430"`.
    pub fn code(&self) -> String {
        format!("{:02}{:02}", self.hour, self.minute)
    }
}

// ── Hour convention ─────────────────────────────────────────────────────────

/// How `12 AM` is interpreted.
///
/// Registration data historically treated every AM hour verbatim, so
/// `"12:30 AM"` came out as half past noon. `Compatible` keeps that reading;
/// `Strict` maps the twelve o'clock AM hour to midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourConvention {
    #[default]
    Compatible,
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// One side of a range, before the hour convention is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClockReading {
    Noon,
    Clock {
        hour: u8,
        minute: u8,
        meridiem: Meridiem,
    },
}

impl ClockReading {
    fn resolve(self, convention: HourConvention) -> Option<TimeOfDay> {
        match self {
            ClockReading::Noon => Some(TimeOfDay::NOON),
            ClockReading::Clock {
                hour,
                minute,
                meridiem,
            } => {
                let hour = match (meridiem, convention) {
                    (Meridiem::Pm, _) if hour < 12 => hour + 12,
                    (Meridiem::Am, HourConvention::Strict) if hour == 12 => 0,
                    _ => hour,
                };
                TimeOfDay::from_hm(hour, minute)
            }
        }
    }
}

// ── TimeRange ───────────────────────────────────────────────────────────────

/// A start/end pair parsed from a registration time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeRange {
    /// Parse a range using [`HourConvention::Compatible`].
    ///
    /// ```
    /// use week_grid::TimeRange;
    ///
    /// let range = TimeRange::parse("11:30 AM - Noon").unwrap();
    /// assert_eq!(range.start.code(), "1130");
    /// assert_eq!(range.end.code(), "1200");
    /// assert_eq!(range.duration_minutes(), 30);
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with(input, HourConvention::default())
    }

    /// Parse a range, applying `convention` to AM hours.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidTimeRange`] if the text does not match
    /// `"<side> - <side>"` exactly, or if a side names an impossible time.
    pub fn parse_with(input: &str, convention: HourConvention) -> Result<Self> {
        let mut tokens = Tokenizer::new(input);
        let start = tokens.side()?;
        tokens.literal(" - ")?;
        let end = tokens.side()?;
        tokens.finish()?;

        let start = start
            .resolve(convention)
            .ok_or_else(|| GridError::time_range(input, "start time is out of range"))?;
        let end = end
            .resolve(convention)
            .ok_or_else(|| GridError::time_range(input, "end time is out of range"))?;

        Ok(TimeRange { start, end })
    }

    /// Strict half-open intersection: touching ranges do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes_between(&self.start)
    }
}

// ── Tokenizer ───────────────────────────────────────────────────────────────

struct Tokenizer<'a> {
    input: &'a str,
    rest: &'a str,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Tokenizer { input, rest: input }
    }

    fn error(&self, reason: impl Into<String>) -> GridError {
        let position = self.input.len() - self.rest.len();
        GridError::time_range(self.input, format!("{} at byte {}", reason.into(), position))
    }

    fn side(&mut self) -> Result<ClockReading> {
        if let Some(rest) = self.rest.strip_prefix("Noon") {
            self.rest = rest;
            return Ok(ClockReading::Noon);
        }

        let hour = self.digits("hour")?;
        self.literal(":")?;
        let minute = self.digits("minute")?;
        self.literal(" ")?;
        let meridiem = self.meridiem()?;

        Ok(ClockReading::Clock {
            hour,
            minute,
            meridiem,
        })
    }

    fn digits(&mut self, what: &str) -> Result<u8> {
        let len = self
            .rest
            .bytes()
            .take(2)
            .take_while(u8::is_ascii_digit)
            .count();
        if len == 0 {
            return Err(self.error(format!("expected {what} digits or \"Noon\"")));
        }

        let (digits, rest) = self.rest.split_at(len);
        let value = digits
            .parse::<u8>()
            .map_err(|e| self.error(format!("bad {what} {digits:?}: {e}")))?;
        self.rest = rest;
        Ok(value)
    }

    fn meridiem(&mut self) -> Result<Meridiem> {
        let meridiem = if self.rest.starts_with("AM") {
            Meridiem::Am
        } else if self.rest.starts_with("PM") {
            Meridiem::Pm
        } else {
            return Err(self.error("expected \"AM\" or \"PM\""));
        };
        self.rest = &self.rest[2..];
        Ok(meridiem)
    }

    fn literal(&mut self, expected: &str) -> Result<()> {
        match self.rest.strip_prefix(expected) {
            Some(rest) => {
                self.rest = rest;
                Ok(())
            }
            None => Err(self.error(format!("expected {expected:?}"))),
        }
    }

    fn finish(&self) -> Result<()> {
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(self.error(format!("unexpected trailing text {:?}", self.rest)))
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u8, minute: u8) -> TimeOfDay {
        TimeOfDay::from_hm(hour, minute).unwrap()
    }

    // ── TimeOfDay ───────────────────────────────────────────────────────

    #[test]
    fn test_ordering_by_hour_then_minute() {
        assert!(hm(9, 59) < hm(10, 0));
        assert!(hm(10, 0) < hm(10, 1));
        assert_eq!(hm(7, 7), hm(7, 7));
    }

    #[test]
    fn test_from_hm_rejects_out_of_range() {
        assert!(TimeOfDay::from_hm(24, 0).is_none());
        assert!(TimeOfDay::from_hm(0, 60).is_none());
        assert!(TimeOfDay::from_hm(23, 59).is_some());
    }

    #[test]
    fn test_minutes_between_is_absolute() {
        assert_eq!(hm(9, 15).minutes_between(&hm(10, 45)), 90);
        assert_eq!(hm(10, 45).minutes_between(&hm(9, 15)), 90);
        assert_eq!(hm(9, 15).minutes_between(&hm(9, 15)), 0);
    }

    #[test]
    fn test_label_twelve_hour() {
        assert_eq!(hm(9, 5).label(), "09:05 AM");
        assert_eq!(hm(12, 45).label(), "12:45 PM");
        assert_eq!(hm(20, 45).label(), "08:45 PM");
        assert_eq!(hm(0, 30).label(), "12:30 AM");
    }

    #[test]
    fn test_code_zero_padded() {
        assert_eq!(hm(9, 0).code(), "0900");
        assert_eq!(hm(20, 45).code(), "2045");
        assert_eq!(hm(0, 5).code(), "0005");
    }

    // ── parse ───────────────────────────────────────────────────────────

    #[test]
    fn test_parse_morning_range() {
        let range = TimeRange::parse("9:45 AM - 10:15 AM").unwrap();
        assert_eq!(range.start, hm(9, 45));
        assert_eq!(range.end, hm(10, 15));
        assert_eq!(range.duration_minutes(), 30);
    }

    #[test]
    fn test_parse_pm_adds_twelve() {
        let range = TimeRange::parse("1:00 PM - 2:30 PM").unwrap();
        assert_eq!(range.start, hm(13, 0));
        assert_eq!(range.end, hm(14, 30));
    }

    #[test]
    fn test_parse_twelve_pm_stays_noon() {
        let range = TimeRange::parse("12:30 PM - 1:15 PM").unwrap();
        assert_eq!(range.start, hm(12, 30));
    }

    #[test]
    fn test_parse_noon_on_either_side() {
        let range = TimeRange::parse("Noon - 12:45 PM").unwrap();
        assert_eq!(range.start, TimeOfDay::NOON);
        assert_eq!(range.end, hm(12, 45));

        let range = TimeRange::parse("11:00 AM - Noon").unwrap();
        assert_eq!(range.end, TimeOfDay::NOON);
    }

    #[test]
    fn test_parse_twelve_am_compatible_keeps_hour() {
        let range = TimeRange::parse("12:00 AM - 12:30 AM").unwrap();
        assert_eq!(range.start, hm(12, 0));
        assert_eq!(range.end, hm(12, 30));
    }

    #[test]
    fn test_parse_twelve_am_strict_is_midnight() {
        let range = TimeRange::parse_with("12:00 AM - 12:30 AM", HourConvention::Strict).unwrap();
        assert_eq!(range.start, hm(0, 0));
        assert_eq!(range.end, hm(0, 30));
    }

    #[test]
    fn test_parse_single_digit_minute() {
        let range = TimeRange::parse("9:5 AM - 9:7 AM").unwrap();
        assert_eq!(range.start, hm(9, 5));
        assert_eq!(range.end, hm(9, 7));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let err = TimeRange::parse("9:45 AM 10:15 AM").unwrap_err().to_string();
        assert!(err.contains("Invalid time range"), "got: {err}");
        assert!(err.contains("\" - \""), "got: {err}");
    }

    #[test]
    fn test_parse_rejects_lowercase_meridiem() {
        let err = TimeRange::parse("9:45 am - 10:15 AM").unwrap_err().to_string();
        assert!(err.contains("AM"), "got: {err}");
    }

    #[test]
    fn test_parse_rejects_three_digit_hour() {
        assert!(TimeRange::parse("100:00 AM - 10:15 AM").is_err());
    }

    #[test]
    fn test_parse_rejects_trailing_text() {
        let err = TimeRange::parse("9:45 AM - 10:15 AM daily")
            .unwrap_err()
            .to_string();
        assert!(err.contains("trailing"), "got: {err}");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(TimeRange::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_impossible_minute() {
        let err = TimeRange::parse("9:75 AM - 10:15 AM").unwrap_err().to_string();
        assert!(err.contains("out of range"), "got: {err}");
    }

    // ── overlaps ────────────────────────────────────────────────────────

    #[test]
    fn test_overlap_identical_ranges() {
        let a = TimeRange::parse("9:00 AM - 9:30 AM").unwrap();
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        let a = TimeRange::parse("9:00 AM - 9:30 AM").unwrap();
        let b = TimeRange::parse("9:30 AM - 10:00 AM").unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_contained_range_overlaps() {
        let outer = TimeRange::parse("9:00 AM - 11:00 AM").unwrap();
        let inner = TimeRange::parse("9:30 AM - 10:00 AM").unwrap();
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
