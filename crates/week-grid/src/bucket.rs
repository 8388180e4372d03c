//! Grouping a location's activities into seven time-sorted weekday buckets.

use chrono::Weekday;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::error::{GridError, Result};
use crate::time::{HourConvention, TimeRange};

/// What to do with a record whose weekday or time range cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidRecordPolicy {
    /// Abort the whole location on the first bad record.
    #[default]
    FailFast,
    /// Leave the record out and report it alongside the location's view.
    Skip,
}

/// A record left out of a location's grid under [`InvalidRecordPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedActivity {
    pub activity_id: i64,
    pub reason: String,
}

/// An activity together with its parsed times.
#[derive(Debug, Clone, Copy)]
pub struct Scheduled<'a> {
    pub activity: &'a Activity,
    pub times: TimeRange,
}

/// Seven buckets indexed Sunday (0) through Saturday (6).
#[derive(Debug, Default)]
pub struct WeekdayBuckets<'a> {
    days: [Vec<Scheduled<'a>>; 7],
    skipped: Vec<SkippedActivity>,
}

impl<'a> WeekdayBuckets<'a> {
    /// Bucket `activities` by weekday and sort each bucket by start time.
    ///
    /// The sort is stable: activities starting at the same minute keep their
    /// input order.
    ///
    /// # Errors
    ///
    /// Under [`InvalidRecordPolicy::FailFast`], the first unreadable record
    /// aborts with [`GridError::Activity`] naming `location_id` and the record.
    pub fn build(
        location_id: &str,
        activities: &'a [Activity],
        convention: HourConvention,
        policy: InvalidRecordPolicy,
    ) -> Result<Self> {
        let mut buckets = WeekdayBuckets::default();

        for activity in activities {
            match schedule(activity, convention) {
                Ok((weekday, times)) => {
                    buckets.days[weekday.num_days_from_sunday() as usize]
                        .push(Scheduled { activity, times });
                }
                Err(err) => match policy {
                    InvalidRecordPolicy::FailFast => {
                        return Err(GridError::Activity {
                            location_id: location_id.to_string(),
                            activity_id: activity.id,
                            source: Box::new(err),
                        });
                    }
                    InvalidRecordPolicy::Skip => {
                        warn!(
                            "event=activity_skipped module=bucket location_id={} activity_id={} error={}",
                            location_id, activity.id, err
                        );
                        buckets.skipped.push(SkippedActivity {
                            activity_id: activity.id,
                            reason: err.to_string(),
                        });
                    }
                },
            }
        }

        for day in buckets.days.iter_mut() {
            day.sort_by_key(|s| s.times.start);
        }

        Ok(buckets)
    }

    pub fn day(&self, weekday: Weekday) -> &[Scheduled<'a>] {
        &self.days[weekday.num_days_from_sunday() as usize]
    }

    /// All seven buckets in Sunday..Saturday order.
    pub fn iter(&self) -> impl Iterator<Item = &[Scheduled<'a>]> {
        self.days.iter().map(Vec::as_slice)
    }

    pub fn skipped(&self) -> &[SkippedActivity] {
        &self.skipped
    }

    pub fn into_skipped(self) -> Vec<SkippedActivity> {
        self.skipped
    }
}

fn schedule(activity: &Activity, convention: HourConvention) -> Result<(Weekday, TimeRange)> {
    let weekday = activity.weekday()?;
    let times = activity.times_with(convention)?;
    Ok((weekday, times))
}

// ── Tests ───────────────────────────────────────────────────────────────────
