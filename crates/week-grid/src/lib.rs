//! # week-grid
//!
//! Deterministic weekly timetable layout.
//!
//! Takes flat activity records for one or more locations (a name, a weekday
//! code and a free-text time range such as `"9:45 AM - 10:15 AM"`) and
//! produces a renderer-agnostic grid: activities bucketed per weekday,
//! overlapping activities split into side-by-side lanes, and lane counts
//! normalized into proportional column widths shared by the whole week.
//!
//! ## Modules
//!
//! - [`time`] — Time-of-day values and the time-range tokenizer
//! - [`activity`] — Registration records with memoized time parsing
//! - [`bucket`] — Per-weekday, start-sorted buckets and the invalid-record policy
//! - [`lanes`] — Lane assignment (chain walk or active-lane table) and span widening
//! - [`grid`] — GCD/LCM and proportional grid templates
//! - [`colors`] — First-seen color assignment
//! - [`view`] — Assembly of the full output tree
//! - [`plan`] — The per-person, per-location plan document
//! - [`options`] — Layout configuration
//! - [`error`] — Error types

pub mod activity;
pub mod bucket;
pub mod colors;
pub mod error;
pub mod grid;
pub mod lanes;
pub mod options;
pub mod plan;
pub mod time;
pub mod view;

pub use activity::{parse_day_code, Activity};
pub use bucket::{InvalidRecordPolicy, SkippedActivity, WeekdayBuckets};
pub use error::GridError;
pub use grid::{gcd, lcm, GridTemplate, GridTrack};
pub use lanes::{assign_lanes, merge_spans, DayLayout, LaneStrategy, Placement};
pub use options::LayoutOptions;
pub use plan::{LocationWeek, PersonWeek, Plan};
pub use time::{HourConvention, TimeOfDay, TimeRange};
pub use view::{LocationView, TimeSlot, View, ViewEvent, WeekdayHeader, WeekdayView};
