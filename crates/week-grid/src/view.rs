//! Assembling the renderer-facing view: one grid per location plus the
//! shared weekday headers and time axis.
//!
//! Per location the pipeline is:
//!
//! 1. assign colors to activity names in first-seen order,
//! 2. bucket activities by weekday, sorted by start time,
//! 3. assign lanes per day and widen lone events,
//! 4. derive the grid template and absolute column indices.

use log::debug;
use serde::Serialize;

use crate::bucket::{Scheduled, SkippedActivity, WeekdayBuckets};
use crate::colors::ColorMap;
use crate::error::Result;
use crate::grid::{column_indices, GridTemplate};
use crate::lanes::{assign_lanes, merge_spans, Placement};
use crate::options::LayoutOptions;
use crate::plan::{LocationWeek, Plan};
use crate::time::{TimeOfDay, TimeRange};

// ── Output tree ─────────────────────────────────────────────────────────────

/// One activity placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewEvent {
    pub activity_id: i64,
    pub display_name: String,
    pub detail_url: String,
    /// 12-hour start label, e.g. `"09:15 AM"`.
    pub start_label: String,
    /// 24-hour start code, matching [`TimeSlot::code`].
    pub start_code: String,
    pub duration_minutes: u32,
    pub lane_offset: usize,
    pub lane_span: usize,
    pub color: String,
    /// Time-axis row the event starts on, if its start falls on the axis.
    pub grid_row: Option<usize>,
    /// Index of the preceding event in this day's overlap chain.
    #[serde(skip)]
    pub previous: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayView {
    /// Number of lanes this day uses.
    pub span: usize,
    /// Absolute grid columns of this day's lanes.
    pub column_indices: Vec<usize>,
    pub events: Vec<ViewEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationView {
    pub location_id: String,
    pub location_name: String,
    pub grid_template: GridTemplate,
    /// Sunday through Saturday.
    pub weekdays: Vec<WeekdayView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedActivity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayHeader {
    pub name: &'static str,
    pub short_name: &'static str,
}

/// One row label on the time axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub name: String,
    pub code: String,
    pub grid_row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub locations: Vec<LocationView>,
    pub days: Vec<WeekdayHeader>,
    pub times: Vec<TimeSlot>,
}

// ── Fixed axes ──────────────────────────────────────────────────────────────

/// Grid row of the first time slot; row 1 holds the weekday headers.
const FIRST_TIME_ROW: usize = 2;

pub fn weekday_headers() -> Vec<WeekdayHeader> {
    [
        ("Sunday", "Sun"),
        ("Monday", "Mon"),
        ("Tuesday", "Tue"),
        ("Wednesday", "Wed"),
        ("Thursday", "Thu"),
        ("Friday", "Fri"),
        ("Saturday", "Sat"),
    ]
    .into_iter()
    .map(|(name, short_name)| WeekdayHeader { name, short_name })
    .collect()
}

/// Time slots from the axis start hour up to (not including) the end hour.
pub fn time_axis(options: &LayoutOptions) -> Vec<TimeSlot> {
    let step = options.axis_step_minutes.max(1);
    (options.axis_start_hour..options.axis_end_hour.min(24))
        .flat_map(|hour| (0..60).step_by(step as usize).map(move |minute| (hour, minute)))
        .filter_map(|(hour, minute)| TimeOfDay::from_hm(hour, minute))
        .enumerate()
        .map(|(i, time)| TimeSlot {
            name: time.label(),
            code: time.code(),
            grid_row: FIRST_TIME_ROW + i,
        })
        .collect()
}

fn axis_row(time: TimeOfDay, options: &LayoutOptions) -> Option<usize> {
    let start = options.axis_start_hour as u32 * 60;
    let end = options.axis_end_hour as u32 * 60;
    let minutes = time.minutes_since_midnight();
    if minutes < start || minutes >= end {
        return None;
    }
    let step = options.axis_step_minutes.max(1) as u32;
    Some(FIRST_TIME_ROW + ((minutes - start) / step) as usize)
}

// ── Assembly ────────────────────────────────────────────────────────────────

impl LocationView {
    /// Lay out one location's week.
    ///
    /// # Errors
    ///
    /// Under the fail-fast policy, returns the first activity whose weekday
    /// or time range cannot be read, wrapped with the location and activity id.
    pub fn build(week: &LocationWeek, options: &LayoutOptions) -> Result<Self> {
        let colors = ColorMap::assign(
            week.events.iter().map(|a| a.name.as_str()),
            &options.palette,
            &options.fallback_color,
        );

        let buckets = WeekdayBuckets::build(
            &week.location_id,
            &week.events,
            options.hour_convention,
            options.invalid_records,
        )?;

        let mut weekdays: Vec<WeekdayView> = buckets
            .iter()
            .map(|day| build_day(day, &colors, options))
            .collect();

        let spans: Vec<usize> = weekdays.iter().map(|d| d.span).collect();
        for (day, columns) in weekdays.iter_mut().zip(column_indices(&spans)) {
            day.column_indices = columns;
        }
        let grid_template = GridTemplate::new(&options.label_column, &spans);

        debug!(
            "event=location_layout module=view location_id={} events={} skipped={} spans={:?} template=\"{}\"",
            week.location_id,
            week.events.len(),
            buckets.skipped().len(),
            spans,
            grid_template
        );

        Ok(LocationView {
            location_id: week.location_id.clone(),
            location_name: week.location_name.clone(),
            grid_template,
            weekdays,
            skipped: buckets.into_skipped(),
        })
    }
}

fn build_day(day: &[Scheduled<'_>], colors: &ColorMap, options: &LayoutOptions) -> WeekdayView {
    let ranges: Vec<TimeRange> = day.iter().map(|s| s.times).collect();
    let layout = merge_spans(assign_lanes(&ranges, options.lane_strategy));

    let events = day
        .iter()
        .zip(&layout.placements)
        .map(|(scheduled, placement)| view_event(scheduled, placement, colors, options))
        .collect();

    WeekdayView {
        span: layout.lane_count(),
        column_indices: Vec::new(),
        events,
    }
}

fn view_event(
    scheduled: &Scheduled<'_>,
    placement: &Placement,
    colors: &ColorMap,
    options: &LayoutOptions,
) -> ViewEvent {
    let activity = scheduled.activity;
    let times = scheduled.times;
    ViewEvent {
        activity_id: activity.id,
        display_name: activity.name.clone(),
        detail_url: activity.detail_url.clone(),
        start_label: times.start.label(),
        start_code: times.start.code(),
        duration_minutes: times.duration_minutes(),
        lane_offset: placement.offset,
        lane_span: placement.lane_span,
        color: colors
            .color(&activity.name)
            .unwrap_or(&options.fallback_color)
            .to_string(),
        grid_row: axis_row(times.start, options),
        previous: placement.previous,
    }
}

impl View {
    /// Lay out every location.
    ///
    /// ```
    /// use week_grid::{Activity, LayoutOptions, LocationWeek, View};
    ///
    /// let week = LocationWeek::new("165", "Pool", vec![
    ///     Activity::new(1, "Swim", "Mon", "9:00 AM - 9:30 AM"),
    ///     Activity::new(2, "Dive", "Mon", "9:15 AM - 9:45 AM"),
    /// ]);
    /// let view = View::build(&[week], &LayoutOptions::default()).unwrap();
    ///
    /// let monday = &view.locations[0].weekdays[1];
    /// assert_eq!(monday.span, 2);
    /// assert_eq!(view.locations[0].grid_template.to_string(), "50px 2fr 1fr 1fr 2fr 2fr 2fr 2fr 2fr");
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if the options are inconsistent or if any location fails to
    /// lay out (see [`LocationView::build`]).
    pub fn build(weeks: &[LocationWeek], options: &LayoutOptions) -> Result<Self> {
        options.validate()?;

        let locations = weeks
            .iter()
            .map(|week| LocationView::build(week, options))
            .collect::<Result<Vec<_>>>()?;

        Ok(View {
            locations,
            days: weekday_headers(),
            times: time_axis(options),
        })
    }

    /// Lay out a plan, pooling every person's events per location.
    pub fn from_plan(plan: &Plan, options: &LayoutOptions) -> Result<Self> {
        Self::build(&plan.by_location(), options)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
