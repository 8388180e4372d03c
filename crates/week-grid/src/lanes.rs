//! Lane assignment for one day's events, and span widening for lone events.
//!
//! Events arrive sorted by start time. Each one is given a lane offset so
//! that events drawn side by side do not cover each other, and the day's
//! lane count is the highest offset plus one.
//!
//! Two strategies are available:
//!
//! - [`LaneStrategy::ChainWalk`] compares each event with the event placed
//!   just before it and, when they overlap, with that event's chain of
//!   predecessors. A non-overlapping neighbour starts a fresh chain at
//!   offset 0 even if an earlier, longer event is still running. This is
//!   the layout existing timetables were produced with.
//! - [`LaneStrategy::ActiveLanes`] keeps a table of open lanes and their
//!   end times, which yields a minimal lane count with no collisions.

use serde::{Deserialize, Serialize};

use crate::time::{TimeOfDay, TimeRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneStrategy {
    #[default]
    ChainWalk,
    ActiveLanes,
}

/// Where one event sits within its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// 0-based lane within the day.
    pub offset: usize,
    /// Number of lanes the event is drawn across.
    pub lane_span: usize,
    /// Index of the preceding event in the same overlap chain.
    pub previous: Option<usize>,
}

impl Placement {
    fn new(offset: usize, previous: Option<usize>) -> Self {
        Placement {
            offset,
            lane_span: 1,
            previous,
        }
    }
}

/// Placements for one day, parallel to the day's sorted events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DayLayout {
    pub placements: Vec<Placement>,
    max_offset: usize,
}

impl DayLayout {
    /// Number of lanes the day needs; at least 1, even with no events.
    pub fn lane_count(&self) -> usize {
        self.max_offset + 1
    }

    fn push(&mut self, placement: Placement) {
        self.max_offset = self.max_offset.max(placement.offset);
        self.placements.push(placement);
    }
}

/// Assign lanes to `ranges`, which must be sorted by start time.
pub fn assign_lanes(ranges: &[TimeRange], strategy: LaneStrategy) -> DayLayout {
    match strategy {
        LaneStrategy::ChainWalk => chain_walk(ranges),
        LaneStrategy::ActiveLanes => active_lanes(ranges),
    }
}

fn chain_walk(ranges: &[TimeRange]) -> DayLayout {
    let mut layout = DayLayout::default();

    for (i, range) in ranges.iter().enumerate() {
        let Some(prev) = i.checked_sub(1) else {
            layout.push(Placement::new(0, None));
            continue;
        };

        if !ranges[prev].overlaps(range) {
            layout.push(Placement::new(0, None));
            continue;
        }

        let mut taken = Vec::new();
        let mut node = Some(prev);
        while let Some(n) = node {
            if ranges[n].overlaps(range) {
                taken.push(layout.placements[n].offset);
            }
            node = layout.placements[n].previous;
        }

        layout.push(Placement::new(lowest_free(&taken), Some(prev)));
    }

    layout
}

fn lowest_free(taken: &[usize]) -> usize {
    (0..).find(|offset| !taken.contains(offset)).unwrap_or(0)
}

fn active_lanes(ranges: &[TimeRange]) -> DayLayout {
    let mut layout = DayLayout::default();
    // End time of the event occupying each lane; `None` once the lane is free.
    let mut open: Vec<Option<TimeOfDay>> = Vec::new();

    for (i, range) in ranges.iter().enumerate() {
        for lane in open.iter_mut() {
            if lane.is_some_and(|end| end <= range.start) {
                *lane = None;
            }
        }

        let in_cluster = open.iter().any(Option::is_some);
        let offset = match open.iter().position(Option::is_none) {
            Some(free) => free,
            None => {
                open.push(None);
                open.len() - 1
            }
        };
        open[offset] = Some(range.end);

        let previous = if in_cluster { i.checked_sub(1) } else { None };
        layout.push(Placement::new(offset, previous));
    }

    layout
}

/// Widen events that have their time slot to themselves.
///
/// An event at offset 0 that starts a chain, and whose successor (if any)
/// also sits at offset 0, is drawn across every lane of the day.
pub fn merge_spans(mut layout: DayLayout) -> DayLayout {
    let lanes = layout.lane_count();
    let offsets: Vec<usize> = layout.placements.iter().map(|p| p.offset).collect();

    for (j, placement) in layout.placements.iter_mut().enumerate() {
        let next_at_zero = offsets.get(j + 1).map_or(true, |&next| next == 0);
        if placement.offset == 0 && placement.previous.is_none() && next_at_zero {
            placement.lane_span = lanes;
        }
    }

    layout
}

// ── Tests ───────────────────────────────────────────────────────────────────
