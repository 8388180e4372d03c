//! Error types for week-grid operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Invalid time range {input:?}: {reason}")]
    InvalidTimeRange { input: String, reason: String },

    #[error("Unknown weekday: {0:?}")]
    UnknownWeekday(String),

    #[error("Activity {activity_id} in location {location_id}: {source}")]
    Activity {
        location_id: String,
        activity_id: i64,
        #[source]
        source: Box<GridError>,
    },

    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl GridError {
    pub(crate) fn time_range(input: &str, reason: impl Into<String>) -> Self {
        GridError::InvalidTimeRange {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// The underlying parse or weekday error, with any activity context removed.
    pub fn root(&self) -> &GridError {
        match self {
            GridError::Activity { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
