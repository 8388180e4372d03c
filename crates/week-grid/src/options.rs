//! Layout configuration.
//!
//! Every field has a default, so an empty JSON object (or
//! [`LayoutOptions::default`]) reproduces the standard timetable.

use serde::{Deserialize, Serialize};

use crate::bucket::InvalidRecordPolicy;
use crate::error::{GridError, Result};
use crate::lanes::LaneStrategy;
use crate::time::HourConvention;

/// Background colors handed out to activity names in first-seen order.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "rgb(234, 153, 153)",
    "rgb(249, 203, 156)",
    "rgb(255, 229, 153)",
    "rgb(182, 215, 168)",
    "rgb(162, 196, 201)",
    "rgb(164, 194, 244)",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOptions {
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    /// Color for names seen after the palette is used up.
    #[serde(default = "default_fallback_color")]
    pub fallback_color: String,
    /// Width of the time-label column at the left of the grid.
    #[serde(default = "default_label_column")]
    pub label_column: String,
    /// First hour on the time axis.
    #[serde(default = "default_axis_start_hour")]
    pub axis_start_hour: u8,
    /// Hour the time axis stops before.
    #[serde(default = "default_axis_end_hour")]
    pub axis_end_hour: u8,
    #[serde(default = "default_axis_step_minutes")]
    pub axis_step_minutes: u8,
    #[serde(default)]
    pub lane_strategy: LaneStrategy,
    #[serde(default)]
    pub hour_convention: HourConvention,
    #[serde(default)]
    pub invalid_records: InvalidRecordPolicy,
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

fn default_fallback_color() -> String {
    "white".to_string()
}

fn default_label_column() -> String {
    "50px".to_string()
}

fn default_axis_start_hour() -> u8 {
    9
}

fn default_axis_end_hour() -> u8 {
    21
}

fn default_axis_step_minutes() -> u8 {
    15
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            fallback_color: default_fallback_color(),
            label_column: default_label_column(),
            axis_start_hour: default_axis_start_hour(),
            axis_end_hour: default_axis_end_hour(),
            axis_step_minutes: default_axis_step_minutes(),
            lane_strategy: LaneStrategy::default(),
            hour_convention: HourConvention::default(),
            invalid_records: InvalidRecordPolicy::default(),
        }
    }
}

impl LayoutOptions {
    /// Parse options from JSON, filling in defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidOptions`] if the JSON is malformed or the
    /// time axis settings are inconsistent.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: LayoutOptions =
            serde_json::from_str(json).map_err(|e| GridError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.axis_start_hour >= self.axis_end_hour || self.axis_end_hour > 24 {
            return Err(GridError::InvalidOptions(format!(
                "time axis {}..{} is empty or past midnight",
                self.axis_start_hour, self.axis_end_hour
            )));
        }
        if self.axis_step_minutes == 0 || 60 % self.axis_step_minutes != 0 {
            return Err(GridError::InvalidOptions(format!(
                "axis step of {} minutes does not divide an hour",
                self.axis_step_minutes
            )));
        }
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
