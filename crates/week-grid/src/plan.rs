//! The plan document: which activities each person has picked, per location.
//!
//! A plan is stored as JSON and grows one location at a time as activities
//! are loaded for a person. For display, every person's picks at the same
//! location are pooled with [`Plan::by_location`].

use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::error::{GridError, Result};

/// All activities at one location that feed a single weekly grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationWeek {
    #[serde(alias = "center_id")]
    pub location_id: String,
    #[serde(alias = "center_name")]
    pub location_name: String,
    #[serde(default)]
    pub events: Vec<Activity>,
}

impl LocationWeek {
    pub fn new(
        location_id: impl Into<String>,
        location_name: impl Into<String>,
        events: Vec<Activity>,
    ) -> Self {
        LocationWeek {
            location_id: location_id.into(),
            location_name: location_name.into(),
            events,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonWeek {
    pub person: String,
    #[serde(default, alias = "center_weeks")]
    pub location_weeks: Vec<LocationWeek>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub plans: Vec<PersonWeek>,
}

impl Plan {
    /// Decode a plan document.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidPlan`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GridError::InvalidPlan(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GridError::InvalidPlan(e.to_string()))
    }

    /// Record `events` as `person`'s activities at a location.
    ///
    /// Replaces the events of an existing location week for that person,
    /// otherwise adds the location to the person, otherwise adds the person.
    pub fn upsert(
        &mut self,
        person: &str,
        location_id: &str,
        location_name: &str,
        events: Vec<Activity>,
    ) {
        let Some(index) = self.plans.iter().position(|p| p.person == person) else {
            self.plans.push(PersonWeek {
                person: person.to_string(),
                location_weeks: vec![LocationWeek::new(location_id, location_name, events)],
            });
            return;
        };

        let person_week = &mut self.plans[index];
        match person_week
            .location_weeks
            .iter_mut()
            .find(|w| w.location_id == location_id)
        {
            Some(week) => week.events = events,
            None => person_week
                .location_weeks
                .push(LocationWeek::new(location_id, location_name, events)),
        }
    }

    /// Pool every person's events per location.
    ///
    /// Locations appear in the order they are first met walking the plan;
    /// the name recorded with the first occurrence wins. Events are
    /// concatenated in plan order.
    ///
    /// ```
    /// use week_grid::{Activity, Plan};
    ///
    /// let mut plan = Plan::default();
    /// plan.upsert("ana", "165", "Pool", vec![Activity::new(1, "Swim", "Mon", "9:00 AM - 9:30 AM")]);
    /// plan.upsert("ben", "165", "Pool", vec![Activity::new(2, "Dive", "Mon", "9:00 AM - 9:30 AM")]);
    ///
    /// let weeks = plan.by_location();
    /// assert_eq!(weeks.len(), 1);
    /// assert_eq!(weeks[0].events.len(), 2);
    /// ```
    pub fn by_location(&self) -> Vec<LocationWeek> {
        let mut merged: Vec<LocationWeek> = Vec::new();
        for week in self.plans.iter().flat_map(|p| &p.location_weeks) {
            match merged.iter_mut().find(|m| m.location_id == week.location_id) {
                Some(existing) => existing.events.extend(week.events.iter().cloned()),
                None => merged.push(week.clone()),
            }
        }
        merged
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn swim(id: i64) -> Activity {
        Activity::new(id, "Swim", "Mon", "9:00 AM - 9:30 AM")
    }

    fn event_ids(week: &LocationWeek) -> Vec<i64> {
        week.events.iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_upsert_creates_person() {
        let mut plan = Plan::default();
        plan.upsert("ana", "165", "Pool", vec![swim(1)]);
        assert_eq!(plan.plans.len(), 1);
        assert_eq!(plan.plans[0].person, "ana");
        assert_eq!(event_ids(&plan.plans[0].location_weeks[0]), vec![1]);
    }

    #[test]
    fn test_upsert_replaces_existing_location() {
        let mut plan = Plan::default();
        plan.upsert("ana", "165", "Pool", vec![swim(1), swim(2)]);
        plan.upsert("ana", "165", "Pool", vec![swim(3)]);
        assert_eq!(plan.plans[0].location_weeks.len(), 1);
        assert_eq!(event_ids(&plan.plans[0].location_weeks[0]), vec![3]);
    }

    #[test]
    fn test_upsert_adds_location_to_person() {
        let mut plan = Plan::default();
        plan.upsert("ana", "165", "Pool", vec![swim(1)]);
        plan.upsert("ana", "384", "Arena", vec![swim(2)]);
        assert_eq!(plan.plans.len(), 1);
        let ids: Vec<&str> = plan.plans[0]
            .location_weeks
            .iter()
            .map(|w| w.location_id.as_str())
            .collect();
        assert_eq!(ids, vec!["165", "384"]);
    }

    #[test]
    fn test_upsert_keeps_other_people() {
        let mut plan = Plan::default();
        plan.upsert("ana", "165", "Pool", vec![swim(1)]);
        plan.upsert("ben", "165", "Pool", vec![swim(2)]);
        plan.upsert("ana", "165", "Pool", vec![swim(3)]);
        assert_eq!(plan.plans.len(), 2);
        assert_eq!(event_ids(&plan.plans[1].location_weeks[0]), vec![2]);
    }

    #[test]
    fn test_by_location_first_seen_order() {
        let mut plan = Plan::default();
        plan.upsert("ana", "384", "Arena", vec![swim(1)]);
        plan.upsert("ana", "165", "Pool", vec![swim(2)]);
        plan.upsert("ben", "165", "Pool", vec![swim(3)]);
        plan.upsert("ben", "384", "Arena", vec![swim(4)]);

        let weeks = plan.by_location();
        let ids: Vec<&str> = weeks.iter().map(|w| w.location_id.as_str()).collect();
        assert_eq!(ids, vec!["384", "165"]);
        assert_eq!(event_ids(&weeks[0]), vec![1, 4]);
        assert_eq!(event_ids(&weeks[1]), vec![2, 3]);
    }

    #[test]
    fn test_decode_legacy_center_names() {
        let json = r#"{
            "plans": [{
                "person": "ana",
                "center_weeks": [{
                    "center_id": "165",
                    "center_name": "Pool",
                    "events": [{"id": 1, "name": "Swim", "number": "", "time_range": "9:00 AM - 9:30 AM", "detail_url": "", "days_of_week": "Mon"}]
                }]
            }]
        }"#;
        let plan = Plan::from_json(json).unwrap();
        let week = &plan.plans[0].location_weeks[0];
        assert_eq!(week.location_id, "165");
        assert_eq!(week.location_name, "Pool");
        assert_eq!(event_ids(week), vec![1]);
    }

    #[test]
    fn test_json_round_trip_preserves_plan() {
        let mut plan = Plan::default();
        plan.upsert("ana", "165", "Pool", vec![swim(1)]);
        let decoded = Plan::from_json(&plan.to_json().unwrap()).unwrap();
        assert_eq!(decoded, plan);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = Plan::from_json("[1, 2").unwrap_err().to_string();
        assert!(err.contains("Invalid plan"), "got: {err}");
    }
}
