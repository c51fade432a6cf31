//! Canonical event taxonomy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Canonical event category.
///
/// The first six variants are clinical outcomes; `CardiovascularEvent` is the
/// generic fallback used when a visit reports an event without saying which;
/// the last two are procedures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Death,
    MyocardialInfarction,
    Revascularization,
    HeartFailure,
    Angina,
    Hospitalization,
    CardiovascularEvent,
    CoronaryIntervention,
    CoronaryBypass,
}

impl EventCategory {
    pub const ALL: [EventCategory; 9] = [
        EventCategory::Death,
        EventCategory::MyocardialInfarction,
        EventCategory::Revascularization,
        EventCategory::HeartFailure,
        EventCategory::Angina,
        EventCategory::Hospitalization,
        EventCategory::CardiovascularEvent,
        EventCategory::CoronaryIntervention,
        EventCategory::CoronaryBypass,
    ];

    pub const CLINICAL: [EventCategory; 6] = [
        EventCategory::Death,
        EventCategory::MyocardialInfarction,
        EventCategory::Revascularization,
        EventCategory::HeartFailure,
        EventCategory::Angina,
        EventCategory::Hospitalization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Death => "death",
            EventCategory::MyocardialInfarction => "myocardial_infarction",
            EventCategory::Revascularization => "revascularization",
            EventCategory::HeartFailure => "heart_failure",
            EventCategory::Angina => "angina",
            EventCategory::Hospitalization => "hospitalization",
            EventCategory::CardiovascularEvent => "cardiovascular_event",
            EventCategory::CoronaryIntervention => "coronary_intervention",
            EventCategory::CoronaryBypass => "coronary_bypass",
        }
    }

    pub fn is_clinical(&self) -> bool {
        Self::CLINICAL.contains(self)
    }

    pub fn is_procedure(&self) -> bool {
        matches!(
            self,
            EventCategory::CoronaryIntervention | EventCategory::CoronaryBypass
        )
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "mi" => return Ok(EventCategory::MyocardialInfarction),
            "cv_event" => return Ok(EventCategory::CardiovascularEvent),
            _ => {}
        }
        EventCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ModelError::InvalidCategory {
                value: s.to_string(),
            })
    }
}

/// One dated event emitted for a time point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub category: EventCategory,
    pub date: NaiveDate,
}

impl TimedEvent {
    pub fn new(category: EventCategory, date: NaiveDate) -> Self {
        Self { category, date }
    }
}
