//! Endpoint selectors and their evaluated outcome.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Clinical endpoint used as the outcome of interest for survival analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    #[default]
    Death,
    /// Major adverse cardiovascular event: death, MI or revascularization.
    Mace,
    Mi,
    Angina,
    HeartFailure,
    Revascularization,
    Hospitalization,
    AnyEvent,
}

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::Death,
        Endpoint::Mace,
        Endpoint::Mi,
        Endpoint::Angina,
        Endpoint::HeartFailure,
        Endpoint::Revascularization,
        Endpoint::Hospitalization,
        Endpoint::AnyEvent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Death => "death",
            Endpoint::Mace => "mace",
            Endpoint::Mi => "mi",
            Endpoint::Angina => "angina",
            Endpoint::HeartFailure => "heart_failure",
            Endpoint::Revascularization => "revascularization",
            Endpoint::Hospitalization => "hospitalization",
            Endpoint::AnyEvent => "any_event",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Endpoint::Death => "All-cause death",
            Endpoint::Mace => "Major adverse cardiovascular event (death, MI, revascularization)",
            Endpoint::Mi => "Myocardial infarction",
            Endpoint::Angina => "Angina",
            Endpoint::HeartFailure => "Heart failure",
            Endpoint::Revascularization => "Revascularization",
            Endpoint::Hospitalization => "Hospitalization",
            Endpoint::AnyEvent => "Any clinical event (procedures excluded)",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.as_str() == normalized)
            .ok_or_else(|| ModelError::InvalidEndpoint {
                value: s.to_string(),
                expected: Endpoint::ALL
                    .iter()
                    .map(Endpoint::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Occurrence flag and time-to-event for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointOutcome {
    pub endpoint: Endpoint,
    pub event_occurred: bool,
    /// Days to the endpoint when it occurred, otherwise days to the latest
    /// follow-up, otherwise zero.
    pub survival_time_days: i64,
    pub endpoint_date: Option<NaiveDate>,
}

impl EndpointOutcome {
    pub fn endpoint_event(&self) -> &'static str {
        self.endpoint.as_str()
    }
}
