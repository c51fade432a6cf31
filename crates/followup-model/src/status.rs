use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Follow-up completeness label for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowupStatus {
    /// Five years or more of follow-up.
    Complete,
    /// One to five years.
    Adequate,
    /// Less than a year.
    Incomplete,
    /// Lost to follow-up at any time point.
    LostToFollowup,
    /// No time points at all.
    NoData,
    /// Time points exist but none has a visit date.
    Unknown,
}

impl FollowupStatus {
    pub const ALL: [FollowupStatus; 6] = [
        FollowupStatus::Complete,
        FollowupStatus::Adequate,
        FollowupStatus::Incomplete,
        FollowupStatus::LostToFollowup,
        FollowupStatus::NoData,
        FollowupStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FollowupStatus::Complete => "complete",
            FollowupStatus::Adequate => "adequate",
            FollowupStatus::Incomplete => "incomplete",
            FollowupStatus::LostToFollowup => "lost_to_followup",
            FollowupStatus::NoData => "no_data",
            FollowupStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FollowupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FollowupStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        FollowupStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ModelError::InvalidStatus {
                value: s.to_string(),
            })
    }
}
