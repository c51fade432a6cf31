//! Per-subject timeline assembled from all snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::observation::TimePointObservation;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub group: Option<String>,
}

/// Latest time point that carries a visit date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestFollowup {
    pub date: NaiveDate,
    pub month_offset: u32,
    pub days_since_enrollment: i64,
}

/// One subject's ordered follow-up history.
///
/// Observations are sorted ascending by month offset and unique by month.
/// The enrollment date is always known; subjects without one never become a
/// timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub subject_id: String,
    pub demographics: Demographics,
    pub enrollment_date: NaiveDate,
    pub observations: Vec<TimePointObservation>,
    pub latest_followup: Option<LatestFollowup>,
}

impl Timeline {
    pub fn has_observations(&self) -> bool {
        !self.observations.is_empty()
    }

    pub fn any_lost_to_followup(&self) -> bool {
        self.observations.iter().any(|obs| obs.lost_to_followup)
    }

    pub fn days_since_enrollment(&self, date: NaiveDate) -> i64 {
        (date - self.enrollment_date).num_days()
    }
}
