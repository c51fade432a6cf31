use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::endpoint::EndpointOutcome;
use crate::event::EventCategory;
use crate::occurrence::{FirstEvent, FirstOccurrenceMap, ProcedureTracking};
use crate::status::FollowupStatus;
use crate::timeline::{Demographics, LatestFollowup};

/// Final per-subject result of the follow-up engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub subject_id: String,
    pub demographics: Demographics,
    pub enrollment_date: NaiveDate,
    pub latest_followup: Option<LatestFollowup>,
    pub occurrences: FirstOccurrenceMap,
    pub procedures: ProcedureTracking,
    pub has_death: bool,
    pub has_cardiovascular_event: bool,
    pub has_lost_to_followup: bool,
    pub status: FollowupStatus,
    pub endpoint: EndpointOutcome,
    pub processed_at: NaiveDateTime,
}

impl OutcomeRecord {
    pub fn first_event(&self) -> Option<&FirstEvent> {
        self.occurrences.first_event()
    }

    pub fn first_event_category(&self) -> Option<EventCategory> {
        self.first_event().map(|first| first.category)
    }

    /// Same record with the processing timestamp cleared, for comparing runs.
    #[must_use]
    pub fn without_timestamp(mut self) -> Self {
        self.processed_at = NaiveDateTime::default();
        self
    }
}
