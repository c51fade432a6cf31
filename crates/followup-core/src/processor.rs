//! Per-subject evaluation: timeline to outcome record.

use chrono::NaiveDateTime;

use followup_model::{Endpoint, EventCategory, OutcomeRecord, Timeline};

use crate::endpoint::evaluate_endpoint;
use crate::resolve::{resolve_occurrences, resolve_procedures};
use crate::status::classify_status;

/// Plain parameters for evaluating a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationContext {
    pub endpoint: Endpoint,
    /// Stamped on every record of the batch.
    pub processed_at: NaiveDateTime,
}

impl EvaluationContext {
    pub fn new(endpoint: Endpoint, processed_at: NaiveDateTime) -> Self {
        Self {
            endpoint,
            processed_at,
        }
    }
}

/// Evaluates one timeline. Pure given its inputs.
pub fn evaluate_timeline(timeline: &Timeline, context: &EvaluationContext) -> OutcomeRecord {
    let occurrences = resolve_occurrences(timeline);
    let procedures = resolve_procedures(timeline);
    let endpoint = evaluate_endpoint(
        context.endpoint,
        &occurrences,
        timeline.enrollment_date,
        timeline.latest_followup.map(|latest| latest.date),
    );

    let has_death = occurrences.contains(EventCategory::Death);
    let has_cardiovascular_event = EventCategory::CLINICAL
        .iter()
        .chain([&EventCategory::CardiovascularEvent])
        .any(|category| occurrences.contains(*category));

    OutcomeRecord {
        subject_id: timeline.subject_id.clone(),
        demographics: timeline.demographics.clone(),
        enrollment_date: timeline.enrollment_date,
        latest_followup: timeline.latest_followup,
        occurrences,
        procedures,
        has_death,
        has_cardiovascular_event,
        has_lost_to_followup: timeline.any_lost_to_followup(),
        status: classify_status(timeline),
        endpoint,
        processed_at: context.processed_at,
    }
}
