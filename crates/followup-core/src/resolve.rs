//! First-occurrence resolution over a timeline.

use followup_model::{
    FirstOccurrenceMap, Occurrence, ProcedureKind, ProcedureRecord, ProcedureTracking,
    TimePointObservation, Timeline,
};

use crate::extract::extract_events;
use crate::normalize::is_affirmative;

/// Folds the extracted events of every time point, in ascending month order.
///
/// A category keeps the first occurrence met during the scan, which is not
/// necessarily its earliest calendar date.
pub fn resolve_occurrences(timeline: &Timeline) -> FirstOccurrenceMap {
    timeline
        .observations
        .iter()
        .fold(FirstOccurrenceMap::new(), |map, obs| {
            extract_events(obs).into_iter().fold(map, |map, event| {
                let occurrence = Occurrence {
                    date: event.date,
                    time_point: obs.label.clone(),
                    month_offset: obs.month_offset,
                    days_since_enrollment: timeline.days_since_enrollment(event.date),
                };
                map.record(event.category, occurrence)
            })
        })
}

/// Folds the procedure flags of every time point that has a visit date.
pub fn resolve_procedures(timeline: &Timeline) -> ProcedureTracking {
    timeline
        .observations
        .iter()
        .fold(ProcedureTracking::new(), track_procedures)
}

fn track_procedures(tracking: ProcedureTracking, obs: &TimePointObservation) -> ProcedureTracking {
    let Some(visit_date) = obs.visit_date else {
        return tracking;
    };
    let procedures = &obs.procedures;
    let mut tracking = tracking;

    if procedures.coronary_intervention {
        let date = procedures.intervention_date.unwrap_or(visit_date);
        // an intervention is always preceded by angiography
        tracking = tracking
            .record(
                ProcedureKind::CoronaryIntervention,
                ProcedureRecord::new(date, &obs.label),
            )
            .record(
                ProcedureKind::CoronaryAngiography,
                ProcedureRecord::new(date, &obs.label),
            );
    }
    if procedures.coronary_bypass {
        let date = procedures.bypass_date.unwrap_or(visit_date);
        tracking = tracking.record(
            ProcedureKind::CoronaryBypass,
            ProcedureRecord::new(date, &obs.label),
        );
    }
    if procedures.revascularization_treatment {
        let date = procedures.revascularization_date.unwrap_or(visit_date);
        tracking = tracking.record(
            ProcedureKind::RevascularizationTreatment,
            ProcedureRecord {
                treatment_type: procedures.revascularization_type.clone(),
                detail: procedures.revascularization_detail.clone(),
                ..ProcedureRecord::new(date, &obs.label)
            },
        );
    }
    let has_ct = obs
        .overflow
        .iter()
        .any(|(column, value)| column.to_lowercase().contains("ct") && is_affirmative(value));
    if has_ct {
        tracking = tracking.record(
            ProcedureKind::CoronaryCt,
            ProcedureRecord::new(visit_date, &obs.label),
        );
    }
    tracking
}
