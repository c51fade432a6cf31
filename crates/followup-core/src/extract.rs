//! Event extraction for a single time point.

use chrono::NaiveDate;

use followup_model::{EventCategory, TimePointObservation, TimedEvent};

use crate::fields;
use crate::normalize::parse_single_event_code;

/// Events recorded at one time point, in emission order.
///
/// A death date short-circuits everything else: the visit yields exactly one
/// `death` event. Otherwise decoded event codes are dated at the visit; when
/// there are none but the visit reports a cardiovascular event, the specific
/// code is looked up in the raw fields and the generic category is used if
/// it can't be resolved. Bypass and intervention procedures are added on top.
pub fn extract_events(obs: &TimePointObservation) -> Vec<TimedEvent> {
    if let Some(death_date) = obs.death_date {
        return vec![TimedEvent::new(EventCategory::Death, death_date)];
    }

    let mut events = match obs.visit_date {
        Some(visit_date) => clinical_events(obs, visit_date),
        None => Vec::new(),
    };
    events.extend(procedure_events(obs));
    events
}

fn clinical_events(obs: &TimePointObservation, visit_date: NaiveDate) -> Vec<TimedEvent> {
    if !obs.event_categories.is_empty() {
        return obs
            .event_categories
            .iter()
            .map(|category| TimedEvent::new(*category, visit_date))
            .collect();
    }
    if obs.cardiovascular_event {
        let category = obs
            .overflow
            .first_of(fields::SPECIFIC_EVENT)
            .and_then(parse_single_event_code)
            .unwrap_or(EventCategory::CardiovascularEvent);
        return vec![TimedEvent::new(category, visit_date)];
    }
    Vec::new()
}

fn procedure_events(obs: &TimePointObservation) -> Vec<TimedEvent> {
    let procedures = &obs.procedures;
    let mut events = Vec::new();
    if procedures.coronary_bypass
        && let Some(date) = procedures.bypass_date.or(obs.visit_date)
    {
        events.push(TimedEvent::new(EventCategory::CoronaryBypass, date));
    }
    if procedures.coronary_intervention
        && let Some(date) = procedures.intervention_date.or(obs.visit_date)
    {
        events.push(TimedEvent::new(EventCategory::CoronaryIntervention, date));
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use followup_model::{CellValue, OverflowFields, ProcedureFlags, SourceRow};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn death_short_circuits() {
        let obs = TimePointObservation::new("第12个月", 12)
            .with_visit_date(Some(date(2020, 9, 10)))
            .with_death_date(Some(date(2020, 9, 1)))
            .with_event_categories(vec![EventCategory::Angina])
            .with_procedures(ProcedureFlags {
                coronary_bypass: true,
                ..ProcedureFlags::default()
            });
        assert_eq!(
            extract_events(&obs),
            vec![TimedEvent::new(EventCategory::Death, date(2020, 9, 1))]
        );
    }

    #[test]
    fn decoded_codes_need_a_visit_date() {
        let obs = TimePointObservation::new("第6个月", 6)
            .with_event_categories(vec![EventCategory::Angina, EventCategory::Hospitalization]);
        assert!(extract_events(&obs).is_empty());

        let obs = obs.with_visit_date(Some(date(2020, 7, 5)));
        let categories: Vec<_> = extract_events(&obs).iter().map(|e| e.category).collect();
        assert_eq!(
            categories,
            vec![EventCategory::Angina, EventCategory::Hospitalization]
        );
    }

    #[test]
    fn generic_flag_resolves_specific_code() {
        let overflow = OverflowFields::new(SourceRow::from_pairs([
            ("如有不良事件，何事件", CellValue::Integer(2)),
        ]));
        let obs = TimePointObservation::new("第6个月", 6)
            .with_visit_date(Some(date(2020, 7, 5)))
            .with_cardiovascular_event(true)
            .with_overflow(overflow);
        assert_eq!(
            extract_events(&obs),
            vec![TimedEvent::new(EventCategory::MyocardialInfarction, date(2020, 7, 5))]
        );
    }

    #[test]
    fn generic_flag_falls_back_to_cardiovascular_event() {
        let overflow = OverflowFields::new(SourceRow::from_pairs([
            ("adverse_event_type", CellValue::text("unclear")),
        ]));
        let obs = TimePointObservation::new("第6个月", 6)
            .with_visit_date(Some(date(2020, 7, 5)))
            .with_cardiovascular_event(true)
            .with_overflow(overflow);
        assert_eq!(
            extract_events(&obs),
            vec![TimedEvent::new(EventCategory::CardiovascularEvent, date(2020, 7, 5))]
        );
    }

    #[test]
    fn procedures_use_own_date_or_visit_date() {
        let obs = TimePointObservation::new("第6个月", 6)
            .with_visit_date(Some(date(2020, 7, 5)))
            .with_event_categories(vec![EventCategory::Angina])
            .with_procedures(ProcedureFlags {
                coronary_bypass: true,
                coronary_intervention: true,
                intervention_date: Some(date(2020, 6, 20)),
                ..ProcedureFlags::default()
            });
        assert_eq!(
            extract_events(&obs),
            vec![
                TimedEvent::new(EventCategory::Angina, date(2020, 7, 5)),
                TimedEvent::new(EventCategory::CoronaryBypass, date(2020, 7, 5)),
                TimedEvent::new(EventCategory::CoronaryIntervention, date(2020, 6, 20)),
            ]
        );
    }

    #[test]
    fn procedures_without_any_date_are_skipped() {
        let obs = TimePointObservation::new("第6个月", 6).with_procedures(ProcedureFlags {
            coronary_bypass: true,
            ..ProcedureFlags::default()
        });
        assert!(extract_events(&obs).is_empty());
    }
}
