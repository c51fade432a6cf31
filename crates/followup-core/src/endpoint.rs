//! Endpoint evaluation: occurrence flag and survival time.

use chrono::NaiveDate;

use followup_model::{Endpoint, EndpointOutcome, EventCategory, FirstOccurrenceMap};

/// Categories making up major adverse cardiovascular events.
pub const MACE_CATEGORIES: [EventCategory; 3] = [
    EventCategory::Death,
    EventCategory::MyocardialInfarction,
    EventCategory::Revascularization,
];

/// Event categories that count towards `endpoint`.
pub fn constituents(endpoint: Endpoint) -> &'static [EventCategory] {
    match endpoint {
        Endpoint::Death => &[EventCategory::Death],
        Endpoint::Mace => &MACE_CATEGORIES,
        Endpoint::Mi => &[EventCategory::MyocardialInfarction],
        Endpoint::Angina => &[EventCategory::Angina],
        Endpoint::HeartFailure => &[EventCategory::HeartFailure],
        Endpoint::Revascularization => &[EventCategory::Revascularization],
        Endpoint::Hospitalization => &[EventCategory::Hospitalization],
        Endpoint::AnyEvent => &EventCategory::CLINICAL,
    }
}

/// Evaluates `endpoint` against a subject's first occurrences.
///
/// The endpoint date is the earliest first occurrence among its categories.
/// Survival time runs from enrollment to that date; a censored subject runs
/// to the latest follow-up instead, or gets zero when that is unknown.
pub fn evaluate_endpoint(
    endpoint: Endpoint,
    occurrences: &FirstOccurrenceMap,
    enrollment_date: NaiveDate,
    latest_followup: Option<NaiveDate>,
) -> EndpointOutcome {
    match occurrences.earliest_of(constituents(endpoint)) {
        Some((_, occurrence)) => EndpointOutcome {
            endpoint,
            event_occurred: true,
            survival_time_days: (occurrence.date - enrollment_date).num_days(),
            endpoint_date: Some(occurrence.date),
        },
        None => EndpointOutcome {
            endpoint,
            event_occurred: false,
            survival_time_days: latest_followup
                .map(|latest| (latest - enrollment_date).num_days())
                .unwrap_or(0),
            endpoint_date: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use followup_model::Occurrence;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn occ(date: NaiveDate) -> Occurrence {
        Occurrence {
            date,
            time_point: "m12".to_string(),
            month_offset: 12,
            days_since_enrollment: 0,
        }
    }

    #[test]
    fn mace_takes_earliest_constituent() {
        let map = FirstOccurrenceMap::new()
            .record(EventCategory::Revascularization, occ(date(2020, 5, 1)))
            .record(EventCategory::Death, occ(date(2020, 9, 1)))
            .record(EventCategory::Angina, occ(date(2020, 2, 1)));
        let outcome = evaluate_endpoint(Endpoint::Mace, &map, date(2020, 1, 1), None);
        assert!(outcome.event_occurred);
        assert_eq!(outcome.endpoint_date, Some(date(2020, 5, 1)));
        assert_eq!(outcome.survival_time_days, 121);
        assert_eq!(outcome.endpoint_event(), "mace");
    }

    #[test]
    fn censored_uses_latest_followup() {
        let map = FirstOccurrenceMap::new().record(EventCategory::Angina, occ(date(2020, 2, 1)));
        let outcome = evaluate_endpoint(
            Endpoint::Death,
            &map,
            date(2020, 1, 1),
            Some(date(2021, 1, 2)),
        );
        assert!(!outcome.event_occurred);
        assert_eq!(outcome.survival_time_days, 367);
        assert_eq!(outcome.endpoint_date, None);
    }

    #[test]
    fn censored_without_followup_is_zero() {
        let outcome = evaluate_endpoint(
            Endpoint::Angina,
            &FirstOccurrenceMap::new(),
            date(2020, 1, 1),
            None,
        );
        assert_eq!(outcome.survival_time_days, 0);
    }

    #[test]
    fn any_event_ignores_generic_and_procedures() {
        let map = FirstOccurrenceMap::new()
            .record(EventCategory::CoronaryBypass, occ(date(2020, 3, 1)))
            .record(EventCategory::CardiovascularEvent, occ(date(2020, 4, 1)));
        let outcome = evaluate_endpoint(
            Endpoint::AnyEvent,
            &map,
            date(2020, 1, 1),
            Some(date(2021, 1, 2)),
        );
        assert!(!outcome.event_occurred);
        assert_eq!(outcome.survival_time_days, 367);
        assert_eq!(outcome.endpoint_date, None);
    }

    #[test]
    fn any_event_takes_earliest_clinical_category() {
        let map = FirstOccurrenceMap::new()
            .record(EventCategory::CoronaryBypass, occ(date(2020, 2, 1)))
            .record(EventCategory::Hospitalization, occ(date(2020, 6, 1)))
            .record(EventCategory::Angina, occ(date(2020, 3, 1)));
        let outcome = evaluate_endpoint(Endpoint::AnyEvent, &map, date(2020, 1, 1), None);
        assert!(outcome.event_occurred);
        assert_eq!(outcome.endpoint_date, Some(date(2020, 3, 1)));
        assert_eq!(outcome.survival_time_days, 60);
    }
}
