//! Cohort-level summaries: endpoint comparison and first-event distribution.

use std::collections::BTreeMap;

use followup_model::{Endpoint, EventCategory, FirstOccurrenceMap, OutcomeRecord, Timeline};

use crate::endpoint::evaluate_endpoint;
use crate::resolve::resolve_occurrences;

/// Distribution key for subjects without any event.
pub const NO_EVENT: &str = "no_event";

/// Event counts and survival for one endpoint over a cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointSummary {
    pub endpoint: Endpoint,
    pub total: usize,
    pub events: usize,
    pub censored: usize,
    /// Percentage of subjects with the event, 0 for an empty cohort.
    pub event_rate: f64,
    pub mean_survival_days: f64,
}

/// Evaluates each endpoint over the same timelines.
///
/// Occurrences are resolved once per timeline and shared across endpoints.
pub fn summarize_endpoints(timelines: &[Timeline], endpoints: &[Endpoint]) -> Vec<EndpointSummary> {
    let resolved: Vec<(&Timeline, FirstOccurrenceMap)> = timelines
        .iter()
        .map(|timeline| (timeline, resolve_occurrences(timeline)))
        .collect();

    endpoints
        .iter()
        .map(|&endpoint| {
            let outcomes: Vec<_> = resolved
                .iter()
                .map(|(timeline, occurrences)| {
                    evaluate_endpoint(
                        endpoint,
                        occurrences,
                        timeline.enrollment_date,
                        timeline.latest_followup.map(|latest| latest.date),
                    )
                })
                .collect();
            let total = outcomes.len();
            let events = outcomes.iter().filter(|o| o.event_occurred).count();
            let survival_sum: i64 = outcomes.iter().map(|o| o.survival_time_days).sum();
            EndpointSummary {
                endpoint,
                total,
                events,
                censored: total - events,
                event_rate: percentage(events, total),
                mean_survival_days: if total == 0 {
                    0.0
                } else {
                    survival_sum as f64 / total as f64
                },
            }
        })
        .collect()
}

/// Subjects per first event category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDistribution {
    pub total: usize,
    /// Keyed by category name, with `no_event` for subjects without events.
    pub counts: BTreeMap<String, usize>,
}

impl EventDistribution {
    pub fn percentage(&self, key: &str) -> f64 {
        percentage(self.counts.get(key).copied().unwrap_or(0), self.total)
    }

    pub fn with_events(&self) -> usize {
        self.total - self.counts.get(NO_EVENT).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(key, count)| (key.as_str(), *count))
    }
}

pub fn first_event_distribution(records: &[OutcomeRecord]) -> EventDistribution {
    let mut counts = BTreeMap::new();
    for record in records {
        let key = record
            .first_event_category()
            .map_or(NO_EVENT, |category| category.as_str());
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    EventDistribution {
        total: records.len(),
        counts,
    }
}

/// Subjects with a first occurrence of each clinical category.
///
/// Unlike the distribution, a subject counts once for every category it
/// reached, not only for its first event.
pub fn category_breakdown(records: &[OutcomeRecord]) -> Vec<(EventCategory, usize)> {
    EventCategory::CLINICAL
        .iter()
        .map(|&category| {
            let count = records
                .iter()
                .filter(|record| record.occurrences.contains(category))
                .count();
            (category, count)
        })
        .collect()
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
