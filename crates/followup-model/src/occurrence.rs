//! First-occurrence tracking for events and procedures.
//!
//! Both maps are built by folding over a timeline in ascending month order.
//! Each fold step consumes the previous value and returns a new one; a slot is
//! filled at most once, so the first time a category is seen wins.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::event::EventCategory;

/// Where and when a category was first seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub time_point: String,
    pub month_offset: u32,
    /// Not clamped: events dated before enrollment give negative values.
    pub days_since_enrollment: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstEvent {
    pub category: EventCategory,
    pub occurrence: Occurrence,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstOccurrenceMap {
    slots: BTreeMap<EventCategory, Occurrence>,
    first_event: Option<FirstEvent>,
}

impl FirstOccurrenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a map with `occurrence` recorded for `category`.
    ///
    /// The category slot keeps its existing value if already filled. The
    /// overall first event only moves to a strictly earlier date, so on a tie
    /// the event recorded first stays.
    #[must_use]
    pub fn record(mut self, category: EventCategory, occurrence: Occurrence) -> Self {
        let earlier = self
            .first_event
            .as_ref()
            .is_none_or(|first| occurrence.date < first.occurrence.date);
        if earlier {
            self.first_event = Some(FirstEvent {
                category,
                occurrence: occurrence.clone(),
            });
        }
        self.slots.entry(category).or_insert(occurrence);
        self
    }

    pub fn get(&self, category: EventCategory) -> Option<&Occurrence> {
        self.slots.get(&category)
    }

    pub fn contains(&self, category: EventCategory) -> bool {
        self.slots.contains_key(&category)
    }

    pub fn first_event(&self) -> Option<&FirstEvent> {
        self.first_event.as_ref()
    }

    /// Earliest occurrence among `categories`; ties go to the one listed first.
    pub fn earliest_of(&self, categories: &[EventCategory]) -> Option<(EventCategory, &Occurrence)> {
        categories
            .iter()
            .filter_map(|category| self.get(*category).map(|occ| (*category, occ)))
            .min_by_key(|(_, occ)| occ.date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EventCategory, &Occurrence)> {
        self.slots.iter().map(|(category, occ)| (*category, occ))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Procedures tracked alongside clinical events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcedureKind {
    CoronaryCt,
    CoronaryAngiography,
    CoronaryIntervention,
    CoronaryBypass,
    RevascularizationTreatment,
}

impl ProcedureKind {
    pub const ALL: [ProcedureKind; 5] = [
        ProcedureKind::CoronaryCt,
        ProcedureKind::CoronaryAngiography,
        ProcedureKind::CoronaryIntervention,
        ProcedureKind::CoronaryBypass,
        ProcedureKind::RevascularizationTreatment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcedureKind::CoronaryCt => "coronary_ct",
            ProcedureKind::CoronaryAngiography => "coronary_angiography",
            ProcedureKind::CoronaryIntervention => "coronary_intervention",
            ProcedureKind::CoronaryBypass => "coronary_bypass",
            ProcedureKind::RevascularizationTreatment => "revascularization_treatment",
        }
    }
}

impl fmt::Display for ProcedureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureRecord {
    pub date: NaiveDate,
    pub time_point: String,
    /// Treatment type, revascularization treatment only.
    pub treatment_type: Option<String>,
    /// Free-text detail, revascularization treatment only.
    pub detail: Option<String>,
}

impl ProcedureRecord {
    pub fn new(date: NaiveDate, time_point: impl Into<String>) -> Self {
        Self {
            date,
            time_point: time_point.into(),
            treatment_type: None,
            detail: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureTracking {
    slots: BTreeMap<ProcedureKind, ProcedureRecord>,
}

impl ProcedureTracking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns tracking with `record` stored unless `kind` was already seen.
    #[must_use]
    pub fn record(mut self, kind: ProcedureKind, record: ProcedureRecord) -> Self {
        self.slots.entry(kind).or_insert(record);
        self
    }

    pub fn get(&self, kind: ProcedureKind) -> Option<&ProcedureRecord> {
        self.slots.get(&kind)
    }

    pub fn has(&self, kind: ProcedureKind) -> bool {
        self.slots.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
