//! A single subject's snapshot at one follow-up time point.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::event::EventCategory;
use crate::table::SourceRow;

/// Raw fields of the source row, kept for lookups the typed fields don't cover.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverflowFields {
    row: SourceRow,
}

impl OverflowFields {
    pub fn new(row: SourceRow) -> Self {
        Self { row }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.row.get_present(column)
    }

    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(CellValue::display_text)
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(CellValue::as_f64)
    }

    /// First candidate column holding a value.
    pub fn first_of(&self, candidates: &[&str]) -> Option<&CellValue> {
        candidates.iter().find_map(|column| self.get(column))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.row.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }
}

/// Procedure flags recorded at a visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureFlags {
    pub coronary_intervention: bool,
    pub intervention_date: Option<NaiveDate>,
    pub coronary_bypass: bool,
    pub bypass_date: Option<NaiveDate>,
    pub revascularization_treatment: bool,
    pub revascularization_type: Option<String>,
    pub revascularization_date: Option<NaiveDate>,
    pub revascularization_detail: Option<String>,
}

/// One visit snapshot for one subject. Built by the assembler, then read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimePointObservation {
    /// Source table label, e.g. `第6个月随访`.
    pub label: String,
    pub month_offset: u32,
    pub visit_date: Option<NaiveDate>,
    pub lost_to_followup: bool,
    pub loss_reason: Option<String>,
    pub death_date: Option<NaiveDate>,
    pub death_reason: Option<String>,
    /// Categories decoded from the multi-valued event code field.
    pub event_categories: Vec<EventCategory>,
    /// Whether the visit reports any cardiovascular event at all.
    pub cardiovascular_event: bool,
    pub procedures: ProcedureFlags,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub overflow: OverflowFields,
}

impl TimePointObservation {
    pub fn new(label: impl Into<String>, month_offset: u32) -> Self {
        Self {
            label: label.into(),
            month_offset,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_visit_date(mut self, date: Option<NaiveDate>) -> Self {
        self.visit_date = date;
        self
    }

    #[must_use]
    pub fn with_death_date(mut self, date: Option<NaiveDate>) -> Self {
        self.death_date = date;
        self
    }

    #[must_use]
    pub fn with_event_categories(mut self, categories: Vec<EventCategory>) -> Self {
        self.event_categories = categories;
        self
    }

    #[must_use]
    pub fn with_lost_to_followup(mut self, lost: bool) -> Self {
        self.lost_to_followup = lost;
        self
    }

    #[must_use]
    pub fn with_cardiovascular_event(mut self, flag: bool) -> Self {
        self.cardiovascular_event = flag;
        self
    }

    #[must_use]
    pub fn with_procedures(mut self, procedures: ProcedureFlags) -> Self {
        self.procedures = procedures;
        self
    }

    #[must_use]
    pub fn with_overflow(mut self, overflow: OverflowFields) -> Self {
        self.overflow = overflow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_skips_blank_candidates() {
        let overflow = OverflowFields::new(SourceRow::from_pairs([
            ("a", CellValue::text("")),
            ("b", CellValue::Integer(3)),
        ]));
        assert_eq!(overflow.first_of(&["a", "b"]), Some(&CellValue::Integer(3)));
        assert_eq!(overflow.number("b"), Some(3.0));
        assert_eq!(overflow.text("a"), None);
    }
}
