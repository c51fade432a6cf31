//! Flattening of outcome records into fixed-layout rows.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use followup_model::{EventCategory, OutcomeRecord, ProcedureKind};

use crate::columns::{OUTCOME_COLUMNS, column_index};

/// Per-category column groups, in column order.
const CATEGORY_GROUPS: [EventCategory; 6] = [
    EventCategory::Death,
    EventCategory::MyocardialInfarction,
    EventCategory::Angina,
    EventCategory::HeartFailure,
    EventCategory::Revascularization,
    EventCategory::Hospitalization,
];

/// One output cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReportValue {
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl ReportValue {
    /// CSV rendering: empty for null.
    pub fn csv_field(&self) -> String {
        match self {
            ReportValue::Null => String::new(),
            ReportValue::Bool(value) => value.to_string(),
            ReportValue::Integer(value) => value.to_string(),
            ReportValue::Text(value) => value.clone(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ReportValue::Null)
    }
}

impl From<bool> for ReportValue {
    fn from(value: bool) -> Self {
        ReportValue::Bool(value)
    }
}

impl From<i64> for ReportValue {
    fn from(value: i64) -> Self {
        ReportValue::Integer(value)
    }
}

impl From<u32> for ReportValue {
    fn from(value: u32) -> Self {
        ReportValue::Integer(i64::from(value))
    }
}

impl From<&str> for ReportValue {
    fn from(value: &str) -> Self {
        ReportValue::Text(value.to_string())
    }
}

impl From<String> for ReportValue {
    fn from(value: String) -> Self {
        ReportValue::Text(value)
    }
}

impl From<NaiveDate> for ReportValue {
    fn from(value: NaiveDate) -> Self {
        ReportValue::Text(value.format("%Y-%m-%d").to_string())
    }
}

impl From<NaiveDateTime> for ReportValue {
    fn from(value: NaiveDateTime) -> Self {
        ReportValue::Text(value.format("%Y-%m-%dT%H:%M:%S").to_string())
    }
}

impl<T: Into<ReportValue>> From<Option<T>> for ReportValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ReportValue::Null, Into::into)
    }
}

/// A flattened outcome: one value per entry of [`OUTCOME_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRecord {
    values: Vec<ReportValue>,
}

impl FlatRecord {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, value: impl Into<ReportValue>) {
        self.values.push(value.into());
    }

    pub fn get(&self, column: &str) -> Option<&ReportValue> {
        column_index(column).and_then(|idx| self.values.get(idx))
    }

    pub fn values(&self) -> &[ReportValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<ReportValue> {
        self.values
    }

    /// Values for `columns`, null for unknown names.
    pub fn project(&self, columns: &[&str]) -> Vec<ReportValue> {
        columns
            .iter()
            .map(|column| self.get(column).cloned().unwrap_or(ReportValue::Null))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ReportValue)> {
        OUTCOME_COLUMNS.iter().copied().zip(self.values.iter())
    }
}

impl Serialize for FlatRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Flattens a record into the fixed column layout.
pub fn flatten_outcome(record: &OutcomeRecord) -> FlatRecord {
    let mut row = FlatRecord::with_capacity(OUTCOME_COLUMNS.len());
    let demographics = &record.demographics;

    row.push(record.subject_id.as_str());
    row.push(demographics.name.clone());
    row.push(demographics.birthday);
    row.push(demographics.age);
    row.push(demographics.gender.clone());
    row.push(demographics.group.clone());
    row.push(record.enrollment_date);

    let latest = record.latest_followup;
    row.push(latest.map(|latest| latest.date));
    row.push(latest.map(|latest| latest.month_offset));
    row.push(latest.map(|latest| latest.days_since_enrollment));

    let first = record.first_event();
    row.push(first.map(|first| first.category.as_str()));
    row.push(first.map(|first| first.occurrence.date));
    row.push(first.map(|first| first.occurrence.time_point.clone()));
    row.push(first.map(|first| first.occurrence.month_offset));
    row.push(first.map(|first| first.occurrence.days_since_enrollment));

    for category in CATEGORY_GROUPS {
        let occurrence = record.occurrences.get(category);
        row.push(occurrence.map(|occ| occ.date));
        row.push(occurrence.map(|occ| occ.time_point.clone()));
        row.push(occurrence.map(|occ| occ.days_since_enrollment));
    }

    for kind in ProcedureKind::ALL {
        let procedure = record.procedures.get(kind);
        row.push(procedure.is_some());
        row.push(procedure.map(|p| p.date));
        row.push(procedure.map(|p| p.time_point.clone()));
        if kind == ProcedureKind::RevascularizationTreatment {
            row.push(procedure.and_then(|p| p.treatment_type.clone()));
            row.push(procedure.and_then(|p| p.detail.clone()));
        }
    }

    row.push(record.has_death);
    row.push(record.has_cardiovascular_event);
    row.push(record.has_lost_to_followup);
    row.push(record.status.as_str());

    row.push(record.endpoint.event_occurred);
    row.push(record.endpoint.survival_time_days);
    row.push(record.endpoint.endpoint_event());
    row.push(record.processed_at);
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_values_become_null() {
        assert_eq!(ReportValue::from(None::<NaiveDate>), ReportValue::Null);
        assert_eq!(
            ReportValue::from(NaiveDate::from_ymd_opt(2020, 7, 5)),
            ReportValue::Text("2020-07-05".to_string())
        );
        assert_eq!(ReportValue::Null.csv_field(), "");
        assert_eq!(ReportValue::Bool(true).csv_field(), "true");
    }

    #[test]
    fn category_groups_match_column_layout() {
        let prefixes = ["death", "mi", "angina", "heart_failure", "revascularization", "hospitalization"];
        let first = column_index("first_death_date").unwrap();
        for (offset, prefix) in prefixes.iter().enumerate() {
            assert_eq!(
                OUTCOME_COLUMNS[first + offset * 3],
                format!("first_{prefix}_date")
            );
            assert_eq!(
                OUTCOME_COLUMNS[first + offset * 3 + 2],
                format!("days_to_first_{prefix}")
            );
        }
        assert_eq!(prefixes.len(), CATEGORY_GROUPS.len());
    }
}
