//! Fixed column layouts for the exported tables.

/// Columns of the flat outcome table, in output order.
pub const OUTCOME_COLUMNS: [&str; 58] = [
    "patient_id",
    "patient_name",
    "birthday",
    "age",
    "gender",
    "group_name",
    "enrollment_date",
    "latest_followup_date",
    "latest_followup_months",
    "days_to_latest_followup",
    "first_event_type",
    "first_event_date",
    "first_event_time_point",
    "first_event_months",
    "days_to_first_event",
    "first_death_date",
    "first_death_time_point",
    "days_to_first_death",
    "first_mi_date",
    "first_mi_time_point",
    "days_to_first_mi",
    "first_angina_date",
    "first_angina_time_point",
    "days_to_first_angina",
    "first_heart_failure_date",
    "first_heart_failure_time_point",
    "days_to_first_heart_failure",
    "first_revascularization_date",
    "first_revascularization_time_point",
    "days_to_first_revascularization",
    "first_hospitalization_date",
    "first_hospitalization_time_point",
    "days_to_first_hospitalization",
    "has_coronary_ct",
    "first_coronary_ct_date",
    "first_coronary_ct_time_point",
    "has_coronary_angiography",
    "first_coronary_angiography_date",
    "first_coronary_angiography_time_point",
    "has_coronary_intervention",
    "first_coronary_intervention_date",
    "first_coronary_intervention_time_point",
    "has_coronary_bypass",
    "first_coronary_bypass_date",
    "first_coronary_bypass_time_point",
    "has_revascularization_treatment",
    "first_revascularization_treatment_date",
    "first_revascularization_treatment_time_point",
    "first_revascularization_treatment_type",
    "first_revascularization_treatment_detail",
    "has_death",
    "has_cardiovascular_event",
    "has_lost_to_followup",
    "total_followup_status",
    "event_occurred",
    "survival_time_days",
    "endpoint_event",
    "processing_timestamp",
];

/// Columns of the survival dataset; a subset of [`OUTCOME_COLUMNS`].
pub const SURVIVAL_COLUMNS: [&str; 10] = [
    "patient_id",
    "patient_name",
    "birthday",
    "age",
    "gender",
    "group_name",
    "enrollment_date",
    "survival_time_days",
    "event_occurred",
    "endpoint_event",
];

pub fn column_index(column: &str) -> Option<usize> {
    OUTCOME_COLUMNS.iter().position(|name| *name == column)
}
