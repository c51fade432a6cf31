//! Column synonyms for each logical field.
//!
//! The follow-up workbooks went through several naming schemes. Each logical
//! field lists the column names it may appear under, most specific first;
//! [`first_present`] picks the first one holding a value.

use followup_model::{CellValue, SourceRow};

pub const SUBJECT_ID: &[&str] = &["subjid", "patient_id"];
pub const PATIENT_NAME: &[&str] = &["stname", "patient_name", "姓名"];
pub const BIRTHDAY: &[&str] = &[
    "sys_dateofbirth",
    "dateofbirth",
    "birthday",
    "birth_date",
    "出生日期",
];
pub const AGE: &[&str] = &["sys_currentage", "age"];
pub const GENDER: &[&str] = &["stsex", "gender", "sex"];
pub const GROUP: &[&str] = &["groupname", "group_name"];
pub const ENROLLMENT_DATE: &[&str] = &["groupdate", "enrollment_date"];

pub const VISIT_DATE: &[&str] = &["随访日期1", "visit_date"];
pub const DEATH_DATE: &[&str] = &["死亡时间1", "death_date"];
pub const DEATH_REASON: &[&str] = &["死亡原因1", "death_reason"];
pub const LOST_TO_FOLLOWUP: &[&str] = &["随访缺失1", "loss_to_followup"];
pub const LOSS_REASON: &[&str] = &["失访原因1", "loss_reason"];
pub const CARDIOVASCULAR_EVENT: &[&str] = &[
    "随访期间心血管不良事件1",
    "随访期间主要心血管不良事件1",
    "cardiovascular_event",
];
pub const EVENT_TYPE: &[&str] = &["如有不良事件，何事件1", "心血管事件1", "event_type"];
/// Older exports carry one specific event code next to the generic flag.
pub const SPECIFIC_EVENT: &[&str] = &[
    "如有不良事件，何事件1",
    "如有不良事件，何事件",
    "adverse_event_type",
];
pub const CORONARY_INTERVENTION: &[&str] = &["冠脉造影,冠脉CT或介入治疗1", "coronary_intervention"];
pub const INTERVENTION_DATE: &[&str] = &["冠脉造影,冠脉CT或介入治疗时间1", "intervention_date"];
pub const CORONARY_BYPASS: &[&str] = &["后续冠脉搭桥1", "coronary_bypass"];
pub const BYPASS_DATE: &[&str] = &["冠脉搭桥日期1", "bypass_date"];
pub const REVASCULARIZATION_TREATMENT: &[&str] = &[
    "自最近一次联系后进行血运重建治疗1",
    "revascularization_treatment",
];
pub const REVASCULARIZATION_TYPE: &[&str] = &["如是，何治疗1", "revascularization_type"];
pub const REVASCULARIZATION_DATE: &[&str] = &["治疗时间1", "revascularization_date"];
pub const REVASCULARIZATION_DETAIL: &[&str] = &["治疗详细说明", "revascularization_detail"];
pub const SYMPTOMS: &[&str] = &["随访1 目前症状", "symptoms"];
pub const DIAGNOSIS: &[&str] = &["随访1 目前诊断", "diagnosis"];

/// First candidate column with a non-missing value.
pub fn first_present<'a>(row: &'a SourceRow, candidates: &[&str]) -> Option<&'a CellValue> {
    candidates
        .iter()
        .find_map(|column| row.get_present(column))
}

/// Stable subject key for a row, e.g. `1001` for both `1001` and `1001.0`.
pub fn subject_key(row: &SourceRow) -> Option<String> {
    first_present(row, SUBJECT_ID).and_then(CellValue::display_text)
}
