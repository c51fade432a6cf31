//! Record assembly: snapshot tables to per-subject timelines.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, info, warn};

use followup_model::{
    Demographics, DroppedTable, LatestFollowup, OverflowFields, ProcedureFlags, ProcessingOptions,
    SkippedSubject, SourceRow, SourceTable, SubjectError, TableSet, TimePointObservation, Timeline,
};

use crate::batch::map_subjects;
use crate::fields::{self, first_present, subject_key};
use crate::normalize::{
    decode_gender, is_affirmative, parse_age, parse_date, parse_event_codes, parse_lost_flag,
    parse_text,
};
use crate::time_point::parse_month_offset;

/// A table indexed by subject key (first matching row wins).
#[derive(Debug)]
pub struct IndexedTable<'a> {
    pub table: &'a SourceTable,
    rows_by_subject: HashMap<String, usize>,
}

impl<'a> IndexedTable<'a> {
    fn new(table: &'a SourceTable) -> Self {
        let mut rows_by_subject = HashMap::new();
        for (idx, row) in table.rows.iter().enumerate() {
            if let Some(key) = subject_key(row) {
                rows_by_subject.entry(key).or_insert(idx);
            }
        }
        Self {
            table,
            rows_by_subject,
        }
    }

    pub fn row(&self, subject_id: &str) -> Option<&'a SourceRow> {
        self.rows_by_subject
            .get(subject_id)
            .map(|idx| &self.table.rows[*idx])
    }

    pub fn label(&self) -> &'a str {
        &self.table.label
    }
}

#[derive(Debug)]
pub struct TimePointTable<'a> {
    pub month_offset: u32,
    pub indexed: IndexedTable<'a>,
}

/// Table roles resolved once per batch.
#[derive(Debug)]
pub struct ResolvedTables<'a> {
    pub baseline: IndexedTable<'a>,
    /// Sorted ascending by month offset, one table per month.
    pub time_points: Vec<TimePointTable<'a>>,
    pub dropped: Vec<DroppedTable>,
}

impl ResolvedTables<'_> {
    /// Unique subject ids of the baseline table, in row order.
    pub fn subject_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.baseline
            .table
            .rows
            .iter()
            .filter_map(subject_key)
            .filter(|key| seen.insert(key.clone()))
            .collect()
    }

    pub fn months(&self) -> Vec<u32> {
        self.time_points.iter().map(|tp| tp.month_offset).collect()
    }
}

/// Picks the baseline table and maps every other label to a month offset.
///
/// Returns `None` for an empty table set. Labels without a month offset are
/// dropped for every subject with one warning each; when two labels give the
/// same month the later table replaces the earlier one.
pub fn resolve_tables<'a>(
    tables: &'a TableSet,
    options: &ProcessingOptions,
) -> Option<ResolvedTables<'a>> {
    let baseline = select_baseline(tables, &options.baseline_markers)?;

    let mut by_month: BTreeMap<u32, &SourceTable> = BTreeMap::new();
    let mut dropped = Vec::new();
    for table in tables {
        let Some(month) = parse_month_offset(&table.label) else {
            if table.label != baseline.label {
                warn!(table = %table.label, "no follow-up month in table label, dropping table");
                dropped.push(DroppedTable {
                    label: table.label.clone(),
                    reason: "no follow-up month in label".to_string(),
                });
            }
            continue;
        };
        if let Some(previous) = by_month.insert(month, table) {
            warn!(
                table = %table.label,
                replaced = %previous.label,
                month,
                "two tables share a follow-up month, keeping the later one"
            );
            dropped.push(DroppedTable {
                label: previous.label.clone(),
                reason: format!("superseded by {} (month {month})", table.label),
            });
        }
    }

    let time_points: Vec<TimePointTable<'a>> = by_month
        .into_iter()
        .map(|(month_offset, table)| TimePointTable {
            month_offset,
            indexed: IndexedTable::new(table),
        })
        .collect();
    info!(
        baseline = %baseline.label,
        time_points = time_points.len(),
        dropped = dropped.len(),
        "resolved snapshot tables"
    );

    Some(ResolvedTables {
        baseline: IndexedTable::new(baseline),
        time_points,
        dropped,
    })
}

fn select_baseline<'a>(tables: &'a TableSet, markers: &[String]) -> Option<&'a SourceTable> {
    let matched = markers.iter().find_map(|marker| {
        tables
            .iter()
            .find(|table| table.label.contains(marker.as_str()))
    });
    match matched {
        Some(table) => Some(table),
        None => {
            let first = tables.first()?;
            warn!(table = %first.label, "no baseline table found, using the first table");
            Some(first)
        }
    }
}

/// Builds one subject's timeline.
pub fn assemble_timeline(
    resolved: &ResolvedTables<'_>,
    subject_id: &str,
) -> Result<Timeline, SubjectError> {
    let baseline_row = resolved.baseline.row(subject_id);
    let demographics = baseline_row.map(decode_demographics).unwrap_or_default();

    let rows: Vec<(&TimePointTable<'_>, &SourceRow)> = resolved
        .time_points
        .iter()
        .filter_map(|tp| tp.indexed.row(subject_id).map(|row| (tp, row)))
        .collect();

    let enrollment_date = baseline_row
        .and_then(|row| first_present(row, fields::ENROLLMENT_DATE))
        .and_then(parse_date)
        .or_else(|| {
            // legacy exports carry the enrollment date on the visit sheets
            rows.iter()
                .find_map(|(_, row)| first_present(row, fields::ENROLLMENT_DATE).and_then(parse_date))
        })
        .ok_or_else(|| SubjectError::MissingEnrollmentDate {
            subject_id: subject_id.to_string(),
        })?;

    let observations: Vec<TimePointObservation> = rows
        .into_iter()
        .map(|(tp, row)| decode_observation(tp.indexed.label(), tp.month_offset, row))
        .collect();

    let latest_followup = observations.iter().rev().find_map(|obs| {
        obs.visit_date.map(|date| LatestFollowup {
            date,
            month_offset: obs.month_offset,
            days_since_enrollment: (date - enrollment_date).num_days(),
        })
    });

    debug!(
        subject_id,
        time_points = observations.len(),
        latest_month = latest_followup.map(|latest| latest.month_offset),
        "assembled timeline"
    );

    Ok(Timeline {
        subject_id: subject_id.to_string(),
        demographics,
        enrollment_date,
        observations,
        latest_followup,
    })
}

fn decode_demographics(row: &SourceRow) -> Demographics {
    let text = |candidates: &[&str]| first_present(row, candidates).and_then(parse_text);
    Demographics {
        name: text(fields::PATIENT_NAME),
        birthday: first_present(row, fields::BIRTHDAY).and_then(parse_date),
        age: first_present(row, fields::AGE).and_then(parse_age),
        gender: first_present(row, fields::GENDER).and_then(decode_gender),
        group: text(fields::GROUP),
    }
}

/// Decodes one source row into a time-point observation.
pub fn decode_observation(label: &str, month_offset: u32, row: &SourceRow) -> TimePointObservation {
    let date = |candidates: &[&str]| first_present(row, candidates).and_then(parse_date);
    let text = |candidates: &[&str]| first_present(row, candidates).and_then(parse_text);
    let flag = |candidates: &[&str]| first_present(row, candidates).is_some_and(is_affirmative);

    TimePointObservation {
        label: label.to_string(),
        month_offset,
        visit_date: date(fields::VISIT_DATE),
        lost_to_followup: first_present(row, fields::LOST_TO_FOLLOWUP).is_some_and(parse_lost_flag),
        loss_reason: text(fields::LOSS_REASON),
        death_date: date(fields::DEATH_DATE),
        death_reason: text(fields::DEATH_REASON),
        event_categories: first_present(row, fields::EVENT_TYPE)
            .map(parse_event_codes)
            .unwrap_or_default(),
        cardiovascular_event: flag(fields::CARDIOVASCULAR_EVENT),
        procedures: ProcedureFlags {
            coronary_intervention: flag(fields::CORONARY_INTERVENTION),
            intervention_date: date(fields::INTERVENTION_DATE),
            coronary_bypass: flag(fields::CORONARY_BYPASS),
            bypass_date: date(fields::BYPASS_DATE),
            revascularization_treatment: flag(fields::REVASCULARIZATION_TREATMENT),
            revascularization_type: text(fields::REVASCULARIZATION_TYPE),
            revascularization_date: date(fields::REVASCULARIZATION_DATE),
            revascularization_detail: text(fields::REVASCULARIZATION_DETAIL),
        },
        symptoms: text(fields::SYMPTOMS),
        diagnosis: text(fields::DIAGNOSIS),
        overflow: OverflowFields::new(row.clone()),
    }
}

/// Timelines for every subject of the baseline table.
#[derive(Debug, Clone, Default)]
pub struct AssembledCohort {
    pub total_subjects: usize,
    pub timelines: Vec<Timeline>,
    pub skipped: Vec<SkippedSubject>,
    pub dropped_tables: Vec<DroppedTable>,
}

/// Resolves the tables and assembles a timeline per subject.
///
/// Subjects without an enrollment date are skipped and reported.
pub fn assemble_cohort(tables: &TableSet, options: &ProcessingOptions) -> AssembledCohort {
    let Some(resolved) = resolve_tables(tables, options) else {
        warn!("no snapshot tables to assemble");
        return AssembledCohort::default();
    };
    let subject_ids = resolved.subject_ids();
    let results = map_subjects(&subject_ids, options.parallel, |subject_id| {
        assemble_timeline(&resolved, subject_id)
    });

    let mut cohort = AssembledCohort {
        total_subjects: subject_ids.len(),
        dropped_tables: resolved.dropped.clone(),
        ..AssembledCohort::default()
    };
    for result in results {
        match result {
            Ok(timeline) => cohort.timelines.push(timeline),
            Err(error) => {
                warn!(subject_id = %error.subject_id(), reason = %error, "subject skipped");
                cohort.skipped.push(SkippedSubject {
                    subject_id: error.subject_id().to_string(),
                    reason: error.to_string(),
                });
            }
        }
    }
    cohort
}
