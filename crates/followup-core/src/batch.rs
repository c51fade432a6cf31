//! Per-subject batch processing with failure isolation.
//!
//! Subjects are independent once the tables are indexed, so assembly and
//! evaluation can fan out across a rayon pool. Results keep the subject order
//! of the baseline table either way.

use std::time::Instant;

use chrono::NaiveDateTime;
use rayon::prelude::*;
use tracing::{info, info_span};

use followup_model::{BatchReport, OutcomeRecord, ProcessingOptions, TableSet, Timeline};

use crate::assemble::assemble_cohort;
use crate::processor::{EvaluationContext, evaluate_timeline};

/// Records of a batch run plus its report.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub records: Vec<OutcomeRecord>,
    pub report: BatchReport,
}

impl BatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub(crate) fn map_subjects<T, F>(subject_ids: &[String], parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&str) -> T + Sync + Send,
{
    if parallel {
        subject_ids.par_iter().map(|id| f(id)).collect()
    } else {
        subject_ids.iter().map(|id| f(id)).collect()
    }
}

/// Runs the whole engine over a table set.
///
/// A subject that cannot be assembled is skipped and listed in the report;
/// it never aborts the batch.
pub fn process_tables(
    tables: &TableSet,
    options: &ProcessingOptions,
    processed_at: NaiveDateTime,
) -> BatchOutcome {
    let span = info_span!(
        "process_tables",
        endpoint = %options.endpoint,
        tables = tables.len()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let cohort = assemble_cohort(tables, options);
    let context = EvaluationContext::new(options.endpoint, processed_at);
    let records = process_timelines(&cohort.timelines, &context, options.parallel);

    let report = BatchReport {
        total_subjects: cohort.total_subjects,
        succeeded: records.len(),
        skipped: cohort.skipped,
        dropped_tables: cohort.dropped_tables,
    };
    info!(
        total_subjects = report.total_subjects,
        succeeded = report.succeeded,
        skipped = report.skipped_count(),
        dropped_tables = report.dropped_tables.len(),
        duration_ms = start.elapsed().as_millis(),
        "batch complete"
    );
    BatchOutcome { records, report }
}

/// Evaluates already assembled timelines.
pub fn process_timelines(
    timelines: &[Timeline],
    context: &EvaluationContext,
    parallel: bool,
) -> Vec<OutcomeRecord> {
    if parallel {
        timelines
            .par_iter()
            .map(|timeline| evaluate_timeline(timeline, context))
            .collect()
    } else {
        timelines
            .iter()
            .map(|timeline| evaluate_timeline(timeline, context))
            .collect()
    }
}
