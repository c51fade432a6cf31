//! Batch-level processing report.

use serde::{Deserialize, Serialize};

/// A subject left out of the output, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSubject {
    pub subject_id: String,
    pub reason: String,
}

/// A source table that contributed no data to any subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedTable {
    pub label: String,
    pub reason: String,
}

/// Outcome counts for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total_subjects: usize,
    pub succeeded: usize,
    pub skipped: Vec<SkippedSubject>,
    pub dropped_tables: Vec<DroppedTable>,
}

impl BatchReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Every enumerated subject is either in the output or skipped.
    pub fn is_consistent(&self) -> bool {
        self.succeeded + self.skipped.len() == self.total_subjects
    }
}
