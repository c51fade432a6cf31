pub mod cell;
pub mod endpoint;
pub mod error;
pub mod event;
pub mod observation;
pub mod occurrence;
pub mod options;
pub mod outcome;
pub mod processing;
pub mod status;
pub mod table;
pub mod timeline;

pub use cell::{CellValue, format_numeric};
pub use endpoint::{Endpoint, EndpointOutcome};
pub use error::{ModelError, Result, SubjectError};
pub use event::{EventCategory, TimedEvent};
pub use observation::{OverflowFields, ProcedureFlags, TimePointObservation};
pub use occurrence::{
    FirstEvent, FirstOccurrenceMap, Occurrence, ProcedureKind, ProcedureRecord, ProcedureTracking,
};
pub use options::ProcessingOptions;
pub use outcome::OutcomeRecord;
pub use processing::{BatchReport, DroppedTable, SkippedSubject};
pub use status::FollowupStatus;
pub use table::{SourceRow, SourceTable, TableSet};
pub use timeline::{Demographics, LatestFollowup, Timeline};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_report_counts() {
        let report = BatchReport {
            total_subjects: 3,
            succeeded: 2,
            skipped: vec![SkippedSubject {
                subject_id: "1003".to_string(),
                reason: "subject 1003 has no enrollment date".to_string(),
            }],
            dropped_tables: vec![DroppedTable {
                label: "notes".to_string(),
                reason: "no month offset in label".to_string(),
            }],
        };
        assert_eq!(report.skipped_count(), 1);
        assert!(report.has_skipped());
        assert!(report.is_consistent());
    }

    #[test]
    fn options_serialize() {
        let options = ProcessingOptions::default().with_endpoint(Endpoint::Angina);
        let json = serde_json::to_string(&options).expect("serialize options");
        let round: ProcessingOptions = serde_json::from_str(&json).expect("deserialize options");
        assert_eq!(round.endpoint, Endpoint::Angina);
        assert_eq!(round.baseline_markers, options.baseline_markers);
    }
}
