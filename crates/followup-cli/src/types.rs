use std::collections::BTreeMap;
use std::path::PathBuf;

use followup_core::{BatchOutcome, EndpointSummary, EventDistribution};
use followup_model::{Endpoint, EventCategory, FollowupStatus};

use followup_cli::pipeline::WrittenOutputs;

#[derive(Debug)]
pub struct ProcessResult {
    pub input_folder: PathBuf,
    pub output_dir: PathBuf,
    pub endpoint: Endpoint,
    /// Patient group tag used in output file names.
    pub group: String,
    pub tables_loaded: usize,
    /// (file, error) for every table that failed to load.
    pub load_failures: Vec<(String, String)>,
    pub outcome: BatchOutcome,
    pub status_counts: BTreeMap<FollowupStatus, usize>,
    pub distribution: EventDistribution,
    /// Subjects reaching each clinical category.
    pub breakdown: Vec<(EventCategory, usize)>,
    /// None on a dry run.
    pub outputs: Option<WrittenOutputs>,
}

#[derive(Debug)]
pub struct CompareResult {
    pub input_folder: PathBuf,
    pub subjects: usize,
    pub skipped: usize,
    pub summaries: Vec<EndpointSummary>,
}
