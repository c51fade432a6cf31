//! Stages of the `process` and `compare` commands.
//!
//! Each stage opens its own span and logs its duration; the commands module
//! only wires them together.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, info_span, warn};

use followup_core::{BatchOutcome, process_tables};
use followup_ingest::{TableSetLoad, load_table_set};
use followup_model::{Endpoint, OutcomeRecord, ProcessingOptions};
use followup_report::{
    OutputFormat, OutputPaths, write_outcomes_csv, write_outcomes_json, write_survival_csv,
};

/// Loads every CSV table of `input_folder`.
pub fn ingest(input_folder: &Path) -> Result<TableSetLoad> {
    let span = info_span!("ingest", input_folder = %input_folder.display());
    let _guard = span.enter();
    load_table_set(input_folder)
        .with_context(|| format!("load tables from {}", input_folder.display()))
}

/// Runs the engine, stamping every record with the current local time.
pub fn process(load: &TableSetLoad, options: &ProcessingOptions) -> BatchOutcome {
    process_tables(&load.tables, options, Local::now().naive_local())
}

/// Where and what to write.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    /// Patient group tag used in file names (`pci`, `cag`, `patients`).
    pub group: String,
    pub format: OutputFormat,
    pub survival_dataset: bool,
}

/// Files written by [`output`].
#[derive(Debug, Clone, Default)]
pub struct WrittenOutputs {
    pub outcomes_csv: Option<PathBuf>,
    pub outcomes_json: Option<PathBuf>,
    pub survival_csv: Option<PathBuf>,
    /// Non-fatal write failures.
    pub warnings: Vec<String>,
}

impl WrittenOutputs {
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        [&self.outcomes_csv, &self.outcomes_json, &self.survival_csv]
            .into_iter()
            .flatten()
    }
}

/// Writes the outcome files for `endpoint`.
///
/// The outcome table is required; a failed survival dataset is only a warning.
pub fn output(
    records: &[OutcomeRecord],
    endpoint: Endpoint,
    config: &OutputConfig,
) -> Result<WrittenOutputs> {
    let span = info_span!(
        "output",
        output_dir = %config.output_dir.display(),
        group = %config.group
    );
    let _guard = span.enter();
    let start = Instant::now();

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("create {}", config.output_dir.display()))?;
    let paths = OutputPaths::new(&config.output_dir, &config.group, endpoint);
    let mut written = WrittenOutputs::default();

    if config.format.includes_csv() {
        write_outcomes_csv(&paths.outcomes_csv, records)?;
        written.outcomes_csv = Some(paths.outcomes_csv);
    }
    if config.format.includes_json() {
        write_outcomes_json(&paths.outcomes_json, records)?;
        written.outcomes_json = Some(paths.outcomes_json);
    }
    if config.survival_dataset {
        match write_survival_csv(&paths.survival_csv, records) {
            Ok(()) => written.survival_csv = Some(paths.survival_csv),
            Err(error) => {
                warn!(error = %format!("{error:#}"), "survival dataset not written");
                written
                    .warnings
                    .push(format!("survival dataset not written: {error:#}"));
            }
        }
    }

    info!(
        records = records.len(),
        files = written.paths().count(),
        duration_ms = start.elapsed().as_millis(),
        "output complete"
    );
    Ok(written)
}
