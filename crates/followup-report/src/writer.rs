//! CSV and JSON writers for outcome records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use followup_model::{Endpoint, OutcomeRecord};

use crate::columns::{OUTCOME_COLUMNS, SURVIVAL_COLUMNS};
use crate::flat::{FlatRecord, ReportValue, flatten_outcome};

/// Output file format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
    Both,
}

impl OutputFormat {
    pub fn includes_csv(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Both)
    }

    pub fn includes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }
}

/// Patient group tag from a study file or folder name: `pci`, `cag` or
/// `patients`. Propensity-matched (`PSM`) cohorts are angiography cohorts.
pub fn detect_patient_group(name: &str) -> &'static str {
    let upper = name.to_uppercase();
    if upper.contains("PCI") {
        "pci"
    } else if upper.contains("CAG") || upper.contains("PSM") {
        "cag"
    } else {
        "patients"
    }
}

/// Deterministic output paths for one patient group and endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub outcomes_csv: PathBuf,
    pub outcomes_json: PathBuf,
    pub survival_csv: PathBuf,
}

impl OutputPaths {
    pub fn new(output_dir: &Path, group: &str, endpoint: Endpoint) -> Self {
        let stem = format!("{group}_{endpoint}");
        Self {
            outcomes_csv: output_dir.join(format!("followup_outcomes_{stem}.csv")),
            outcomes_json: output_dir.join(format!("followup_outcomes_{stem}.json")),
            survival_csv: output_dir.join(format!("survival_{stem}.csv")),
        }
    }
}

/// Writes the full flat outcome table.
pub fn write_outcomes_csv(path: &Path, records: &[OutcomeRecord]) -> Result<()> {
    let rows = records
        .iter()
        .map(|record| flatten_outcome(record).into_values());
    write_csv(path, &OUTCOME_COLUMNS, rows)
}

/// Writes the outcome rows as a JSON array of objects in column order.
pub fn write_outcomes_json(path: &Path, records: &[OutcomeRecord]) -> Result<()> {
    ensure_parent(path)?;
    let rows: Vec<FlatRecord> = records.iter().map(flatten_outcome).collect();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &rows)
        .with_context(|| format!("write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

/// Writes the reduced survival dataset.
pub fn write_survival_csv(path: &Path, records: &[OutcomeRecord]) -> Result<()> {
    let rows = records
        .iter()
        .map(|record| flatten_outcome(record).project(&SURVIVAL_COLUMNS));
    write_csv(path, &SURVIVAL_COLUMNS, rows)
}

fn write_csv<I>(path: &Path, columns: &[&str], rows: I) -> Result<()>
where
    I: IntoIterator<Item = Vec<ReportValue>>,
{
    ensure_parent(path)?;
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record(columns)
        .with_context(|| format!("write header to {}", path.display()))?;
    for row in rows {
        writer
            .write_record(row.iter().map(ReportValue::csv_field))
            .with_context(|| format!("write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}
