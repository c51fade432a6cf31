//! CSV snapshot loading into source tables.

use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, info, warn};

use followup_model::{SourceRow, SourceTable, TableSet};

use crate::discovery::{list_csv_files, table_label};
use crate::error::{IngestError, Result};
use crate::polars_utils::any_to_cell;

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reads one CSV snapshot. The table label is the file stem.
pub fn read_csv_table(path: &Path) -> Result<SourceTable> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    if metadata.len() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    dataframe_to_table(&table_label(path), &df)
}

/// Converts a DataFrame into a labelled source table.
pub fn dataframe_to_table(label: &str, df: &DataFrame) -> Result<SourceTable> {
    let columns = df.get_columns();
    let names: Vec<String> = columns
        .iter()
        .map(|column| normalize_header(column.name().as_str()))
        .collect();

    let mut rows = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let mut cells = Vec::with_capacity(columns.len());
        for (name, column) in names.iter().zip(columns) {
            cells.push((name.clone(), any_to_cell(column.get(row_idx)?)));
        }
        rows.push(SourceRow::new(cells));
    }

    Ok(SourceTable::new(label, names).with_rows(rows))
}

/// A snapshot file that could not be loaded.
#[derive(Debug)]
pub struct TableLoadFailure {
    pub path: PathBuf,
    pub error: IngestError,
}

/// Tables loaded from a study folder, plus the files that failed.
#[derive(Debug, Default)]
pub struct TableSetLoad {
    pub tables: TableSet,
    pub failures: Vec<TableLoadFailure>,
}

/// Loads every CSV snapshot in `dir`.
///
/// A missing or unreadable directory is fatal. A single file that fails to
/// parse is logged, reported in `failures` and left out of the set.
pub fn load_table_set(dir: &Path) -> Result<TableSetLoad> {
    let start = Instant::now();
    let files = list_csv_files(dir)?;
    if files.is_empty() {
        return Err(IngestError::NoTables {
            path: dir.to_path_buf(),
        });
    }

    let mut load = TableSetLoad::default();
    for path in files {
        match read_csv_table(&path) {
            Ok(table) => {
                debug!(
                    table = %table.label,
                    rows = table.row_count(),
                    columns = table.columns.len(),
                    "loaded snapshot table"
                );
                load.tables.push(table);
            }
            Err(error) => {
                warn!(path = %path.display(), error = %error, "skipping unreadable snapshot");
                load.failures.push(TableLoadFailure { path, error });
            }
        }
    }

    info!(
        folder = %dir.display(),
        tables = load.tables.len(),
        failures = load.failures.len(),
        duration_ms = start.elapsed().as_millis(),
        "snapshot tables loaded"
    );
    Ok(load)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("\u{feff}subjid"), "subjid");
        assert_eq!(normalize_header("  随访1   目前症状 "), "随访1 目前症状");
    }
}
