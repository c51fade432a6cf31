//! In-memory source tables, one per follow-up snapshot.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// One row of a source table, addressable by column name.
///
/// Column order is kept as delivered; lookups try an exact match first and
/// then an ASCII case-insensitive one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRow {
    cells: Vec<(String, CellValue)>,
}

impl SourceRow {
    pub fn new(cells: Vec<(String, CellValue)>) -> Self {
        Self { cells }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .or_else(|| {
                self.cells
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(column))
            })
            .map(|(_, value)| value)
    }

    /// Returns the cell only when it holds a value.
    pub fn get_present(&self, column: &str) -> Option<&CellValue> {
        self.get(column).filter(|value| value.is_present())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A labelled table of rows (one CSV file or spreadsheet sheet).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceTable {
    pub label: String,
    pub columns: Vec<String>,
    pub rows: Vec<SourceRow>,
}

impl SourceTable {
    pub fn new(label: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            label: label.into(),
            columns,
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rows(mut self, rows: Vec<SourceRow>) -> Self {
        self.rows = rows;
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Ordered collection of source tables.
///
/// Order is significant: it decides the baseline fallback and which table
/// wins when two labels resolve to the same month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSet {
    tables: Vec<SourceTable>,
}

impl TableSet {
    pub fn new(tables: Vec<SourceTable>) -> Self {
        Self { tables }
    }

    pub fn push(&mut self, table: SourceTable) {
        self.tables.push(table);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SourceTable> {
        self.tables.iter()
    }

    pub fn get(&self, label: &str) -> Option<&SourceTable> {
        self.tables.iter().find(|table| table.label == label)
    }

    pub fn first(&self) -> Option<&SourceTable> {
        self.tables.first()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.tables.iter().map(|table| table.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<'a> IntoIterator for &'a TableSet {
    type Item = &'a SourceTable;
    type IntoIter = std::slice::Iter<'a, SourceTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

impl FromIterator<SourceTable> for TableSet {
    fn from_iter<I: IntoIterator<Item = SourceTable>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}
