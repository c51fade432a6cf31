//! Raw cell values as delivered by a table provider.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One cell of a source table.
///
/// Providers keep whatever type they could infer; the normalizer decides how
/// to read it. Blank text and NaN floats are treated as missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    #[default]
    Missing,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Builds a text cell, mapping blank input to `Missing`.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim().trim_matches('\u{feff}');
        if trimmed.is_empty() {
            CellValue::Missing
        } else if trimmed.len() == value.len() {
            CellValue::Text(value)
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(value) => value.trim().is_empty(),
            CellValue::Float(value) => value.is_nan(),
            _ => false,
        }
    }

    pub fn is_present(&self) -> bool {
        !self.is_missing()
    }

    /// Renders the cell as display text, `None` when missing.
    pub fn display_text(&self) -> Option<String> {
        if self.is_missing() {
            return None;
        }
        let text = match self {
            CellValue::Missing => return None,
            CellValue::Text(value) => value.trim().to_string(),
            CellValue::Integer(value) => value.to_string(),
            CellValue::Float(value) => format_numeric(*value),
            CellValue::Bool(value) => value.to_string(),
            CellValue::Date(value) => value.format("%Y-%m-%d").to_string(),
            CellValue::DateTime(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        Some(text)
    }

    /// Reads the cell as a number. Text is parsed after trimming.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(value) => Some(*value as f64),
            CellValue::Float(value) if value.is_finite() => Some(*value),
            CellValue::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            CellValue::Text(value) => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|parsed| parsed.is_finite()),
            _ => None,
        }
    }

    /// Reads the cell as a whole number; fractional values are rejected.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(value) => Some(*value),
            _ => {
                let value = self.as_f64()?;
                if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
                    Some(value as i64)
                } else {
                    None
                }
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Missing, Into::into)
    }
}

/// Formats a floating-point number without trailing zeros.
pub fn format_numeric(value: f64) -> String {
    let text = format!("{value}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_missing() {
        assert_eq!(CellValue::text("   "), CellValue::Missing);
        assert!(CellValue::Text("  ".to_string()).is_missing());
        assert!(CellValue::Float(f64::NAN).is_missing());
        assert!(CellValue::Integer(0).is_present());
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(CellValue::text(" 1001 "), CellValue::Text("1001".to_string()));
    }

    #[test]
    fn numbers_render_without_trailing_zeros() {
        assert_eq!(CellValue::Float(5.0).display_text().as_deref(), Some("5"));
        assert_eq!(CellValue::Float(2.50).display_text().as_deref(), Some("2.5"));
        assert_eq!(CellValue::Integer(10).display_text().as_deref(), Some("10"));
        assert_eq!(format_numeric(100.0), "100");
    }

    #[test]
    fn numeric_reads() {
        assert_eq!(CellValue::text("1.0").as_f64(), Some(1.0));
        assert_eq!(CellValue::text("1.0").as_i64(), Some(1));
        assert_eq!(CellValue::text("1.5").as_i64(), None);
        assert_eq!(CellValue::text("yes").as_f64(), None);
        assert_eq!(CellValue::Missing.as_f64(), None);
    }
}
