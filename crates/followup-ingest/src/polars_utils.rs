//! Polars `AnyValue` conversion into engine cells.

use polars::prelude::AnyValue;

use followup_model::CellValue;

/// Converts a Polars AnyValue to a cell.
///
/// Nulls and blank strings become `Missing`; integers and floats keep their
/// numeric type so codes and spreadsheet serial dates survive the trip.
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::Boolean(b) => CellValue::Bool(b),
        AnyValue::Int8(v) => CellValue::Integer(i64::from(v)),
        AnyValue::Int16(v) => CellValue::Integer(i64::from(v)),
        AnyValue::Int32(v) => CellValue::Integer(i64::from(v)),
        AnyValue::Int64(v) => CellValue::Integer(v),
        AnyValue::UInt8(v) => CellValue::Integer(i64::from(v)),
        AnyValue::UInt16(v) => CellValue::Integer(i64::from(v)),
        AnyValue::UInt32(v) => CellValue::Integer(i64::from(v)),
        AnyValue::UInt64(v) => match i64::try_from(v) {
            Ok(v) => CellValue::Integer(v),
            Err(_) => CellValue::Float(v as f64),
        },
        AnyValue::Float32(v) => CellValue::Float(f64::from(v)),
        AnyValue::Float64(v) => CellValue::Float(v),
        AnyValue::String(s) => CellValue::text(s),
        AnyValue::StringOwned(s) => CellValue::text(s.as_str()),
        other => CellValue::text(other.to_string()),
    }
}
