//! Date and code normalization for raw snapshot cells.
//!
//! Nothing here fails: values that can't be read come back as `None` (or are
//! dropped from a list) with a debug-level note.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use tracing::debug;

use followup_model::{CellValue, EventCategory};

/// Text date formats, tried in order.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%Y%m%d",
    "%m/%d/%Y",
];

/// Date-time renderings produced by spreadsheet and CSV exports.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

/// Spreadsheet serial dates count from 1900-01-01 with a two day offset.
const SERIAL_EPOCH: (i32, u32, u32) = (1900, 1, 1);
const SERIAL_OFFSET_DAYS: i64 = 2;

/// Follow-up event codes.
pub const EVENT_CODE_TABLE: [(i64, EventCategory); 6] = [
    (1, EventCategory::Death),
    (2, EventCategory::MyocardialInfarction),
    (3, EventCategory::Revascularization),
    (4, EventCategory::HeartFailure),
    (5, EventCategory::Angina),
    (6, EventCategory::Hospitalization),
];

/// Code meaning "yes" in the follow-up codebook.
pub const AFFIRMATIVE_CODE: f64 = 1.0;

pub fn category_for_code(code: i64) -> Option<EventCategory> {
    EVENT_CODE_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, category)| *category)
}

/// Reads a cell as a calendar date.
pub fn parse_date(value: &CellValue) -> Option<NaiveDate> {
    let parsed = match value {
        CellValue::Missing | CellValue::Bool(_) => return None,
        CellValue::Date(date) => Some(*date),
        CellValue::DateTime(datetime) => Some(datetime.date()),
        CellValue::Integer(number) => compact_date(*number).or_else(|| serial_date(*number as f64)),
        CellValue::Float(number) => serial_date(*number),
        CellValue::Text(text) => parse_date_text(text),
    };
    if parsed.is_none() && value.is_present() {
        debug!(value = ?value, "unparseable date value");
    }
    parsed
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .filter_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .find(|date| date.year() >= 1000)
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|datetime| datetime.date())
        })
}

/// Eight-digit integers such as `20200705`.
fn compact_date(number: i64) -> Option<NaiveDate> {
    if !(10_000_000..=99_991_231).contains(&number) {
        return None;
    }
    let year = i32::try_from(number / 10_000).ok()?;
    let month = u32::try_from((number / 100) % 100).ok()?;
    let day = u32::try_from(number % 100).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn serial_date(number: f64) -> Option<NaiveDate> {
    if !number.is_finite() || number.abs() > 3_000_000.0 {
        return None;
    }
    let (year, month, day) = SERIAL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(year, month, day)?;
    let days = TimeDelta::try_days(number.trunc() as i64 - SERIAL_OFFSET_DAYS)?;
    epoch.checked_add_signed(days)
}

/// Decodes a multi-valued event code field such as `"5,6"`.
///
/// Tokens are separated by ASCII or full-width commas. Unknown tokens are
/// dropped; the remaining ones keep their order.
pub fn parse_event_codes(value: &CellValue) -> Vec<EventCategory> {
    let Some(text) = value.display_text() else {
        return Vec::new();
    };
    text.split([',', '，'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let category = parse_code_text(token).and_then(category_for_code);
            if category.is_none() {
                debug!(token, "unrecognized event code");
            }
            category
        })
        .collect()
}

fn parse_code_text(token: &str) -> Option<i64> {
    let number = token.parse::<f64>().ok()?;
    (number.is_finite() && number.fract() == 0.0).then_some(number as i64)
}

/// Reads a single numeric code.
pub fn parse_code(value: &CellValue) -> Option<f64> {
    value.as_f64()
}

/// True when the cell holds the "yes" code.
pub fn is_affirmative(value: &CellValue) -> bool {
    parse_code(value) == Some(AFFIRMATIVE_CODE)
}

/// Single event category from a code cell, if the code is known.
pub fn parse_single_event_code(value: &CellValue) -> Option<EventCategory> {
    value.as_i64().and_then(category_for_code)
}

/// Lost-to-follow-up marker: anything recorded except a zero/false value.
pub fn parse_lost_flag(value: &CellValue) -> bool {
    match value {
        CellValue::Missing => false,
        CellValue::Bool(flag) => *flag,
        CellValue::Integer(number) => *number != 0,
        CellValue::Float(number) => !number.is_nan() && *number != 0.0,
        CellValue::Text(text) => match text.trim().parse::<f64>() {
            Ok(number) => number != 0.0,
            Err(_) => !text.trim().is_empty(),
        },
        CellValue::Date(_) | CellValue::DateTime(_) => true,
    }
}

/// Gender code `1` is male, any other number female; text is kept.
pub fn decode_gender(value: &CellValue) -> Option<String> {
    if value.is_missing() {
        return None;
    }
    match value.as_f64() {
        Some(code) if code == 1.0 => Some("male".to_string()),
        Some(_) => Some("female".to_string()),
        None => value.display_text(),
    }
}

/// Whole years; fractional ages are truncated.
pub fn parse_age(value: &CellValue) -> Option<i64> {
    value.as_f64().map(|age| age.trunc() as i64)
}

pub fn parse_text(value: &CellValue) -> Option<String> {
    value.display_text()
}
