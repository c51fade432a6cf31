//! Month offsets from snapshot table labels.
//!
//! Labels look like `第6个月随访`, `三个月随访`, `Month 12` or `6M_Sheet`.

use std::sync::LazyLock;

use regex::Regex;

/// Ordinal + month phrasing: `第6个月`, `6个月`, `第三个月`, `十八个月`.
static ORDINAL_MONTH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"第?\s*(\d+|[一二三四五六七八九十]+)\s*个?\s*月")
        .expect("Invalid ordinal month regex")
});

/// English phrasing: `Month 6`, `month_12`.
static ENGLISH_MONTH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)month[\s_-]*(\d+)").expect("Invalid month regex"));

/// Fallback: a number followed by a month unit token, e.g. `6M_Sheet`.
static MONTH_UNIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*[Mm个月]").expect("Invalid month unit regex"));

const SPELLED_DIGITS: [(char, u32); 9] = [
    ('一', 1),
    ('二', 2),
    ('三', 3),
    ('四', 4),
    ('五', 5),
    ('六', 6),
    ('七', 7),
    ('八', 8),
    ('九', 9),
];

/// Month offset encoded in a table label, `None` when the label names no
/// follow-up month.
pub fn parse_month_offset(label: &str) -> Option<u32> {
    for regex in [&*ORDINAL_MONTH_REGEX, &*ENGLISH_MONTH_REGEX] {
        if let Some(month) = regex
            .captures(label)
            .and_then(|caps| caps.get(1))
            .and_then(|m| month_value(m.as_str()))
        {
            return Some(month);
        }
    }
    MONTH_UNIT_REGEX
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn month_value(token: &str) -> Option<u32> {
    token.parse().ok().or_else(|| spelled_number(token))
}

fn spelled_digit(token: &str) -> Option<u32> {
    let mut chars = token.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    SPELLED_DIGITS
        .iter()
        .find(|(digit, _)| *digit == ch)
        .map(|(_, value)| *value)
}

/// Spelled-out numbers below one hundred: 六, 十, 十二, 二十, 二十四.
fn spelled_number(token: &str) -> Option<u32> {
    match token.split_once('十') {
        None => spelled_digit(token),
        Some((tens, ones)) => {
            let tens = if tens.is_empty() { 1 } else { spelled_digit(tens)? };
            let ones = if ones.is_empty() { 0 } else { spelled_digit(ones)? };
            Some(tens * 10 + ones)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_labels() {
        assert_eq!(parse_month_offset("第6个月随访..."), Some(6));
        assert_eq!(parse_month_offset("第1个月随访"), Some(1));
        assert_eq!(parse_month_offset("第三个月随访"), Some(3));
        assert_eq!(parse_month_offset("六个月随访"), Some(6));
        assert_eq!(parse_month_offset("第十二个月随访"), Some(12));
        assert_eq!(parse_month_offset("第120个月随访"), Some(120));
        assert_eq!(parse_month_offset("十八个月随访"), Some(18));
        assert_eq!(parse_month_offset("第二十四个月"), Some(24));
    }

    #[test]
    fn spelled_numbers() {
        assert_eq!(spelled_number("十"), Some(10));
        assert_eq!(spelled_number("三十六"), Some(36));
        assert_eq!(spelled_number("十十"), None);
        assert_eq!(spelled_number("二四"), None);
    }

    #[test]
    fn multi_digit_months_are_not_truncated() {
        assert_eq!(parse_month_offset("36个月随访"), Some(36));
        assert_eq!(parse_month_offset("第60个月"), Some(60));
    }

    #[test]
    fn fallback_labels() {
        assert_eq!(parse_month_offset("6M_Sheet"), Some(6));
        assert_eq!(parse_month_offset("followup_24m"), Some(24));
        assert_eq!(parse_month_offset("Month 18"), Some(18));
    }

    #[test]
    fn unmatched_labels() {
        assert_eq!(parse_month_offset("患者基本信息"), None);
        assert_eq!(parse_month_offset("notes"), None);
        assert_eq!(parse_month_offset("2020年随访"), None);
    }
}
