//! # Date Handling Utilities
//!
//! Parsing of user-entered dates and the display formats used by the
//! timesheet views.

use chrono::{Datelike, NaiveDate};

/// Accepted input formats for user-entered dates, tried in order.
const INPUT_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parses a user-entered date.
///
/// Supports YYYY-MM-DD, YYYY/MM/DD and MM/DD/YYYY. Surrounding whitespace is ignored.
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use visadesk_util::date_handling::parse_input_date;
///
/// assert_eq!(parse_input_date("2024-01-15"), NaiveDate::from_ymd_opt(2024, 1, 15));
/// assert_eq!(parse_input_date("01/15/2024"), NaiveDate::from_ymd_opt(2024, 1, 15));
/// assert_eq!(parse_input_date("2024-13-45"), None);
/// ```
pub fn parse_input_date(date_string: &str) -> Option<NaiveDate> {
    let trimmed = date_string.trim();
    if trimmed.is_empty() {
        return None;
    }
    INPUT_FORMATS
        .iter()
        .find_map(|format_string| NaiveDate::parse_from_str(trimmed, format_string).ok())
}

/// Formats a date as MM/DD/YYYY.
pub fn format_date_mmddyyyy(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{}", date.month(), date.day(), date.year())
}

/// Formats a week as "Jan 15 – Jan 21, 2024", repeating the year only when
/// the range crosses a year boundary.
pub fn format_week_range(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() {
        format!("{} – {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
    } else {
        format!("{} – {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_input_parsing() {
        assert_eq!(parse_input_date("2023-12-25"), Some(date(2023, 12, 25)));
        assert_eq!(parse_input_date(" 2023/06/15 "), Some(date(2023, 6, 15)));
        assert_eq!(parse_input_date("06/15/2023"), Some(date(2023, 6, 15)));
        assert_eq!(parse_input_date("invalid"), None);
        assert_eq!(parse_input_date(""), None);
        assert_eq!(parse_input_date("   "), None);
    }

    #[test]
    fn test_date_formatting() {
        assert_eq!(format_date_mmddyyyy(date(2023, 6, 5)), "06/05/2023");
    }

    #[test]
    fn test_week_range() {
        assert_eq!(format_week_range(date(2024, 1, 15), date(2024, 1, 21)), "Jan 15 – Jan 21, 2024");
        assert_eq!(
            format_week_range(date(2024, 12, 30), date(2025, 1, 5)),
            "Dec 30, 2024 – Jan 5, 2025"
        );
    }
}
