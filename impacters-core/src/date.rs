//! Calendar-date helpers.
//!
//! Every date in the system is a plain `YYYY-MM-DD` calendar date. Nothing here
//! attaches a time of day, so a date can never drift across midnight.

use chrono::{Month, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string. Empty or malformed input is `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Parse a date that the caller requires, with a message naming the bad input.
pub fn parse_required_date(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s.trim()))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format an optional date, unset dates becoming the empty string.
pub fn format_optional_date(date: Option<&NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

/// Month and day for reminder lists, e.g. "May 15".
pub fn format_month_day(date: &NaiveDate) -> String {
    date.format("%B %-d").to_string()
}

/// English month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("")
}

/// The month after `month` (1-based), December wrapping to January.
pub fn following_month(month: u32) -> u32 {
    month % 12 + 1
}

/// Serde adapter storing `Option<NaiveDate>` as `"YYYY-MM-DD"` or `""`.
///
/// Malformed strings deserialize as unset rather than failing the record.
pub mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_optional_date(date.as_ref()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.as_deref().and_then(super::parse_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso() {
        assert_eq!(parse_date("2000-01-01"), NaiveDate::from_ymd_opt(2000, 1, 1));
        assert_eq!(parse_date("  1995-05-30 "), NaiveDate::from_ymd_opt(1995, 5, 30));
    }

    #[test]
    fn parse_date_treats_empty_and_garbage_as_unset() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2023-02-30"), None);
        assert_eq!(parse_date("05/15/1990"), None);
    }

    #[test]
    fn parse_required_date_names_input() {
        let err = parse_required_date("tomorrow").unwrap_err();
        assert!(err.contains("'tomorrow'"));
    }

    #[test]
    fn month_day_format() {
        let date = NaiveDate::from_ymd_opt(1990, 5, 15).unwrap();
        assert_eq!(format_month_day(&date), "May 15");
        let date = NaiveDate::from_ymd_opt(1985, 12, 1).unwrap();
        assert_eq!(format_month_day(&date), "December 1");
    }

    #[test]
    fn following_month_wraps_december() {
        assert_eq!(following_month(1), 2);
        assert_eq!(following_month(11), 12);
        assert_eq!(following_month(12), 1);
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "");
    }
}
