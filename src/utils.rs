/// Utility functions
use chrono::{Days, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the default near-earth object window, in days
pub const NEO_WINDOW_DAYS: u64 = 7;

/// Parse a strict `YYYY-MM-DD` calendar date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Window starting at `today` and ending `NEO_WINDOW_DAYS` later
pub fn default_neo_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let end = today
        .checked_add_days(Days::new(NEO_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX);
    (today, end)
}

/// `2024-01-15` -> `2024/01/15`
pub fn date_to_path(date: &str) -> String {
    date.replace('-', "/")
}

/// Parse a non-negative sol (mission day index)
pub fn parse_sol(s: &str) -> Option<u32> {
    let trimmed = s.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Treat empty or whitespace-only query values as absent
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
