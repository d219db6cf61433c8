//! Ledger timestamp helpers: `YYYY-MM-DD DOW HH:MM:SS.ss`.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Format a capture time the way the ledger stores it, e.g.
/// `2025-01-01 WED 10:00:00.00`.
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    let weekday = dt.weekday().to_string().to_uppercase();
    // leap-second nanos can exceed 1e9
    let hundredths = (dt.nanosecond() / 10_000_000).min(99);
    format!(
        "{} {} {}.{:02}",
        dt.format("%Y-%m-%d"),
        weekday,
        dt.format("%H:%M:%S"),
        hundredths
    )
}

/// Parse a ledger timestamp back. The weekday token is checked against the date.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let mut parts = s.trim().splitn(3, ' ');
    let date = parts.next()?;
    let dow = parts.next()?;
    let time = parts.next()?;

    let dt = NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S%.f")
        .ok()?;
    if !dt.weekday().to_string().eq_ignore_ascii_case(dow) {
        return None;
    }
    Some(dt)
}
