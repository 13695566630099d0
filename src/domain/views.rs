use super::thought::{Timestamp, TimestampedThought};
use chrono::{DateTime, Local, TimeZone};

/// Entries whose text contains `term`, ignoring case, in original order
pub fn filter_history<'a>(entries: &'a [TimestampedThought], term: &str) -> Vec<&'a TimestampedThought> {
    if term.is_empty() {
        return entries.iter().collect();
    }
    let needle = term.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.text().to_lowercase().contains(&needle))
        .collect()
}

/// Local wall-clock rendering of a timestamp
pub fn local_time(ts: Timestamp) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(ts).single()
}

/// "2024-03-01 14:05" style label
pub fn format_timestamp(ts: Timestamp) -> String {
    match local_time(ts) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => String::from("?"),
    }
}

/// Short relative age like "just now", "5m ago", "3h ago", "2d ago"
pub fn format_age(ts: Timestamp, now: Timestamp) -> String {
    let secs = now.saturating_sub(ts).max(0) / 1000;
    if secs < 60 {
        String::from("just now")
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

/// Countdown like "4:59" from milliseconds
pub fn format_countdown(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}
