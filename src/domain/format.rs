use chrono::{Local, TimeZone};

/// Format elapsed seconds as "HH:MM:SS" (hours widen past 99)
pub fn format_timer(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Placeholder shown instead of a timer for tasks without time tracking
pub const TIMER_DISABLED: &str = "--:--:--";

/// Format a creation timestamp (ms since epoch) for the row subtitle
pub fn format_created_at(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format("%d %b %Y, %H:%M").to_string(),
        None => String::new(),
    }
}

/// Shorten a title for the edit screen header
/// Titles longer than 18 characters keep their first 15 plus "..."
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > 18 {
        let head: String = title.chars().take(15).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}
