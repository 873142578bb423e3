//! Date formatting shared by tables, prompts and exports.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tasknest::libs::formatter::format_due;
//!
//! let now = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let due = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(15, 0, 0).unwrap();
//! assert_eq!(format_due(&due, &now), "Tomorrow 15:00");
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Relative day names near `now`, weekday and date otherwise.
pub fn format_due(due: &NaiveDateTime, now: &NaiveDateTime) -> String {
    let days = (due.date() - now.date()).num_days();
    let time = due.format("%H:%M");
    match days {
        0 => format!("Today {}", time),
        1 => format!("Tomorrow {}", time),
        -1 => format!("Yesterday {}", time),
        _ if due.year() == now.year() => format!("{} {}", due.format("%a %d %b"), time),
        _ => format!("{} {}", due.format("%a %d %b %Y"), time),
    }
}

pub fn format_day(day: &NaiveDate) -> String {
    day.format("%A, %d %B %Y").to_string()
}

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

pub fn format_optional(value: Option<&NaiveDateTime>) -> String {
    value.map(format_datetime).unwrap_or_default()
}
