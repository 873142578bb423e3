//! Date ranges for the calendar and their validation.
//!
//! A range is valid when its end day is not before its start day. The
//! [`DateRangePicker`] keeps the last valid range and reports each accepted
//! change through its callback.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tasknest::libs::date_range::{validate_date_range, INVALID_RANGE_ERROR};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2026, 10, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! assert!(validate_date_range(day(1), day(31)).is_valid);
//! assert_eq!(validate_date_range(day(31), day(1)).error.as_deref(), Some(INVALID_RANGE_ERROR));
//! ```

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub const INVALID_RANGE_ERROR: &str = "End date cannot be before start date";

/// Outcome of [`validate_date_range`]; `error` is set exactly when invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeValidation {
    pub is_valid: bool,
    pub error: Option<String>,
}

/// Compares calendar days only; the time of day is ignored.
pub fn validate_date_range(start: NaiveDateTime, end: NaiveDateTime) -> DateRangeValidation {
    if end.date() < start.date() {
        DateRangeValidation {
            is_valid: false,
            error: Some(INVALID_RANGE_ERROR.to_string()),
        }
    } else {
        DateRangeValidation {
            is_valid: true,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// First to last day of the month containing `now`.
    pub fn month_of(now: NaiveDateTime) -> Self {
        let first = now.date().with_day(1).unwrap_or(now.date());
        let next_month = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
        };
        let last = next_month.and_then(|d| d.pred_opt()).unwrap_or(first);
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_hms_opt(23, 59, 59).unwrap_or(last.and_time(NaiveTime::MIN)),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// Every day from start to end, inclusive.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start_date()
            .iter_days()
            .take_while(|day| *day <= self.end_date())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DateRangePreset {
    #[value(name = "last7")]
    Last7Days,
    #[value(name = "last30")]
    Last30Days,
}

impl DateRangePreset {
    /// Length of the window in days.
    pub fn days(self) -> i64 {
        match self {
            DateRangePreset::Last7Days => 7,
            DateRangePreset::Last30Days => 30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DateRangePreset::Last7Days => "Last 7 days",
            DateRangePreset::Last30Days => "Last 30 days",
        }
    }

    /// `now - days` to `now`.
    pub fn range(self, now: NaiveDateTime) -> DateRange {
        DateRange::new(now - Duration::days(self.days()), now)
    }
}

/// Holds the selected range; invalid selections keep the previous one and
/// expose the error until the next selection.
pub struct DateRangePicker<F>
where
    F: FnMut(DateRange),
{
    range: DateRange,
    error: Option<String>,
    on_date_range_change: F,
}

impl<F> DateRangePicker<F>
where
    F: FnMut(DateRange),
{
    pub fn new(initial: DateRange, on_date_range_change: F) -> Self {
        Self {
            range: initial,
            error: None,
            on_date_range_change,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns whether the selection was accepted.
    pub fn select(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        let validation = validate_date_range(start, end);
        if !validation.is_valid {
            self.error = validation.error;
            return false;
        }
        self.error = None;
        self.range = DateRange::new(start, end);
        (self.on_date_range_change)(self.range);
        true
    }

    /// Presets are always valid and skip validation.
    pub fn apply_preset(&mut self, preset: DateRangePreset, now: NaiveDateTime) {
        self.error = None;
        self.range = preset.range(now);
        (self.on_date_range_change)(self.range);
    }
}
