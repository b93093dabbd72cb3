//! Relative-date helpers for seeding time-windowed rows.
//!
//! Most report SQL compares against `datetime('now', ...)` or
//! `date('now', ...)`, so fixture rows have to be dated relative to the
//! wall clock at seed time. These helpers produce the two textual forms
//! the producers write.

use chrono::{Datelike, Duration, Utc};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp `days` back from now, in the producers' datetime form.
pub fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days))
        .format(DATETIME_FORMAT)
        .to_string()
}

/// Timestamp `hours` back from now.
pub fn hours_ago(hours: i64) -> String {
    (Utc::now() - Duration::hours(hours))
        .format(DATETIME_FORMAT)
        .to_string()
}

/// Date-only form `days` back from now, for columns compared with `date(...)`.
pub fn date_days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days))
        .format(DATE_FORMAT)
        .to_string()
}

/// Date-only form `days` ahead of now, for due dates that must not be overdue.
pub fn date_days_ahead(days: i64) -> String {
    (Utc::now() + Duration::days(days))
        .format(DATE_FORMAT)
        .to_string()
}

/// Today's ISO weekday, Monday = 1 through Sunday = 7.
///
/// Meal plan rows key their slots on this numbering, so fixtures that
/// must land on "today" derive the value the same way the planner does.
pub fn iso_weekday_today() -> u32 {
    Utc::now().weekday().number_from_monday()
}
