use chrono::{Datelike, NaiveDate};

use crate::calendar::schedule::{ScheduleEntry, ServiceSchedule};

/// True when the weekly schedule offers the weekday of `date`.
///
/// A disabled or empty schedule offers nothing. Not finding a match is an
/// ordinary negative answer.
pub fn is_available(date: NaiveDate, schedule: &ServiceSchedule) -> bool {
    entry_for_date(date, schedule).is_some()
}

/// The window that applies on `date`. With several entries for the same
/// weekday the first one listed wins.
pub fn entry_for_date(date: NaiveDate, schedule: &ServiceSchedule) -> Option<&ScheduleEntry> {
    if !schedule.is_offered() {
        return None;
    }

    let weekday = date.weekday();
    schedule.entries.iter().find(|entry| entry.day == weekday)
}
