use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calendar::time_of_day::hhmm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[serde(alias = "Pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "Confirmed", alias = "CONFIRMED")]
    Confirmed,
    #[serde(alias = "Completed", alias = "COMPLETED")]
    Completed,
    #[serde(alias = "Cancelled", alias = "CANCELLED")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSummary {
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub status: BookingStatus,
}

impl BookingSummary {
    pub fn new(time: NaiveTime, status: BookingStatus) -> Self {
        Self { time, status }
    }
}

/// Bookings of one provider keyed by local calendar date (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct BookingsByDate(HashMap<String, Vec<BookingSummary>>);

impl BookingsByDate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key derived from the calendar date itself, never from a UTC instant,
    /// so a booking late in the evening does not land on the next day.
    pub fn date_key(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    pub fn insert(&mut self, date: NaiveDate, booking: BookingSummary) {
        self.0.entry(Self::date_key(date)).or_default().push(booking);
    }

    pub fn for_date(&self, date: NaiveDate) -> &[BookingSummary] {
        self.0
            .get(&Self::date_key(date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
