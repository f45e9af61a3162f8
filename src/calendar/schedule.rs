use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::time_of_day::hhmm;

/// English weekday name, independent of the user's locale.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

pub fn parse_weekday_name(value: &str) -> Option<Weekday> {
    [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ]
    .into_iter()
    .find(|day| weekday_name(*day).eq_ignore_ascii_case(value.trim()))
}

mod weekday_serde {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(super::weekday_name(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_weekday_name(&raw)
            .ok_or_else(|| D::Error::custom(format!("unknown weekday '{}'", raw)))
    }
}

/// One recurring weekly availability window of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(with = "weekday_serde")]
    pub day: Weekday,
    #[serde(rename = "startTime", with = "hhmm")]
    pub start: NaiveTime,
    #[serde(rename = "endTime", with = "hhmm")]
    pub end: NaiveTime,
}

impl ScheduleEntry {
    pub fn new(day: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        Self { day, start, end }
    }
}

/// The weekly schedule of a service. A disabled schedule offers no days even
/// when it still carries entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "ScheduleWire")]
pub struct ServiceSchedule {
    pub enabled: bool,
    #[serde(rename = "schedules")]
    pub entries: Vec<ScheduleEntry>,
}

/// Backend shape. A schedule without an `enabled` flag counts as enabled
/// whenever it lists at least one window.
#[derive(Deserialize)]
struct ScheduleWire {
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(rename = "schedules", default)]
    entries: Vec<ScheduleEntry>,
}

impl From<ScheduleWire> for ServiceSchedule {
    fn from(wire: ScheduleWire) -> Self {
        Self {
            enabled: wire.enabled.unwrap_or(!wire.entries.is_empty()),
            entries: wire.entries,
        }
    }
}

impl ServiceSchedule {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self { enabled: true, entries }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_offered(&self) -> bool {
        self.enabled && !self.entries.is_empty()
    }
}
