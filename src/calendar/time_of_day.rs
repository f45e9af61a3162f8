use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// How times are rendered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

/// Parses `HH:MM` or `HH:MM:SS`.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Canonical `HH:MM` form used for keys and the wire.
pub fn time_key(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn format_time(time: NaiveTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::TwentyFourHour => time_key(time),
        TimeFormat::TwelveHour => {
            let (is_pm, hour) = time.hour12();
            format!("{}:{:02} {}", hour, time.minute(), if is_pm { "PM" } else { "AM" })
        }
    }
}

/// Serde adapter for `NaiveTime` fields carried as `"HH:MM"` strings.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::time_key(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid time of day '{}'", raw)))
    }
}
