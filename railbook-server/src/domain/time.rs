//! Wall-clock times for timetables.
//!
//! Timetables carry times as "HH:MM" strings with a separate 1-indexed
//! day-of-journey, so a plain time of day is enough here; day rollover
//! is handled by the resolver using the day offsets.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A wall-clock time of day, minute precision.
///
/// # Examples
///
/// ```
/// use railbook_server::domain::TimeOfDay;
///
/// let t = TimeOfDay::parse_hhmm("16:25").unwrap();
/// assert_eq!(t.to_string(), "16:25");
/// assert_eq!(t.minutes_from_midnight(), 16 * 60 + 25);
///
/// assert!(TimeOfDay::parse_hhmm("25:00").is_err());
/// assert!(TimeOfDay::parse_hhmm("1625").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Parse a time from "HH:MM" format.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDay({:02}:{:02})", self.hour, self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TimeOfDay::parse_hhmm(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Option<TimeOfDay>` stored as a string.
///
/// Timetable records use the empty string for "no arrival" (first stop)
/// and "no departure" (last stop); this maps that convention onto an
/// explicit `Option`.
pub mod hhmm_opt {
    use super::TimeOfDay;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<TimeOfDay>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => serializer.serialize_str(&t.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<TimeOfDay>, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(None);
        }
        TimeOfDay::parse_hhmm(&s)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        assert!(TimeOfDay::parse_hhmm("00:00").is_ok());
        assert!(TimeOfDay::parse_hhmm("23:59").is_ok());
        assert!(TimeOfDay::parse_hhmm("16:25").is_ok());
    }

    #[test]
    fn reject_invalid_format() {
        assert!(TimeOfDay::parse_hhmm("").is_err());
        assert!(TimeOfDay::parse_hhmm("1625").is_err());
        assert!(TimeOfDay::parse_hhmm("16:2").is_err());
        assert!(TimeOfDay::parse_hhmm("16.25").is_err());
        assert!(TimeOfDay::parse_hhmm("aa:bb").is_err());
    }

    #[test]
    fn reject_out_of_range() {
        assert!(TimeOfDay::parse_hhmm("24:00").is_err());
        assert!(TimeOfDay::parse_hhmm("12:60").is_err());
    }

    #[test]
    fn minutes_from_midnight() {
        let t = TimeOfDay::parse_hhmm("08:15").unwrap();
        assert_eq!(t.minutes_from_midnight(), 495);
        let midnight = TimeOfDay::parse_hhmm("00:00").unwrap();
        assert_eq!(midnight.minutes_from_midnight(), 0);
    }

    #[test]
    fn ordering_follows_clock() {
        let early = TimeOfDay::parse_hhmm("06:10").unwrap();
        let late = TimeOfDay::parse_hhmm("22:00").unwrap();
        assert!(early < late);
    }

    #[test]
    fn optional_serde_maps_empty_string() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrap {
            #[serde(with = "hhmm_opt")]
            t: Option<TimeOfDay>,
        }

        let none: Wrap = serde_json::from_str(r#"{"t":""}"#).unwrap();
        assert!(none.t.is_none());

        let some: Wrap = serde_json::from_str(r#"{"t":"06:20"}"#).unwrap();
        assert_eq!(some.t.unwrap().to_string(), "06:20");

        let back = serde_json::to_string(&Wrap { t: None }).unwrap();
        assert_eq!(back, r#"{"t":""}"#);
    }
}
