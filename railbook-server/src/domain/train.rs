//! Train timetable records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::station::StationCode;
use super::time::TimeOfDay;

/// Error returned when parsing an invalid train number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train number: {reason}")]
pub struct InvalidTrainNumber {
    reason: &'static str,
}

/// A train number, e.g. `12951`.
///
/// Train numbers are 1 to 6 ASCII digits.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainNumber(String);

impl TrainNumber {
    /// Parse a train number from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidTrainNumber> {
        let s = s.trim();
        if s.is_empty() || s.len() > 6 {
            return Err(InvalidTrainNumber {
                reason: "must be 1 to 6 digits",
            });
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidTrainNumber {
                reason: "must contain only digits 0-9",
            });
        }
        Ok(TrainNumber(s.to_string()))
    }

    /// Returns the number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainNumber({})", self.0)
    }
}

impl fmt::Display for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TrainNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TrainNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TrainNumber::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// One scheduled station visit within a train's ordered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStop {
    pub code: StationCode,

    /// Arrival time; absent at the origin stop.
    #[serde(with = "super::time::hhmm_opt")]
    pub arrival: Option<TimeOfDay>,

    /// Departure time; absent at the terminus stop.
    #[serde(with = "super::time::hhmm_opt")]
    pub departure: Option<TimeOfDay>,

    /// 1-indexed day-of-journey, disambiguating same-clock-time events
    /// across midnight boundaries.
    pub day: u32,

    /// Cumulative distance in km from the origin.
    pub distance: u32,

    #[serde(default)]
    pub platform: String,
}

/// Error describing a timetable record that violates route invariants.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TrainDataError {
    #[error("train {0} has fewer than two stops")]
    TooFewStops(TrainNumber),

    #[error("train {0} visits {1} more than once")]
    DuplicateStop(TrainNumber, StationCode),

    #[error("train {0}: distance decreases at {1}")]
    DistanceNotMonotonic(TrainNumber, StationCode),

    #[error("train {0}: day-of-journey decreases at {1}")]
    DayNotMonotonic(TrainNumber, StationCode),

    #[error("train {0}: day-of-journey must be at least 1 at {1}")]
    DayBeforeStart(TrainNumber, StationCode),

    #[error("train {0}: origin stop {1} must not have an arrival time")]
    OriginHasArrival(TrainNumber, StationCode),

    #[error("train {0}: terminus stop {1} must not have a departure time")]
    TerminusHasDeparture(TrainNumber, StationCode),

    #[error("train {0}: route endpoints do not match source/destination codes")]
    EndpointMismatch(TrainNumber),
}

/// A train and its ordered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Train {
    pub number: TrainNumber,
    pub name: String,
    pub source_code: StationCode,
    pub destination_code: StationCode,

    /// Weekday names the train runs on, e.g. `["Mon", "Wed", "Fri"]`.
    pub days: Vec<String>,

    /// Fare-class codes in display order, e.g. `["1A", "2A", "3A"]`.
    pub classes: Vec<String>,

    /// Top speed in km/h, kept as the catalog stores it.
    #[serde(default)]
    pub speed: String,

    /// Ordered stop sequence from origin to terminus.
    pub stations: Vec<RouteStop>,

    /// Seat capacity per fare class.
    pub seats: BTreeMap<String, u32>,
}

impl Train {
    /// Check the route invariants a well-formed timetable record must hold.
    ///
    /// Called once when the catalog is loaded, so the resolver can assume
    /// ordered distances/days and unique stop codes.
    pub fn validate(&self) -> Result<(), TrainDataError> {
        let n = &self.number;

        if self.stations.len() < 2 {
            return Err(TrainDataError::TooFewStops(n.clone()));
        }

        let first = &self.stations[0];
        let last = &self.stations[self.stations.len() - 1];

        if first.arrival.is_some() {
            return Err(TrainDataError::OriginHasArrival(n.clone(), first.code.clone()));
        }
        if last.departure.is_some() {
            return Err(TrainDataError::TerminusHasDeparture(n.clone(), last.code.clone()));
        }
        if first.code != self.source_code || last.code != self.destination_code {
            return Err(TrainDataError::EndpointMismatch(n.clone()));
        }

        for (i, stop) in self.stations.iter().enumerate() {
            if stop.day < 1 {
                return Err(TrainDataError::DayBeforeStart(n.clone(), stop.code.clone()));
            }
            if self.stations[..i].iter().any(|s| s.code == stop.code) {
                return Err(TrainDataError::DuplicateStop(n.clone(), stop.code.clone()));
            }
            if i > 0 {
                let prev = &self.stations[i - 1];
                if stop.distance < prev.distance {
                    return Err(TrainDataError::DistanceNotMonotonic(
                        n.clone(),
                        stop.code.clone(),
                    ));
                }
                if stop.day < prev.day {
                    return Err(TrainDataError::DayNotMonotonic(n.clone(), stop.code.clone()));
                }
            }
        }

        Ok(())
    }

    /// Whether the train runs on the given weekday.
    pub fn runs_on(&self, weekday: Weekday) -> bool {
        let name = weekday_name(weekday);
        self.days.iter().any(|d| d == name)
    }

    /// Whether the train offers the given fare class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class) || self.seats.contains_key(class)
    }

    /// Total route length in km.
    pub fn total_distance(&self) -> u32 {
        self.stations.last().map(|s| s.distance).unwrap_or(0)
    }
}

/// The three-letter weekday names the catalog stores.
fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn stop(c: &str, arr: &str, dep: &str, day: u32, distance: u32) -> RouteStop {
        RouteStop {
            code: code(c),
            arrival: if arr.is_empty() {
                None
            } else {
                Some(TimeOfDay::parse_hhmm(arr).unwrap())
            },
            departure: if dep.is_empty() {
                None
            } else {
                Some(TimeOfDay::parse_hhmm(dep).unwrap())
            },
            day,
            distance,
            platform: String::new(),
        }
    }

    fn sample_train() -> Train {
        Train {
            number: TrainNumber::parse("12951").unwrap(),
            name: "Rajdhani Express".to_string(),
            source_code: code("NDLS"),
            destination_code: code("BCT"),
            days: vec!["Mon".into(), "Wed".into(), "Fri".into()],
            classes: vec!["1A".into(), "2A".into()],
            speed: "130".to_string(),
            stations: vec![
                stop("NDLS", "", "16:25", 1, 0),
                stop("KOTA", "21:55", "22:00", 1, 465),
                stop("BCT", "08:15", "", 2, 1384),
            ],
            seats: BTreeMap::from([("1A".to_string(), 20), ("2A".to_string(), 50)]),
        }
    }

    #[test]
    fn parse_train_number() {
        assert!(TrainNumber::parse("12951").is_ok());
        assert!(TrainNumber::parse(" 12951 ").is_ok());
        assert!(TrainNumber::parse("").is_err());
        assert!(TrainNumber::parse("12A51").is_err());
        assert!(TrainNumber::parse("1234567").is_err());
    }

    #[test]
    fn valid_train_passes_validation() {
        assert!(sample_train().validate().is_ok());
    }

    #[test]
    fn duplicate_stop_rejected() {
        let mut train = sample_train();
        train.stations[1].code = code("NDLS");
        assert!(matches!(
            train.validate(),
            Err(TrainDataError::DuplicateStop(_, _))
        ));
    }

    #[test]
    fn decreasing_distance_rejected() {
        let mut train = sample_train();
        train.stations[1].distance = 2000;
        assert!(matches!(
            train.validate(),
            Err(TrainDataError::DistanceNotMonotonic(_, _))
        ));
    }

    #[test]
    fn decreasing_day_rejected() {
        let mut train = sample_train();
        train.stations[2].day = 0;
        // Day 0 trips the >= 1 check before the monotonic check.
        assert!(train.validate().is_err());

        let mut train = sample_train();
        train.stations[1].day = 2;
        train.stations[2].day = 1;
        assert!(matches!(
            train.validate(),
            Err(TrainDataError::DayNotMonotonic(_, _))
        ));
    }

    #[test]
    fn origin_with_arrival_rejected() {
        let mut train = sample_train();
        train.stations[0].arrival = Some(TimeOfDay::parse_hhmm("16:00").unwrap());
        assert!(matches!(
            train.validate(),
            Err(TrainDataError::OriginHasArrival(_, _))
        ));
    }

    #[test]
    fn terminus_with_departure_rejected() {
        let mut train = sample_train();
        train.stations[2].departure = Some(TimeOfDay::parse_hhmm("08:30").unwrap());
        assert!(matches!(
            train.validate(),
            Err(TrainDataError::TerminusHasDeparture(_, _))
        ));
    }

    #[test]
    fn endpoint_mismatch_rejected() {
        let mut train = sample_train();
        train.destination_code = code("HWH");
        assert!(matches!(
            train.validate(),
            Err(TrainDataError::EndpointMismatch(_))
        ));
    }

    #[test]
    fn runs_on_checks_weekday_names() {
        let train = sample_train();
        assert!(train.runs_on(Weekday::Mon));
        assert!(train.runs_on(Weekday::Fri));
        assert!(!train.runs_on(Weekday::Tue));
        assert!(!train.runs_on(Weekday::Sun));
    }

    #[test]
    fn has_class_checks_classes_and_seats() {
        let mut train = sample_train();
        assert!(train.has_class("1A"));
        assert!(!train.has_class("SL"));

        // Present only in the seat map still counts as offered.
        train.seats.insert("3A".to_string(), 10);
        assert!(train.has_class("3A"));
    }

    #[test]
    fn total_distance_is_last_stop() {
        assert_eq!(sample_train().total_distance(), 1384);
    }

    #[test]
    fn route_stop_serde_roundtrip() {
        let s = stop("KOTA", "21:55", "22:00", 1, 465);
        let json = serde_json::to_string(&s).unwrap();
        let back: RouteStop = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn route_stop_deserializes_empty_times() {
        let json = r#"{
            "code": "NDLS",
            "arrival": "",
            "departure": "16:25",
            "day": 1,
            "distance": 0,
            "platform": "1"
        }"#;
        let s: RouteStop = serde_json::from_str(json).unwrap();
        assert!(s.arrival.is_none());
        assert_eq!(s.departure.unwrap().to_string(), "16:25");
    }
}
