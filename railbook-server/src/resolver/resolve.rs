//! Single-train journey resolution.

use std::fmt;

use tracing::warn;

use crate::domain::{StationCode, Train};

/// Why a train does not serve a requested journey.
///
/// All of these are expected, recoverable conditions; the search layer
/// treats them as "no match", never as failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Source and destination are the same station.
    #[error("source and destination stations cannot be the same")]
    InvalidQuery,

    /// The station does not appear exactly once on the train's route.
    #[error("train does not serve station {0}")]
    StationNotServed(StationCode),

    /// Both stations are served but the destination precedes the source.
    /// The same train running the reverse direction is a distinct,
    /// non-matching journey.
    #[error("train does not run from source to destination in this direction")]
    WrongDirection,
}

/// Elapsed journey time, rendered as `"{h}h {m}m"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JourneyDuration {
    pub hours: u32,
    pub minutes: u32,
}

impl JourneyDuration {
    fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    /// Total elapsed minutes.
    pub fn total_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for JourneyDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// A resolved journey on one train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    /// Distance between the two stops, km.
    pub distance_km: u32,

    /// Elapsed travel time. `None` when the schedule lacks the source
    /// departure or destination arrival: a partial result, deliberately
    /// distinguishable from a zero duration.
    pub duration: Option<JourneyDuration>,

    /// Index of the source stop in the train's route.
    pub source_idx: usize,

    /// Index of the destination stop in the train's route.
    pub dest_idx: usize,
}

/// Resolve a source → destination journey on a single train.
///
/// Pure and deterministic: a repeated call with the same inputs always
/// yields the same result.
pub fn resolve(
    train: &Train,
    source: &StationCode,
    destination: &StationCode,
) -> Result<Journey, ResolveError> {
    if source == destination {
        return Err(ResolveError::InvalidQuery);
    }

    let source_idx = position_of(train, source)?;
    let dest_idx = position_of(train, destination)?;

    if source_idx >= dest_idx {
        return Err(ResolveError::WrongDirection);
    }

    let source_stop = &train.stations[source_idx];
    let dest_stop = &train.stations[dest_idx];

    // Non-negative by the route's non-decreasing distance invariant.
    let distance_km = dest_stop.distance - source_stop.distance;

    let duration = match (source_stop.departure, dest_stop.arrival) {
        (Some(dep), Some(arr)) => {
            let day_delta = dest_stop.day - source_stop.day;
            let arrival_minutes =
                (arr.hour() + day_delta * 24) * 60 + arr.minute();
            let departure_minutes = dep.minutes_from_midnight();

            if arrival_minutes < departure_minutes {
                // Same-day travel never wraps past midnight in valid
                // data; flag the record rather than crash.
                warn!(
                    train = %train.number,
                    source = %source,
                    destination = %destination,
                    "schedule data inconsistent: arrival precedes departure"
                );
                None
            } else {
                Some(JourneyDuration::from_minutes(
                    arrival_minutes - departure_minutes,
                ))
            }
        }
        // Missing timestamps degrade to a partial result.
        _ => None,
    };

    Ok(Journey {
        distance_km,
        duration,
        source_idx,
        dest_idx,
    })
}

/// Index of the unique stop with the given code.
fn position_of(train: &Train, code: &StationCode) -> Result<usize, ResolveError> {
    let mut found = None;
    for (i, stop) in train.stations.iter().enumerate() {
        if &stop.code == code {
            if found.is_some() {
                // A revisited station makes the journey ambiguous.
                return Err(ResolveError::StationNotServed(code.clone()));
            }
            found = Some(i);
        }
    }
    found.ok_or_else(|| ResolveError::StationNotServed(code.clone()))
}
