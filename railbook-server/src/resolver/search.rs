//! Catalog-wide train matching.

use crate::catalog::Catalog;
use crate::domain::{StationCode, Train};

use super::resolve::{Journey, ResolveError, resolve};

/// A train that serves the requested journey, with its resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainMatch<'a> {
    pub train: &'a Train,
    pub journey: Journey,
}

/// Scan the catalog for trains serving source → destination.
///
/// Matches are returned in catalog order (stable; never re-sorted by
/// time, fare, or distance). A train that fails resolution with
/// [`ResolveError::StationNotServed`] or [`ResolveError::WrongDirection`]
/// is simply not a match. Zero matches is an empty list, not an error.
///
/// Fails fast with [`ResolveError::InvalidQuery`] when source and
/// destination are identical: no train can satisfy same-station travel,
/// so the scan never runs.
pub fn find_matching_trains<'a>(
    catalog: &'a Catalog,
    source: &StationCode,
    destination: &StationCode,
) -> Result<Vec<TrainMatch<'a>>, ResolveError> {
    if source == destination {
        return Err(ResolveError::InvalidQuery);
    }

    let mut matches = Vec::new();
    for train in catalog.trains() {
        match resolve(train, source, destination) {
            Ok(journey) => matches.push(TrainMatch { train, journey }),
            Err(ResolveError::StationNotServed(_)) | Err(ResolveError::WrongDirection) => {}
            // Unreachable given the guard above, but do not hide it.
            Err(ResolveError::InvalidQuery) => return Err(ResolveError::InvalidQuery),
        }
    }

    Ok(matches)
}
