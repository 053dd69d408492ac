//! Route/journey resolver.
//!
//! Answers "does train T serve the journey source → destination, and if
//! so what are its distance and duration?" Pure functions over the
//! in-memory catalog; no I/O anywhere in this module.

mod resolve;
mod search;

pub use resolve::{Journey, JourneyDuration, ResolveError, resolve};
pub use search::{TrainMatch, find_matching_trains};
