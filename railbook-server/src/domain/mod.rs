//! Core domain types.
//!
//! Records are validated once at the storage boundary; everything past
//! that point operates on these strongly-typed values.

mod booking;
mod pnr;
mod station;
mod time;
mod train;
mod user;

pub use booking::Booking;
pub use pnr::{InvalidPnr, Pnr};
pub use station::{InvalidStationCode, Station, StationCode};
pub use time::{TimeError, TimeOfDay};
pub use train::{InvalidTrainNumber, RouteStop, Train, TrainDataError, TrainNumber};
pub use user::User;
