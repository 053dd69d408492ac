//! Booking records.

use serde::{Deserialize, Serialize};

use super::pnr::Pnr;
use super::station::StationCode;
use super::train::TrainNumber;

/// A confirmed reservation.
///
/// Created once at booking time and never mutated or deleted. Owned by
/// the creating user (`username`); read back by that user's ticket and
/// history views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub pnr: Pnr,
    pub train_number: TrainNumber,
    pub train_name: String,
    pub from_station: StationCode,
    pub from_station_name: String,
    pub to_station: StationCode,
    pub to_station_name: String,

    /// Travel date, `YYYY-MM-DD`.
    pub date: String,

    pub passenger_name: String,
    pub passenger_age: u32,
    pub passenger_gender: String,
    pub seats: u32,
    pub class: String,

    #[serde(default)]
    pub fare_amount: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub transaction_id: String,

    /// Creation timestamp, zero-padded `YYYY-MM-DD HH:MM:SS`.
    ///
    /// The format is lexicographically sortable, which the history view
    /// relies on.
    pub booking_date: String,

    pub username: String,
}
