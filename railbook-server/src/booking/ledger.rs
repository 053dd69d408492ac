//! Append-only booking ledger.

use std::sync::Arc;

use chrono::Local;

use crate::domain::{Booking, Pnr, StationCode, TrainNumber};
use crate::storage::{Filter, Storage, StorageError};

/// Everything the caller supplies to create a booking.
///
/// The ledger adds the PNR and the creation timestamp.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub train_number: TrainNumber,
    pub train_name: String,
    pub from_station: StationCode,
    pub from_station_name: String,
    pub to_station: StationCode,
    pub to_station_name: String,
    pub date: String,
    pub passenger_name: String,
    pub passenger_age: u32,
    pub passenger_gender: String,
    pub seats: u32,
    pub class: String,
    pub fare_amount: String,
    pub payment_method: String,
    pub transaction_id: String,
    pub username: String,
}

/// The booking ledger: append-only records keyed by PNR.
///
/// No record is ever mutated or deleted; seat inventory is never
/// decremented.
#[derive(Debug, Clone)]
pub struct Ledger {
    storage: Arc<Storage>,
}

impl Ledger {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Append a booking, generating its PNR and stamping the creation
    /// time. Returns the stored record.
    pub fn create(&self, request: BookingRequest) -> Result<Booking, StorageError> {
        let booking = Booking {
            pnr: Pnr::generate(&mut rand::thread_rng()),
            train_number: request.train_number,
            train_name: request.train_name,
            from_station: request.from_station,
            from_station_name: request.from_station_name,
            to_station: request.to_station,
            to_station_name: request.to_station_name,
            date: request.date,
            passenger_name: request.passenger_name,
            passenger_age: request.passenger_age,
            passenger_gender: request.passenger_gender,
            seats: request.seats,
            class: request.class,
            fare_amount: request.fare_amount,
            payment_method: request.payment_method,
            transaction_id: request.transaction_id,
            booking_date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            username: request.username,
        };

        self.storage.insert_one("bookings", &booking)?;
        Ok(booking)
    }

    /// Look up a booking by PNR.
    pub fn find(&self, pnr: &Pnr) -> Result<Option<Booking>, StorageError> {
        self.storage
            .find_one_as("bookings", &Filter::eq("pnr", pnr.as_str()))
    }

    /// All bookings for a user, in storage order.
    pub fn for_user(&self, username: &str) -> Result<Vec<Booking>, StorageError> {
        self.storage
            .find_many_as("bookings", &Filter::eq("username", username))
    }

    /// All bookings for a user, latest first.
    ///
    /// `booking_date` is zero-padded `YYYY-MM-DD HH:MM:SS`, so plain
    /// string comparison sorts chronologically.
    pub fn history_for_user(&self, username: &str) -> Result<Vec<Booking>, StorageError> {
        let mut bookings = self.for_user(username)?;
        bookings.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str) -> BookingRequest {
        BookingRequest {
            train_number: TrainNumber::parse("12951").unwrap(),
            train_name: "Rajdhani Express".to_string(),
            from_station: StationCode::parse("NDLS").unwrap(),
            from_station_name: "New Delhi".to_string(),
            to_station: StationCode::parse("BCT").unwrap(),
            to_station_name: "Mumbai Central".to_string(),
            date: "2026-09-01".to_string(),
            passenger_name: "Asha Rao".to_string(),
            passenger_age: 34,
            passenger_gender: "F".to_string(),
            seats: 2,
            class: "2A".to_string(),
            fare_amount: "2400".to_string(),
            payment_method: "upi".to_string(),
            transaction_id: "TX12AB34CD56".to_string(),
            username: username.to_string(),
        }
    }

    #[test]
    fn create_then_find_by_pnr() {
        let ledger = Ledger::new(Arc::new(Storage::in_memory()));
        let booking = ledger.create(request("asha")).unwrap();

        let found = ledger.find(&booking.pnr).unwrap().unwrap();
        assert_eq!(found, booking);
        assert_eq!(found.pnr.as_str().len(), 10);
    }

    #[test]
    fn unknown_pnr_is_none() {
        let ledger = Ledger::new(Arc::new(Storage::in_memory()));
        let pnr = Pnr::parse("0000000000").unwrap();
        assert!(ledger.find(&pnr).unwrap().is_none());
    }

    #[test]
    fn for_user_filters_by_owner() {
        let ledger = Ledger::new(Arc::new(Storage::in_memory()));
        ledger.create(request("asha")).unwrap();
        ledger.create(request("ravi")).unwrap();
        ledger.create(request("asha")).unwrap();

        assert_eq!(ledger.for_user("asha").unwrap().len(), 2);
        assert_eq!(ledger.for_user("ravi").unwrap().len(), 1);
        assert!(ledger.for_user("ghost").unwrap().is_empty());
    }

    #[test]
    fn history_sorts_latest_first() {
        let storage = Arc::new(Storage::in_memory());
        let ledger = Ledger::new(storage.clone());

        // Backdated records inserted directly, out of order.
        for (pnr, when) in [
            ("1111111111", "2026-01-05 09:00:00"),
            ("2222222222", "2026-03-01 12:30:00"),
            ("3333333333", "2026-02-10 23:59:59"),
        ] {
            let mut booking = ledger.create(request("asha")).unwrap();
            booking.pnr = Pnr::parse(pnr).unwrap();
            booking.booking_date = when.to_string();
            storage.insert_one("bookings", &booking).unwrap();
        }

        let history = ledger.history_for_user("asha").unwrap();
        let dates: Vec<&str> = history.iter().map(|b| b.booking_date.as_str()).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }
}
