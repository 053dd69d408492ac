//! Station/train catalog.
//!
//! Static reference data loaded once from storage at startup and
//! read-only thereafter. When the backing collections are empty (first
//! run, or the memory backend) they are seeded with the reference
//! dataset first.

mod seed;

use std::collections::HashMap;

use tracing::info;

use crate::domain::{Station, StationCode, Train, TrainDataError, TrainNumber};
use crate::storage::{Filter, Storage, StorageError};

/// Errors raised while loading the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    BadTrain(#[from] TrainDataError),

    #[error("duplicate station code {0}")]
    DuplicateStation(StationCode),

    #[error("duplicate train number {0}")]
    DuplicateTrain(TrainNumber),
}

/// The loaded catalog: stations and trains with lookup indexes.
#[derive(Debug)]
pub struct Catalog {
    stations: Vec<Station>,
    trains: Vec<Train>,
    station_index: HashMap<StationCode, usize>,
    train_index: HashMap<TrainNumber, usize>,
}

impl Catalog {
    /// Load the catalog from storage, seeding empty collections first.
    ///
    /// Every train record is validated here, once, so the resolver can
    /// rely on the route invariants downstream.
    pub fn load(storage: &Storage) -> Result<Self, CatalogError> {
        seed_if_empty(storage)?;

        let stations: Vec<Station> = storage.find_many_as("stations", &Filter::all())?;
        let trains: Vec<Train> = storage.find_many_as("trains", &Filter::all())?;

        let catalog = Self::from_parts(stations, trains)?;
        info!(
            stations = catalog.stations.len(),
            trains = catalog.trains.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Build a catalog from already-decoded records.
    pub fn from_parts(stations: Vec<Station>, trains: Vec<Train>) -> Result<Self, CatalogError> {
        let mut station_index = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            if station_index.insert(station.code.clone(), i).is_some() {
                return Err(CatalogError::DuplicateStation(station.code.clone()));
            }
        }

        let mut train_index = HashMap::with_capacity(trains.len());
        for (i, train) in trains.iter().enumerate() {
            train.validate()?;
            if train_index.insert(train.number.clone(), i).is_some() {
                return Err(CatalogError::DuplicateTrain(train.number.clone()));
            }
        }

        Ok(Self {
            stations,
            trains,
            station_index,
            train_index,
        })
    }

    /// All stations, in storage order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// All trains, in storage order.
    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// Look up a station by code.
    pub fn station(&self, code: &StationCode) -> Option<&Station> {
        self.station_index.get(code).map(|&i| &self.stations[i])
    }

    /// Display name for a station code, falling back to the code itself
    /// for stops that reference stations missing from the list.
    pub fn station_name(&self, code: &StationCode) -> String {
        match self.station(code) {
            Some(station) => station.name.clone(),
            None => format!("{code} (Unknown)"),
        }
    }

    /// Look up a train by number.
    pub fn train(&self, number: &TrainNumber) -> Option<&Train> {
        self.train_index.get(number).map(|&i| &self.trains[i])
    }
}

/// Seed reference collections that are still empty.
fn seed_if_empty(storage: &Storage) -> Result<(), StorageError> {
    if storage.count("stations", &Filter::all())? == 0 {
        for station in seed::stations() {
            storage.insert_one("stations", &station)?;
        }
        info!("seeded station reference data");
    }

    if storage.count("trains", &Filter::all())? == 0 {
        for train in seed::trains() {
            storage.insert_one("trains", &train)?;
        }
        info!("seeded train reference data");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    #[test]
    fn load_seeds_empty_storage() {
        let storage = Storage::in_memory();
        let catalog = Catalog::load(&storage).unwrap();

        assert_eq!(catalog.stations().len(), 32);
        assert_eq!(catalog.trains().len(), 10);

        // Loading again does not re-seed.
        let again = Catalog::load(&storage).unwrap();
        assert_eq!(again.stations().len(), 32);
        assert_eq!(again.trains().len(), 10);
    }

    #[test]
    fn seed_trains_all_validate() {
        for train in seed::trains() {
            train.validate().unwrap_or_else(|e| panic!("{e}"));
        }
    }

    #[test]
    fn seed_stop_codes_resolve_to_stations() {
        let catalog = Catalog::from_parts(seed::stations(), seed::trains()).unwrap();
        for train in catalog.trains() {
            for stop in &train.stations {
                assert!(
                    catalog.station(&stop.code).is_some(),
                    "train {} references unknown station {}",
                    train.number,
                    stop.code
                );
            }
        }
    }

    #[test]
    fn lookup_by_code_and_number() {
        let storage = Storage::in_memory();
        let catalog = Catalog::load(&storage).unwrap();

        assert_eq!(catalog.station(&code("NDLS")).unwrap().name, "New Delhi");
        assert_eq!(catalog.station_name(&code("HWH")), "Howrah");
        assert_eq!(catalog.station_name(&code("ZZZZZ")), "ZZZZZ (Unknown)");

        let number = TrainNumber::parse("12951").unwrap();
        assert_eq!(catalog.train(&number).unwrap().name, "Rajdhani Express");
        assert!(catalog.train(&TrainNumber::parse("99999").unwrap()).is_none());
    }

    #[test]
    fn duplicate_station_rejected() {
        let stations = vec![
            Station::new(code("NDLS"), "New Delhi"),
            Station::new(code("NDLS"), "New Delhi again"),
        ];
        assert!(matches!(
            Catalog::from_parts(stations, vec![]),
            Err(CatalogError::DuplicateStation(_))
        ));
    }

    #[test]
    fn duplicate_train_rejected() {
        let trains = vec![seed::trains()[0].clone(), seed::trains()[0].clone()];
        assert!(matches!(
            Catalog::from_parts(seed::stations(), trains),
            Err(CatalogError::DuplicateTrain(_))
        ));
    }
}
