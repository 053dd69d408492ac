//! Askama templates for the web frontend.

use askama::Template;

use crate::catalog::Catalog;
use crate::domain::{Booking, Station, TimeOfDay, Train};
use crate::resolver::TrainMatch;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub username: String,
}

/// Help / how-to page.
#[derive(Template)]
#[template(path = "help.html")]
pub struct HelpTemplate {
    pub username: String,
}

/// Train schedule lookup page.
#[derive(Template)]
#[template(path = "schedule.html")]
pub struct ScheduleTemplate {
    pub username: String,
    pub error: String,
    pub schedule: Option<TrainScheduleView>,
}

/// Route search page with results.
#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub username: String,
    pub stations: Vec<StationOptionView>,
    pub error: String,
    pub searched: bool,
    pub source_name: String,
    pub destination_name: String,
    pub matches: Vec<TrainMatchView>,
}

/// All-trains listing page.
#[derive(Template)]
#[template(path = "trains.html")]
pub struct TrainsTemplate {
    pub username: String,
    pub trains: Vec<TrainRowView>,
}

/// Booking form page.
#[derive(Template)]
#[template(path = "booking.html")]
pub struct BookingTemplate {
    pub username: String,
    pub stations: Vec<StationOptionView>,
    pub error: String,
    pub today: String,
}

/// Ticket page for one booking.
#[derive(Template)]
#[template(path = "ticket.html")]
pub struct TicketTemplate {
    pub username: String,
    pub booking: BookingView,
}

/// Printable ticket (standalone, no site chrome).
#[derive(Template)]
#[template(path = "ticket_print.html")]
pub struct TicketPrintTemplate {
    pub booking: BookingView,
}

/// Current bookings page.
#[derive(Template)]
#[template(path = "bookings.html")]
pub struct BookingsTemplate {
    pub username: String,
    pub bookings: Vec<BookingView>,
}

/// Booking history page, latest first, with payment details.
#[derive(Template)]
#[template(path = "history.html")]
pub struct HistoryTemplate {
    pub username: String,
    pub bookings: Vec<BookingView>,
}

/// Login page.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub username: String,
    pub error: String,
}

/// Registration page.
#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub username: String,
    pub error: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Station `<option>` entry.
#[derive(Debug, Clone)]
pub struct StationOptionView {
    pub code: String,
    pub name: String,
}

impl StationOptionView {
    pub fn from_station(station: &Station) -> Self {
        Self {
            code: station.code.as_str().to_string(),
            name: station.name.clone(),
        }
    }
}

/// Render an optional stop time, blank for missing endpoints.
fn format_time(time: Option<TimeOfDay>) -> String {
    time.map(|t| t.to_string()).unwrap_or_default()
}

/// One stop row on the schedule page.
#[derive(Debug, Clone)]
pub struct StopRowView {
    pub code: String,
    pub name: String,
    pub arrival: String,
    pub departure: String,
    pub day: u32,
    pub distance: u32,
    pub platform: String,
}

/// Full schedule view for one train.
#[derive(Debug, Clone)]
pub struct TrainScheduleView {
    pub number: String,
    pub name: String,
    pub days: String,
    pub classes: String,
    pub speed: String,
    pub total_distance: u32,
    pub stops: Vec<StopRowView>,
}

impl TrainScheduleView {
    pub fn from_train(train: &Train, catalog: &Catalog) -> Self {
        let stops = train
            .stations
            .iter()
            .map(|stop| StopRowView {
                code: stop.code.as_str().to_string(),
                name: catalog.station_name(&stop.code),
                arrival: format_time(stop.arrival),
                departure: format_time(stop.departure),
                day: stop.day,
                distance: stop.distance,
                platform: stop.platform.clone(),
            })
            .collect();

        Self {
            number: train.number.as_str().to_string(),
            name: train.name.clone(),
            days: train.days.join(", "),
            classes: train.classes.join(", "),
            speed: train.speed.clone(),
            total_distance: train.total_distance(),
            stops,
        }
    }
}

/// One row on the all-trains page.
#[derive(Debug, Clone)]
pub struct TrainRowView {
    pub number: String,
    pub name: String,
    pub source: String,
    pub destination: String,
    pub departure: String,
    pub arrival: String,
    pub days: String,
    pub classes: String,
}

impl TrainRowView {
    pub fn from_train(train: &Train, catalog: &Catalog) -> Self {
        let departure = train
            .stations
            .first()
            .map(|s| format_time(s.departure))
            .unwrap_or_default();
        let arrival = train
            .stations
            .last()
            .map(|s| format_time(s.arrival))
            .unwrap_or_default();

        Self {
            number: train.number.as_str().to_string(),
            name: train.name.clone(),
            source: catalog.station_name(&train.source_code),
            destination: catalog.station_name(&train.destination_code),
            departure,
            arrival,
            days: train.days.join(", "),
            classes: train.classes.join(", "),
        }
    }
}

/// One search result row: a matching train with its resolved journey.
#[derive(Debug, Clone)]
pub struct TrainMatchView {
    pub number: String,
    pub name: String,
    pub departure: String,
    pub arrival: String,
    /// `"{h}h {m}m"`, or blank when the schedule lacks an endpoint time.
    pub duration: String,
    pub distance_km: u32,
    pub days: String,
    pub classes: String,
}

impl TrainMatchView {
    pub fn from_match(m: &TrainMatch<'_>) -> Self {
        let source_stop = &m.train.stations[m.journey.source_idx];
        let dest_stop = &m.train.stations[m.journey.dest_idx];

        Self {
            number: m.train.number.as_str().to_string(),
            name: m.train.name.clone(),
            departure: format_time(source_stop.departure),
            arrival: format_time(dest_stop.arrival),
            duration: m
                .journey
                .duration
                .map(|d| d.to_string())
                .unwrap_or_default(),
            distance_km: m.journey.distance_km,
            days: m.train.days.join(", "),
            classes: m.train.classes.join(", "),
        }
    }
}

/// Booking view model for ticket, bookings, and history pages.
#[derive(Debug, Clone)]
pub struct BookingView {
    pub pnr: String,
    pub train_number: String,
    pub train_name: String,
    pub from_station: String,
    pub from_station_name: String,
    pub to_station: String,
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
    pub booking_date: String,
}

impl BookingView {
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            pnr: booking.pnr.as_str().to_string(),
            train_number: booking.train_number.as_str().to_string(),
            train_name: booking.train_name.clone(),
            from_station: booking.from_station.as_str().to_string(),
            from_station_name: booking.from_station_name.clone(),
            to_station: booking.to_station.as_str().to_string(),
            to_station_name: booking.to_station_name.clone(),
            date: booking.date.clone(),
            passenger_name: booking.passenger_name.clone(),
            passenger_age: booking.passenger_age,
            passenger_gender: booking.passenger_gender.clone(),
            seats: booking.seats,
            class: booking.class.clone(),
            fare_amount: booking.fare_amount.clone(),
            payment_method: booking.payment_method.clone(),
            transaction_id: booking.transaction_id.clone(),
            booking_date: booking.booking_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::domain::{RouteStop, StationCode, TrainNumber};
    use crate::resolver::find_matching_trains;
    use std::collections::BTreeMap;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn stop(c: &str, arr: &str, dep: &str, day: u32, distance: u32) -> RouteStop {
        RouteStop {
            code: code(c),
            arrival: (!arr.is_empty()).then(|| TimeOfDay::parse_hhmm(arr).unwrap()),
            departure: (!dep.is_empty()).then(|| TimeOfDay::parse_hhmm(dep).unwrap()),
            day,
            distance,
            platform: String::new(),
        }
    }

    fn test_catalog() -> Catalog {
        let stations = vec![
            Station::new(code("NDLS"), "New Delhi"),
            Station::new(code("BCT"), "Mumbai Central"),
        ];
        let trains = vec![Train {
            number: TrainNumber::parse("12951").unwrap(),
            name: "Rajdhani Express".to_string(),
            source_code: code("NDLS"),
            destination_code: code("BCT"),
            days: vec!["Mon".into(), "Tue".into()],
            classes: vec!["1A".into(), "2A".into()],
            speed: "Superfast".to_string(),
            stations: vec![
                stop("NDLS", "", "16:25", 1, 0),
                stop("BCT", "08:15", "", 2, 1384),
            ],
            seats: BTreeMap::new(),
        }];
        Catalog::from_parts(stations, trains).unwrap()
    }

    #[test]
    fn schedule_view_resolves_stop_names() {
        let catalog = test_catalog();
        let train = catalog.trains().first().unwrap();
        let view = TrainScheduleView::from_train(train, &catalog);

        assert_eq!(view.number, "12951");
        assert_eq!(view.days, "Mon, Tue");
        assert_eq!(view.total_distance, 1384);
        assert_eq!(view.stops[0].name, "New Delhi");
        assert_eq!(view.stops[0].departure, "16:25");
        assert_eq!(view.stops[0].arrival, "");
        assert_eq!(view.stops[1].arrival, "08:15");
    }

    #[test]
    fn train_row_uses_endpoint_times() {
        let catalog = test_catalog();
        let train = catalog.trains().first().unwrap();
        let row = TrainRowView::from_train(train, &catalog);

        assert_eq!(row.source, "New Delhi");
        assert_eq!(row.destination, "Mumbai Central");
        assert_eq!(row.departure, "16:25");
        assert_eq!(row.arrival, "08:15");
    }

    #[test]
    fn match_view_formats_duration_and_distance() {
        let catalog = test_catalog();
        let matches = find_matching_trains(&catalog, &code("NDLS"), &code("BCT")).unwrap();
        let view = TrainMatchView::from_match(&matches[0]);

        assert_eq!(view.departure, "16:25");
        assert_eq!(view.arrival, "08:15");
        assert_eq!(view.duration, "15h 50m");
        assert_eq!(view.distance_km, 1384);
    }
}
