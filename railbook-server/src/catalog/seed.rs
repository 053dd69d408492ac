//! Reference dataset used to seed empty storage.
//!
//! 32 stations and 10 trains. The parse `expect`s here are on literal
//! data; `seed_trains_all_validate` in the catalog tests keeps the
//! dataset honest.

use std::collections::BTreeMap;

use crate::domain::{RouteStop, Station, StationCode, TimeOfDay, Train, TrainNumber};

fn code(s: &str) -> StationCode {
    StationCode::parse(s).expect("seed station code")
}

fn time(s: &str) -> Option<TimeOfDay> {
    if s.is_empty() {
        None
    } else {
        Some(TimeOfDay::parse_hhmm(s).expect("seed time"))
    }
}

fn stop(c: &str, arrival: &str, departure: &str, day: u32, distance: u32, platform: &str) -> RouteStop {
    RouteStop {
        code: code(c),
        arrival: time(arrival),
        departure: time(departure),
        day,
        distance,
        platform: platform.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn train(
    number: &str,
    name: &str,
    days: &[&str],
    classes: &[&str],
    speed: &str,
    stations: Vec<RouteStop>,
    seats: &[(&str, u32)],
) -> Train {
    Train {
        number: TrainNumber::parse(number).expect("seed train number"),
        name: name.to_string(),
        source_code: stations.first().expect("seed route").code.clone(),
        destination_code: stations.last().expect("seed route").code.clone(),
        days: days.iter().map(|d| d.to_string()).collect(),
        classes: classes.iter().map(|c| c.to_string()).collect(),
        speed: speed.to_string(),
        stations,
        seats: seats
            .iter()
            .map(|(class, capacity)| (class.to_string(), *capacity))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// The station reference list.
pub fn stations() -> Vec<Station> {
    [
        ("NDLS", "New Delhi"),
        ("BCT", "Mumbai Central"),
        ("HWH", "Howrah"),
        ("SBC", "Bangalore City"),
        ("MMCT", "Mumbai Central CT"),
        ("MAS", "Chennai Central"),
        ("PUNE", "Pune Junction"),
        ("ADI", "Ahmedabad Junction"),
        ("BPL", "Bhopal Junction"),
        ("KOTA", "Kota Junction"),
        ("AGC", "Agra Cantt"),
        ("CNB", "Kanpur Central"),
        ("ALD", "Allahabad Junction"),
        ("BSB", "Varanasi Junction"),
        ("TATA", "Tatanagar Junction"),
        ("PNBE", "Patna Junction"),
        ("RNC", "Ranchi Junction"),
        ("KOL", "Kolkata Junction"),
        ("JPR", "Jaipur Junction"),
        ("UDZ", "Udaipur City"),
        ("JU", "Jodhpur Junction"),
        ("JAT", "Jammu Tawi"),
        ("CDG", "Chandigarh Junction"),
        ("LKO", "Lucknow Junction"),
        ("GHY", "Guwahati"),
        ("SC", "Secunderabad Junction"),
        ("HYD", "Hyderabad Deccan"),
        ("MAO", "Madgaon Junction"),
        ("TVC", "Thiruvananthapuram Central"),
        ("ERS", "Ernakulam Junction"),
        ("MYS", "Mysuru Junction"),
        ("VSKP", "Visakhapatnam Junction"),
    ]
    .into_iter()
    .map(|(c, name)| Station::new(code(c), name))
    .collect()
}

/// The train timetable list.
pub fn trains() -> Vec<Train> {
    const DAILY: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    const MON_SAT: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

    vec![
        train(
            "12951",
            "Rajdhani Express",
            &["Mon", "Wed", "Fri"],
            &["1A", "2A", "3A"],
            "130",
            vec![
                stop("NDLS", "", "16:25", 1, 0, "1"),
                stop("BCT", "08:15", "", 2, 1384, "3"),
            ],
            &[("1A", 20), ("2A", 50), ("3A", 100)],
        ),
        train(
            "12953",
            "Duronto Express",
            &["Tue", "Thu", "Sat"],
            &["1A", "2A", "3A", "SL"],
            "120",
            vec![
                stop("NDLS", "", "22:00", 1, 0, "5"),
                stop("HWH", "10:30", "", 2, 1447, "9"),
            ],
            &[("1A", 15), ("2A", 40), ("3A", 80), ("SL", 150)],
        ),
        train(
            "12301",
            "Karnataka Express",
            DAILY,
            &["2A", "3A", "SL"],
            "110",
            vec![
                stop("NDLS", "", "20:15", 1, 0, "7"),
                stop("BPL", "06:20", "06:30", 2, 702, "1"),
                stop("SBC", "08:30", "", 3, 2349, "5"),
            ],
            &[("2A", 45), ("3A", 110), ("SL", 280)],
        ),
        train(
            "12259",
            "Shatabdi Express",
            MON_SAT,
            &["CC", "EC"],
            "140",
            vec![
                stop("NDLS", "", "06:10", 1, 0, "3"),
                stop("CNB", "10:25", "10:30", 1, 435, "1"),
                stop("LKO", "12:40", "", 1, 511, "2"),
            ],
            &[("CC", 400), ("EC", 50)],
        ),
        train(
            "12216",
            "Garib Rath Express",
            &["Wed", "Fri", "Sun"],
            &["3A"],
            "90",
            vec![
                stop("MAS", "", "15:45", 1, 0, "4"),
                stop("SC", "04:30", "04:45", 2, 700, "5"),
                stop("BSB", "13:50", "14:00", 3, 1950, "6"),
                stop("PNBE", "17:15", "", 3, 2175, "1"),
            ],
            &[("3A", 350)],
        ),
        train(
            "12019",
            "Howrah Shatabdi",
            MON_SAT,
            &["CC", "EC"],
            "120",
            vec![
                stop("HWH", "", "06:05", 1, 0, "9"),
                stop("TATA", "08:55", "09:00", 1, 244, "1"),
                stop("RNC", "11:55", "", 1, 419, "1"),
            ],
            &[("CC", 380), ("EC", 40)],
        ),
        train(
            "12628",
            "Karnataka Express",
            DAILY,
            &["1A", "2A", "3A", "SL"],
            "110",
            vec![
                stop("SBC", "", "19:20", 1, 0, "6"),
                stop("MYS", "21:15", "21:20", 1, 139, "1"),
                stop("PUNE", "13:30", "13:40", 2, 836, "2"),
                stop("NDLS", "06:40", "", 3, 2349, "8"),
            ],
            &[("1A", 24), ("2A", 48), ("3A", 96), ("SL", 240)],
        ),
        train(
            "12471",
            "Swaraj Express",
            &["Tue", "Thu", "Sat"],
            &["2A", "3A", "SL"],
            "100",
            vec![
                stop("JAT", "", "12:40", 1, 0, "3"),
                stop("CDG", "15:15", "15:20", 1, 160, "4"),
                stop("JPR", "22:45", "22:55", 1, 580, "1"),
                stop("ADI", "07:30", "07:40", 2, 986, "3"),
                stop("BCT", "15:20", "", 2, 1277, "5"),
            ],
            &[("2A", 46), ("3A", 112), ("SL", 280)],
        ),
        train(
            "12907",
            "Sampark Kranti Express",
            &["Mon", "Wed", "Fri"],
            &["2A", "3A", "SL"],
            "110",
            vec![
                stop("NDLS", "", "07:20", 1, 0, "4"),
                stop("AGC", "09:45", "09:50", 1, 196, "2"),
                stop("BPL", "18:25", "18:35", 1, 703, "3"),
                stop("SC", "15:45", "", 2, 1661, "1"),
            ],
            &[("2A", 48), ("3A", 124), ("SL", 320)],
        ),
        train(
            "12295",
            "Sanghamitra Express",
            &["Tue", "Thu", "Sun"],
            &["2A", "3A", "SL"],
            "105",
            vec![
                stop("ERS", "", "11:25", 1, 0, "1"),
                stop("TVC", "15:45", "15:55", 1, 218, "2"),
                stop("MAS", "06:30", "06:45", 2, 747, "5"),
                stop("VSKP", "19:30", "19:40", 2, 1116, "3"),
                stop("HWH", "16:05", "", 3, 2066, "12"),
            ],
            &[("2A", 44), ("3A", 108), ("SL", 264)],
        ),
    ]
}
