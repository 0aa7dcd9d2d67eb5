//! Reference data: sample flights and traveler origins.
//!
//! All flights depart ORD on fixed instants so plans stay deterministic.
//! The planner never fetches flight data; a hosting application supplies a
//! [`Catalog`] and passes the selected [`Flight`] by value.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::trip::Flight;

/// Queries shorter than this match everything.
const MIN_QUERY_CHARS: usize = 2;

/// A place the traveler may leave from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub id: String,
    pub label: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub flights: Vec<Flight>,
    pub origins: Vec<Origin>,
}

/// City name for an arrival airport code, when known.
pub fn arrival_city(code: &str) -> Option<&'static str> {
    match code {
        "LAX" => Some("Los Angeles"),
        "SFO" => Some("San Francisco"),
        "JFK" => Some("New York"),
        "LHR" => Some("London"),
        "NRT" => Some("Tokyo"),
        _ => None,
    }
}

fn normalize_query(query: &str) -> Option<String> {
    let q = query.trim().to_lowercase();
    (q.chars().count() >= MIN_QUERY_CHARS).then_some(q)
}

fn flight_haystack(flight: &Flight) -> String {
    let collapsed: String = flight
        .flight_number
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    [
        flight.flight_number.as_str(),
        collapsed.as_str(),
        flight.airline.as_str(),
        flight.airline_code(),
        flight.arrival_airport.as_str(),
        arrival_city(&flight.arrival_airport).unwrap_or(""),
    ]
    .join(" ")
    .to_lowercase()
}

fn departure(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("catalog departure is a valid UTC instant")
}

fn flight(
    id: &str,
    airline: &str,
    number: &str,
    arrival: &str,
    departure_time: DateTime<Utc>,
    terminal: &str,
    gate: &str,
    is_international: bool,
) -> Flight {
    Flight {
        id: id.into(),
        airline: airline.into(),
        flight_number: number.into(),
        departure_airport: "ORD".into(),
        arrival_airport: arrival.into(),
        departure_time,
        terminal: terminal.into(),
        gate: Some(gate.into()),
        is_international,
    }
}

fn origin(id: &str, label: &str, address: &str) -> Origin {
    Origin {
        id: id.into(),
        label: label.into(),
        address: address.into(),
    }
}

impl Catalog {
    /// The built-in sample catalog.
    pub fn builtin() -> Self {
        Self {
            flights: vec![
                flight("ord-lax-101", "United", "UA 101", "LAX", departure(2025, 11, 15, 18, 30), "1", "B12", false),
                flight("ord-sfo-202", "American", "AA 202", "SFO", departure(2025, 11, 15, 20, 0), "3", "H4", false),
                flight("ord-jfk-303", "Delta", "DL 303", "JFK", departure(2025, 11, 15, 22, 15), "2", "E7", false),
                flight("ord-lhr-900", "British Airways", "BA 900", "LHR", departure(2025, 11, 16, 1, 15), "5", "M18", true),
                flight("ord-nrt-700", "ANA", "NH 700", "NRT", departure(2025, 11, 16, 3, 45), "5", "K10", true),
            ],
            origins: vec![
                origin("home-logan-square", "Home – Logan Square", "2400 W Fullerton Ave, Chicago, IL"),
                origin("office-loop", "Office – The Loop", "233 S Wacker Dr, Chicago, IL"),
                origin("downtown-hotel", "Downtown hotel", "151 W Adams St, Chicago, IL"),
                origin("coworking-river-north", "Coworking – River North", "515 N State St, Chicago, IL"),
                origin("friends-place-lincoln-park", "Friend’s place – Lincoln Park", "900 W Fullerton Pkwy, Chicago, IL"),
                origin("ohare-airport", "O’Hare Airport (parking / rental car)", "10000 W Balmoral Ave, Chicago, IL"),
                origin("midway-airport", "Midway Airport", "5700 S Cicero Ave, Chicago, IL"),
            ],
        }
    }

    pub fn flight(&self, id: &str) -> Option<&Flight> {
        self.flights.iter().find(|f| f.id == id)
    }

    /// Like [`Catalog::flight`] but an unknown id is an error.
    pub fn require_flight(&self, id: &str) -> Result<&Flight, ValidationError> {
        self.flight(id)
            .ok_or_else(|| ValidationError::UnknownFlight(id.to_string()))
    }

    pub fn origin(&self, id: &str) -> Option<&Origin> {
        self.origins.iter().find(|o| o.id == id)
    }

    /// Flights matching a free-text query.
    ///
    /// Matches flight number (with or without spaces), airline name and
    /// code, arrival code and arrival city. Queries under two characters
    /// return every flight.
    pub fn search_flights(&self, query: &str) -> Vec<&Flight> {
        match normalize_query(query) {
            Some(q) => self
                .flights
                .iter()
                .filter(|f| flight_haystack(f).contains(&q))
                .collect(),
            None => self.flights.iter().collect(),
        }
    }

    /// Origins whose label or address contains the query.
    pub fn search_origins(&self, query: &str) -> Vec<&Origin> {
        match normalize_query(query) {
            Some(q) => self
                .origins
                .iter()
                .filter(|o| {
                    o.label.to_lowercase().contains(&q) || o.address.to_lowercase().contains(&q)
                })
                .collect(),
            None => self.origins.iter().collect(),
        }
    }
}
