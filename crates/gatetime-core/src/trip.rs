//! Planning inputs: the selected flight and the traveler's options.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::{RiskPreference, TravelMode, BOARDING_MINUTES_BEFORE_DEPARTURE};

/// Origin label used when the traveler leaves it blank.
pub const DEFAULT_ORIGIN_LABEL: &str = "Home";

/// A scheduled flight. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: DateTime<Utc>,
    pub terminal: String,
    #[serde(default)]
    pub gate: Option<String>,
    #[serde(default)]
    pub is_international: bool,
}

impl Flight {
    /// Boarding opens a fixed offset before departure.
    pub fn boarding_time(&self) -> DateTime<Utc> {
        self.departure_time - Duration::minutes(BOARDING_MINUTES_BEFORE_DEPARTURE)
    }

    /// Copy of this flight treated as international when `international`
    /// is set. A flight that is already international stays so.
    pub fn with_international_override(&self, international: bool) -> Self {
        Self {
            is_international: self.is_international || international,
            ..self.clone()
        }
    }

    /// Airline code, the first token of the flight number ("UA" in "UA 101").
    pub fn airline_code(&self) -> &str {
        self.flight_number.split_whitespace().next().unwrap_or("")
    }

    /// One-line description for display.
    pub fn summary(&self) -> String {
        let gate = self
            .gate
            .as_deref()
            .map(|g| format!(", gate {g}"))
            .unwrap_or_default();
        let scope = if self.is_international {
            "International"
        } else {
            "Domestic"
        };
        format!(
            "{} {} · {} → {} · Terminal {}{} · {}",
            self.airline,
            self.flight_number,
            self.departure_airport,
            self.arrival_airport,
            self.terminal,
            gate,
            scope
        )
    }
}

/// Traveler choices for one planning session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripOptions {
    #[serde(default)]
    pub origin_id: Option<String>,
    pub origin_label: String,
    pub travel_mode: TravelMode,
    #[serde(default)]
    pub has_checked_bag: bool,
    #[serde(default)]
    pub has_priority_security: bool,
    pub risk_preference: RiskPreference,
}

impl TripOptions {
    /// Options with the default origin and no bag or priority lane.
    pub fn new(travel_mode: TravelMode, risk_preference: RiskPreference) -> Self {
        Self {
            origin_id: None,
            origin_label: DEFAULT_ORIGIN_LABEL.to_string(),
            travel_mode,
            has_checked_bag: false,
            has_priority_security: false,
            risk_preference,
        }
    }

    /// Set the origin; a blank label falls back to [`DEFAULT_ORIGIN_LABEL`].
    pub fn with_origin(mut self, id: Option<String>, label: &str) -> Self {
        let label = label.trim();
        self.origin_id = id;
        self.origin_label = if label.is_empty() {
            DEFAULT_ORIGIN_LABEL.to_string()
        } else {
            label.to_string()
        };
        self
    }

    pub fn with_checked_bag(mut self, has_checked_bag: bool) -> Self {
        self.has_checked_bag = has_checked_bag;
        self
    }

    pub fn with_priority_security(mut self, has_priority_security: bool) -> Self {
        self.has_priority_security = has_priority_security;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn flight() -> Flight {
        Flight {
            id: "ord-lax-101".into(),
            airline: "United".into(),
            flight_number: "UA 101".into(),
            departure_airport: "ORD".into(),
            arrival_airport: "LAX".into(),
            departure_time: Utc.with_ymd_and_hms(2025, 11, 15, 18, 30, 0).unwrap(),
            terminal: "1".into(),
            gate: Some("B12".into()),
            is_international: false,
        }
    }

    #[test]
    fn test_boarding_time() {
        assert_eq!(
            flight().boarding_time(),
            Utc.with_ymd_and_hms(2025, 11, 15, 18, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_international_override_only_widens() {
        let f = flight();
        assert!(f.with_international_override(true).is_international);
        assert!(!f.with_international_override(false).is_international);

        let intl = Flight {
            is_international: true,
            ..flight()
        };
        assert!(intl.with_international_override(false).is_international);
    }

    #[test]
    fn test_summary_and_airline_code() {
        let f = flight();
        assert_eq!(f.airline_code(), "UA");
        assert_eq!(
            f.summary(),
            "United UA 101 · ORD → LAX · Terminal 1, gate B12 · Domestic"
        );
    }

    #[test]
    fn test_blank_origin_defaults_to_home() {
        let opts = TripOptions::new(TravelMode::Car, RiskPreference::Balanced).with_origin(None, "   ");
        assert_eq!(opts.origin_label, "Home");

        let opts = opts.with_origin(Some("office-loop".into()), " Office ");
        assert_eq!(opts.origin_label, "Office");
        assert_eq!(opts.origin_id.as_deref(), Some("office-loop"));
    }
}
