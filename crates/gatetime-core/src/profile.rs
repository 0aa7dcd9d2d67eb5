//! Duration profile table.
//!
//! Fixed minute durations for each part of a trip to the airport. The
//! values are deliberately simple and transparent; a hosting application
//! may override them through the `[profile]` section of the configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValidationError};

/// Boarding starts this many minutes before scheduled departure.
pub const BOARDING_MINUTES_BEFORE_DEPARTURE: i64 = 30;

/// How the traveler gets to the airport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Car,
    Taxi,
    Rideshare,
    Transit,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Car,
        TravelMode::Taxi,
        TravelMode::Rideshare,
        TravelMode::Transit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Taxi => "taxi",
            TravelMode::Rideshare => "rideshare",
            TravelMode::Transit => "transit",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            TravelMode::Car => "Car",
            TravelMode::Taxi => "Taxi",
            TravelMode::Rideshare => "Rideshare",
            TravelMode::Transit => "Public transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(TravelMode::Car),
            "taxi" => Ok(TravelMode::Taxi),
            "rideshare" => Ok(TravelMode::Rideshare),
            "transit" => Ok(TravelMode::Transit),
            _ => Err(ValidationError::UnknownTravelMode(s.to_string())),
        }
    }
}

/// How much waiting the traveler is willing to trade for safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskPreference {
    LowWait,
    Balanced,
    VerySafe,
}

impl RiskPreference {
    pub const ALL: [RiskPreference; 3] = [
        RiskPreference::LowWait,
        RiskPreference::Balanced,
        RiskPreference::VerySafe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskPreference::LowWait => "low_wait",
            RiskPreference::Balanced => "balanced",
            RiskPreference::VerySafe => "very_safe",
        }
    }

    /// Preset name shown to the traveler
    pub fn label(&self) -> &'static str {
        match self {
            RiskPreference::LowWait => "Less waiting",
            RiskPreference::Balanced => "Balanced",
            RiskPreference::VerySafe => "Very safe",
        }
    }
}

impl fmt::Display for RiskPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskPreference {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "low_wait" => Ok(RiskPreference::LowWait),
            "balanced" => Ok(RiskPreference::Balanced),
            "very_safe" => Ok(RiskPreference::VerySafe),
            _ => Err(ValidationError::UnknownRiskPreference(s.to_string())),
        }
    }
}

/// Upper bound for any single profile duration: one day.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// Travel time to the airport by mode (minutes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelMinutes {
    #[serde(default = "default_car")]
    pub car: i64,
    #[serde(default = "default_taxi")]
    pub taxi: i64,
    #[serde(default = "default_rideshare")]
    pub rideshare: i64,
    #[serde(default = "default_transit")]
    pub transit: i64,
}

/// Check-in and bag drop time (minutes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInMinutes {
    #[serde(default = "default_domestic_no_bags")]
    pub domestic_no_bags: i64,
    #[serde(default = "default_domestic_with_bags")]
    pub domestic_with_bags: i64,
    #[serde(default = "default_international")]
    pub international: i64,
}

/// Security screening time (minutes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityMinutes {
    #[serde(default = "default_standard")]
    pub standard: i64,
    #[serde(default = "default_priority")]
    pub priority: i64,
}

/// Target gate buffer by risk preference (minutes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferMinutes {
    #[serde(default = "default_low_wait")]
    pub low_wait: i64,
    #[serde(default = "default_balanced")]
    pub balanced: i64,
    #[serde(default = "default_very_safe")]
    pub very_safe: i64,
}

/// The full duration profile table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationProfile {
    #[serde(default)]
    pub travel: TravelMinutes,
    #[serde(default)]
    pub check_in: CheckInMinutes,
    #[serde(default)]
    pub security: SecurityMinutes,
    #[serde(default = "default_walk_to_gate")]
    pub walk_to_gate: i64,
    #[serde(default)]
    pub buffer: BufferMinutes,
}

// Default functions
fn default_car() -> i64 {
    35
}
fn default_taxi() -> i64 {
    35
}
fn default_rideshare() -> i64 {
    40
}
fn default_transit() -> i64 {
    50
}
fn default_domestic_no_bags() -> i64 {
    5
}
fn default_domestic_with_bags() -> i64 {
    15
}
fn default_international() -> i64 {
    25
}
fn default_standard() -> i64 {
    25
}
fn default_priority() -> i64 {
    12
}
fn default_walk_to_gate() -> i64 {
    10
}
fn default_low_wait() -> i64 {
    5
}
fn default_balanced() -> i64 {
    15
}
fn default_very_safe() -> i64 {
    30
}

impl Default for TravelMinutes {
    fn default() -> Self {
        Self {
            car: default_car(),
            taxi: default_taxi(),
            rideshare: default_rideshare(),
            transit: default_transit(),
        }
    }
}

impl Default for CheckInMinutes {
    fn default() -> Self {
        Self {
            domestic_no_bags: default_domestic_no_bags(),
            domestic_with_bags: default_domestic_with_bags(),
            international: default_international(),
        }
    }
}

impl Default for SecurityMinutes {
    fn default() -> Self {
        Self {
            standard: default_standard(),
            priority: default_priority(),
        }
    }
}

impl Default for BufferMinutes {
    fn default() -> Self {
        Self {
            low_wait: default_low_wait(),
            balanced: default_balanced(),
            very_safe: default_very_safe(),
        }
    }
}

impl Default for DurationProfile {
    fn default() -> Self {
        Self {
            travel: TravelMinutes::default(),
            check_in: CheckInMinutes::default(),
            security: SecurityMinutes::default(),
            walk_to_gate: default_walk_to_gate(),
            buffer: BufferMinutes::default(),
        }
    }
}

impl DurationProfile {
    pub fn travel_minutes(&self, mode: TravelMode) -> i64 {
        match mode {
            TravelMode::Car => self.travel.car,
            TravelMode::Taxi => self.travel.taxi,
            TravelMode::Rideshare => self.travel.rideshare,
            TravelMode::Transit => self.travel.transit,
        }
    }

    /// International flights always take the long check-in, bag or not.
    pub fn check_in_minutes(&self, is_international: bool, has_checked_bag: bool) -> i64 {
        if is_international {
            self.check_in.international
        } else if has_checked_bag {
            self.check_in.domestic_with_bags
        } else {
            self.check_in.domestic_no_bags
        }
    }

    pub fn security_minutes(&self, has_priority_security: bool) -> i64 {
        if has_priority_security {
            self.security.priority
        } else {
            self.security.standard
        }
    }

    pub fn walk_minutes(&self) -> i64 {
        self.walk_to_gate
    }

    pub fn buffer_minutes(&self, preference: RiskPreference) -> i64 {
        match preference {
            RiskPreference::LowWait => self.buffer.low_wait,
            RiskPreference::Balanced => self.buffer.balanced,
            RiskPreference::VerySafe => self.buffer.very_safe,
        }
    }

    /// Reject durations outside `0..=MAX_DURATION_MINUTES`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let entries = [
            ("profile.travel.car", self.travel.car),
            ("profile.travel.taxi", self.travel.taxi),
            ("profile.travel.rideshare", self.travel.rideshare),
            ("profile.travel.transit", self.travel.transit),
            ("profile.check_in.domestic_no_bags", self.check_in.domestic_no_bags),
            ("profile.check_in.domestic_with_bags", self.check_in.domestic_with_bags),
            ("profile.check_in.international", self.check_in.international),
            ("profile.security.standard", self.security.standard),
            ("profile.security.priority", self.security.priority),
            ("profile.walk_to_gate", self.walk_to_gate),
            ("profile.buffer.low_wait", self.buffer.low_wait),
            ("profile.buffer.balanced", self.buffer.balanced),
            ("profile.buffer.very_safe", self.buffer.very_safe),
        ];

        match entries
            .iter()
            .find(|(_, minutes)| !(0..=MAX_DURATION_MINUTES).contains(minutes))
        {
            Some((key, minutes)) => Err(ConfigError::InvalidValue {
                key: (*key).to_string(),
                message: format!(
                    "duration must be between 0 and {MAX_DURATION_MINUTES} minutes, got {minutes}"
                ),
            }),
            None => Ok(()),
        }
    }
}
