//! Per-step guidance text for the itinerary.
//!
//! Each milestone carries one sentence explaining the leg that ends there.
//! Travel and security wording depends on the local time of day: travel is
//! bucketed by the leave time, security by the departure time.

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::itinerary::StepId;
use crate::profile::TravelMode;
use crate::recommendation::Recommendation;
use crate::risk::RiskPolicy;
use crate::trip::{Flight, TripOptions};

/// Local time-of-day band used to pick traffic and queue wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// 05:00 to 10:59
    Morning,
    /// 11:00 to 15:59
    Midday,
    /// 16:00 to 20:59
    Evening,
    LateNight,
}

impl TimeOfDay {
    pub fn of(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        match instant.with_timezone(&offset).hour() {
            5..=10 => TimeOfDay::Morning,
            11..=15 => TimeOfDay::Midday,
            16..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::LateNight,
        }
    }
}

fn origin(options: &TripOptions) -> &str {
    match options.origin_label.trim() {
        "" => "home",
        label => label,
    }
}

fn mode_phrase(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Car => "by car",
        TravelMode::Taxi => "by taxi",
        TravelMode::Rideshare => "by rideshare",
        TravelMode::Transit => "by transit",
    }
}

fn leave_text(options: &TripOptions) -> String {
    format!(
        "Head out now to stay on this plan. We're assuming a trip {} from {}.",
        mode_phrase(options.travel_mode),
        origin(options)
    )
}

fn travel_text(minutes: i64, options: &TripOptions, bucket: TimeOfDay) -> String {
    if options.travel_mode == TravelMode::Transit {
        return format!(
            "~{minutes} min by transit from {}, including time to transfer to the airport line.",
            origin(options)
        );
    }
    let traffic = match bucket {
        TimeOfDay::Morning => "assuming typical morning congestion leaving town.",
        TimeOfDay::Midday => "with typical midday traffic toward the airport.",
        TimeOfDay::Evening => "with early-evening traffic as people head out of the city.",
        TimeOfDay::LateNight => "with light late-night traffic on the way to the airport.",
    };
    format!(
        "~{minutes} min {} from {}, {traffic}",
        mode_phrase(options.travel_mode),
        origin(options)
    )
}

fn check_in_text(minutes: i64, options: &TripOptions, flight: &Flight) -> String {
    match (flight.is_international, options.has_checked_bag) {
        (true, true) => {
            format!("~{minutes} min for international check-in and dropping your checked bag.")
        }
        (true, false) => format!("~{minutes} min for international check-in with carry-on only."),
        (false, true) => format!(
            "~{minutes} min to check in and drop a checked bag for your domestic flight."
        ),
        (false, false) => format!(
            "~{minutes} min assuming online check-in and no checked bags for your domestic flight."
        ),
    }
}

fn security_text(minutes: i64, options: &TripOptions, flight: &Flight, bucket: TimeOfDay) -> String {
    if options.has_priority_security {
        return format!("~{minutes} min with your fast-track security lane.");
    }
    let queue = match bucket {
        TimeOfDay::Morning => "Morning departures at this terminal tend to be busier.",
        TimeOfDay::Midday => "Midday departures are typically steady but predictable.",
        TimeOfDay::Evening => "Evening departures can be busier as people head out after work.",
        TimeOfDay::LateNight => "Late-night departures usually see lighter security lines.",
    };
    format!(
        "~{minutes} min in standard security at Terminal {}. {queue}",
        flight.terminal
    )
}

fn gate_text(minutes: i64, flight: &Flight) -> String {
    if flight.is_international {
        format!(
            "~{minutes} min walk; international gates are often farther from security in Terminal {}.",
            flight.terminal
        )
    } else {
        format!(
            "~{minutes} min walk to your domestic gate in Terminal {}.",
            flight.terminal
        )
    }
}

/// Buffer narrative shown at boarding.
///
/// Under [`RiskPolicy::Bounded`] the text compares the target with what is
/// left and softens a shortfall; otherwise it states the buffer the preset
/// adds.
pub fn buffer_description(
    recommendation: &Recommendation,
    options: &TripOptions,
    policy: RiskPolicy,
) -> String {
    let preset = options.risk_preference.label();
    let target = recommendation.target_buffer_minutes;
    let actual = recommendation.actual_buffer_minutes;
    let shown = actual.max(0);

    match policy {
        RiskPolicy::Bounded => {
            let mut text = format!(
                "{preset} aims for ~{target} min of buffer; this plan currently has ~{shown} min."
            );
            if actual < target {
                text.push_str(
                    " This is tighter than your usual setting, but still within a comfortable range.",
                );
            }
            text
        }
        RiskPolicy::Strict => {
            format!("{preset} setting adds ~{shown} min of buffer before boarding begins.")
        }
    }
}

/// Guidance sentence for one itinerary step.
///
/// `offset` is the local offset used to bucket the leave and departure
/// times.
pub fn step_description(
    step: StepId,
    recommendation: &Recommendation,
    flight: &Flight,
    options: &TripOptions,
    policy: RiskPolicy,
    offset: FixedOffset,
) -> String {
    let durations = recommendation.durations();
    match step {
        StepId::Leave => leave_text(options),
        StepId::Curb => travel_text(
            durations.travel,
            options,
            TimeOfDay::of(recommendation.leave_time, offset),
        ),
        StepId::CheckIn => check_in_text(durations.check_in, options, flight),
        StepId::Security => security_text(
            durations.security,
            options,
            flight,
            TimeOfDay::of(flight.departure_time, offset),
        ),
        StepId::Gate => gate_text(durations.walk, flight),
        StepId::Boarding => buffer_description(recommendation, options, policy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::RiskPreference;
    use crate::recommendation::build_default;
    use chrono::{Duration, TimeZone};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 15, h, m, 0).unwrap()
    }

    fn flight(international: bool) -> Flight {
        Flight {
            id: "ord-lax-101".into(),
            airline: "United".into(),
            flight_number: "UA 101".into(),
            departure_airport: "ORD".into(),
            arrival_airport: "LAX".into(),
            departure_time: at(18, 30),
            terminal: "1".into(),
            gate: Some("B12".into()),
            is_international: international,
        }
    }

    #[test]
    fn test_time_of_day_buckets() {
        assert_eq!(TimeOfDay::of(at(4, 59), utc()), TimeOfDay::LateNight);
        assert_eq!(TimeOfDay::of(at(5, 0), utc()), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::of(at(11, 0), utc()), TimeOfDay::Midday);
        assert_eq!(TimeOfDay::of(at(16, 0), utc()), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::of(at(21, 0), utc()), TimeOfDay::LateNight);

        // 16:30 UTC is 10:30 in Chicago
        let chicago = FixedOffset::west_opt(6 * 3600).unwrap();
        assert_eq!(TimeOfDay::of(at(16, 30), chicago), TimeOfDay::Morning);
    }

    #[test]
    fn test_default_trip_descriptions() {
        let f = flight(false);
        let options = TripOptions::new(TravelMode::Car, RiskPreference::Balanced);
        let rec = build_default(&f, &options);
        let text = |step| step_description(step, &rec, &f, &options, RiskPolicy::Strict, utc());

        assert_eq!(
            text(StepId::Leave),
            "Head out now to stay on this plan. We're assuming a trip by car from Home."
        );
        assert_eq!(
            text(StepId::Curb),
            "~35 min by car from Home, with early-evening traffic as people head out of the city."
        );
        assert_eq!(
            text(StepId::CheckIn),
            "~5 min assuming online check-in and no checked bags for your domestic flight."
        );
        assert_eq!(
            text(StepId::Security),
            "~25 min in standard security at Terminal 1. Evening departures can be busier as people head out after work."
        );
        assert_eq!(text(StepId::Gate), "~10 min walk to your domestic gate in Terminal 1.");
        assert_eq!(
            text(StepId::Boarding),
            "Balanced setting adds ~15 min of buffer before boarding begins."
        );
    }

    #[test]
    fn test_transit_priority_international() {
        let f = flight(true);
        let options = TripOptions::new(TravelMode::Transit, RiskPreference::VerySafe)
            .with_origin(None, "Office – The Loop")
            .with_checked_bag(true)
            .with_priority_security(true);
        let rec = build_default(&f, &options);
        let text = |step| step_description(step, &rec, &f, &options, RiskPolicy::Strict, utc());

        assert_eq!(
            text(StepId::Curb),
            "~50 min by transit from Office – The Loop, including time to transfer to the airport line."
        );
        assert_eq!(
            text(StepId::CheckIn),
            "~25 min for international check-in and dropping your checked bag."
        );
        assert_eq!(text(StepId::Security), "~12 min with your fast-track security lane.");
        assert!(text(StepId::Gate).starts_with("~10 min walk; international gates"));
    }

    #[test]
    fn test_bounded_buffer_narrative() {
        let f = flight(false);
        let options = TripOptions::new(TravelMode::Car, RiskPreference::Balanced);
        let mut rec = build_default(&f, &options);

        assert_eq!(
            buffer_description(&rec, &options, RiskPolicy::Bounded),
            "Balanced aims for ~15 min of buffer; this plan currently has ~15 min."
        );

        rec.actual_buffer_minutes = 5;
        rec.expected_gate_arrival_time = rec.boarding_time - Duration::minutes(5);
        assert_eq!(
            buffer_description(&rec, &options, RiskPolicy::Bounded),
            "Balanced aims for ~15 min of buffer; this plan currently has ~5 min. \
             This is tighter than your usual setting, but still within a comfortable range."
        );
        assert_eq!(
            buffer_description(&rec, &options, RiskPolicy::Strict),
            "Balanced setting adds ~5 min of buffer before boarding begins."
        );
    }
}
