//! Recommendation builder.
//!
//! Schedules backward from boarding: the gate buffer, walk, security and
//! check-in are stacked before boarding to find the curb time, and travel
//! is stacked before that to find the leave time.
//!
//! ```text
//! leave ──travel──▶ curb ──check-in──▶ ──security──▶ ──walk──▶ gate ──buffer──▶ boarding
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::profile::DurationProfile;
use crate::risk::{classify_risk, RiskLevel, RiskPolicy};
use crate::trip::{Flight, TripOptions};

/// A named leg of the itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Travel,
    CheckIn,
    Security,
    Walk,
    Buffer,
}

impl SegmentKind {
    /// Canonical itinerary order.
    pub const ORDER: [SegmentKind; 5] = [
        SegmentKind::Travel,
        SegmentKind::CheckIn,
        SegmentKind::Security,
        SegmentKind::Walk,
        SegmentKind::Buffer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SegmentKind::Travel => "Travel to airport",
            SegmentKind::CheckIn => "Check-in / bag drop",
            SegmentKind::Security => "Security",
            SegmentKind::Walk => "Walk to gate",
            SegmentKind::Buffer => "Buffer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub minutes: i64,
}

impl Segment {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Segment minutes as named fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDurations {
    pub travel: i64,
    pub check_in: i64,
    pub security: i64,
    pub walk: i64,
    pub buffer: i64,
}

impl SegmentDurations {
    pub fn minutes(&self, kind: SegmentKind) -> i64 {
        match kind {
            SegmentKind::Travel => self.travel,
            SegmentKind::CheckIn => self.check_in,
            SegmentKind::Security => self.security,
            SegmentKind::Walk => self.walk,
            SegmentKind::Buffer => self.buffer,
        }
    }

    /// Travel, check-in, security and walk; everything but the buffer.
    pub fn fixed_total(&self) -> i64 {
        self.travel + self.check_in + self.security + self.walk
    }

    pub fn total(&self) -> i64 {
        self.fixed_total() + self.buffer
    }

    /// The five segments in canonical order.
    pub fn to_segments(&self) -> Vec<Segment> {
        SegmentKind::ORDER
            .iter()
            .map(|&kind| Segment {
                kind,
                minutes: self.minutes(kind),
            })
            .collect()
    }
}

/// A leave-time plan for one flight.
///
/// Never mutated: every recompute produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub leave_time: DateTime<Utc>,
    pub expected_gate_arrival_time: DateTime<Utc>,
    pub boarding_time: DateTime<Utc>,
    pub target_buffer_minutes: i64,
    pub actual_buffer_minutes: i64,
    pub risk_level: RiskLevel,
    pub segments: Vec<Segment>,
}

impl Recommendation {
    /// Segment minutes as a typed record. A missing segment counts as zero.
    pub fn durations(&self) -> SegmentDurations {
        let mut durations = SegmentDurations::default();
        for segment in &self.segments {
            match segment.kind {
                SegmentKind::Travel => durations.travel = segment.minutes,
                SegmentKind::CheckIn => durations.check_in = segment.minutes,
                SegmentKind::Security => durations.security = segment.minutes,
                SegmentKind::Walk => durations.walk = segment.minutes,
                SegmentKind::Buffer => durations.buffer = segment.minutes,
            }
        }
        durations
    }

    pub fn total_segment_minutes(&self) -> i64 {
        self.segments.iter().map(|s| s.minutes).sum()
    }
}

/// Build the initial plan for a flight.
///
/// Total: every input combination yields a plan. The actual buffer starts
/// equal to the target since nothing has slipped yet.
pub fn build_recommendation(
    flight: &Flight,
    options: &TripOptions,
    profile: &DurationProfile,
    policy: RiskPolicy,
) -> Recommendation {
    let boarding_time = flight.boarding_time();

    let travel = profile.travel_minutes(options.travel_mode);
    let check_in = profile.check_in_minutes(flight.is_international, options.has_checked_bag);
    let security = profile.security_minutes(options.has_priority_security);
    let walk = profile.walk_minutes();
    let target_buffer_minutes = profile.buffer_minutes(options.risk_preference);

    let total_process_minutes = check_in + security + walk + target_buffer_minutes;
    let curb_time = boarding_time - Duration::minutes(total_process_minutes);
    let leave_time = curb_time - Duration::minutes(travel);
    let expected_gate_arrival_time = boarding_time - Duration::minutes(target_buffer_minutes);

    let actual_buffer_minutes = target_buffer_minutes;
    let risk_level = classify_risk(actual_buffer_minutes, target_buffer_minutes, policy);

    let durations = SegmentDurations {
        travel,
        check_in,
        security,
        walk,
        buffer: actual_buffer_minutes,
    };

    debug!(
        flight = %flight.id,
        %leave_time,
        %curb_time,
        %expected_gate_arrival_time,
        %boarding_time,
        target_buffer_minutes,
        risk = %risk_level,
        "built recommendation"
    );

    Recommendation {
        leave_time,
        expected_gate_arrival_time,
        boarding_time,
        target_buffer_minutes,
        actual_buffer_minutes,
        risk_level,
        segments: durations.to_segments(),
    }
}

/// [`build_recommendation`] with the default profile and strict policy.
pub fn build_default(flight: &Flight, options: &TripOptions) -> Recommendation {
    build_recommendation(flight, options, &DurationProfile::default(), RiskPolicy::Strict)
}
