//! Checkpoint recalculation.
//!
//! When the traveler reports "I'm at step X at time T", the plan is rebuilt
//! forward from that point: the fixed legs still ahead are added to T to
//! project the gate arrival, the projection is capped at boarding, and the
//! buffer left over is regraded against the original target.
//!
//! Boarding is not a checkpoint. Reaching it ends the trip and is handled by
//! [`crate::session::TripSession`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::itinerary::StepId;
use crate::recommendation::{Recommendation, SegmentDurations};
use crate::risk::{classify_risk, RiskPolicy};
use crate::trip::Flight;

/// Shift applied by [`CheckpointClamp::Bounded`] when no time is requested.
const DEFAULT_REPORT_SHIFT_MINUTES: i64 = 5;

/// Default bound for [`CheckpointClamp::Bounded`].
pub const DEFAULT_MAX_SHIFT_MINUTES: i64 = 10;

/// A step that can anchor a recalculation. Everything except boarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointStep {
    Leave,
    Curb,
    CheckIn,
    Security,
    Gate,
}

impl CheckpointStep {
    /// Minutes of fixed legs strictly after this step, excluding the buffer.
    pub fn remaining_minutes(&self, durations: &SegmentDurations) -> i64 {
        let SegmentDurations {
            travel,
            check_in,
            security,
            walk,
            ..
        } = *durations;

        match self {
            CheckpointStep::Leave => travel + check_in + security + walk,
            CheckpointStep::Curb => check_in + security + walk,
            CheckpointStep::CheckIn => security + walk,
            CheckpointStep::Security => walk,
            CheckpointStep::Gate => 0,
        }
    }
}

impl From<CheckpointStep> for StepId {
    fn from(step: CheckpointStep) -> Self {
        match step {
            CheckpointStep::Leave => StepId::Leave,
            CheckpointStep::Curb => StepId::Curb,
            CheckpointStep::CheckIn => StepId::CheckIn,
            CheckpointStep::Security => StepId::Security,
            CheckpointStep::Gate => StepId::Gate,
        }
    }
}

impl TryFrom<StepId> for CheckpointStep {
    type Error = ValidationError;

    fn try_from(step: StepId) -> Result<Self, Self::Error> {
        match step {
            StepId::Leave => Ok(CheckpointStep::Leave),
            StepId::Curb => Ok(CheckpointStep::Curb),
            StepId::CheckIn => Ok(CheckpointStep::CheckIn),
            StepId::Security => Ok(CheckpointStep::Security),
            StepId::Gate => Ok(CheckpointStep::Gate),
            StepId::Boarding => Err(ValidationError::TerminalStep(step)),
        }
    }
}

/// How a requested checkpoint instant is turned into the one used for
/// recalculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointClamp {
    /// Use the requested instant as given.
    #[default]
    Exact,
    /// Keep the instant within `max_shift_minutes` of the step's baseline
    /// planned time. Used for demonstrations so a wall-clock far from the
    /// sample flights still produces a plausible replan.
    Bounded { max_shift_minutes: i64 },
}

impl CheckpointClamp {
    pub fn bounded() -> Self {
        CheckpointClamp::Bounded {
            max_shift_minutes: DEFAULT_MAX_SHIFT_MINUTES,
        }
    }

    /// Resolve the instant to recalculate from.
    ///
    /// `baseline` is the step's planned instant in the first plan built for
    /// the trip; `fallback` is used by `Exact` when nothing was requested.
    pub fn apply(
        &self,
        baseline: DateTime<Utc>,
        requested: Option<DateTime<Utc>>,
        fallback: DateTime<Utc>,
    ) -> DateTime<Utc> {
        match *self {
            CheckpointClamp::Exact => requested.unwrap_or(fallback),
            CheckpointClamp::Bounded { max_shift_minutes } => match requested {
                Some(requested) => {
                    let bound = max_shift_minutes.abs();
                    let shift = round_minutes(requested - baseline).clamp(-bound, bound);
                    baseline + Duration::minutes(shift)
                }
                None => baseline + Duration::minutes(DEFAULT_REPORT_SHIFT_MINUTES),
            },
        }
    }
}

/// Whole minutes, halves rounded up.
pub(crate) fn round_minutes(delta: Duration) -> i64 {
    (delta.num_milliseconds() as f64 / 60_000.0 + 0.5).floor() as i64
}

/// Rebuild the plan from a reported checkpoint.
///
/// `durations` are the fixed legs of the current plan (its buffer is
/// ignored) and `target_buffer_minutes` is carried over unchanged. The gate
/// arrival is capped at boarding, so the stored actual buffer is never
/// negative; the buffer segment is additionally clamped at zero.
pub fn recalculate_from_checkpoint(
    flight: &Flight,
    durations: &SegmentDurations,
    target_buffer_minutes: i64,
    reached: CheckpointStep,
    checkpoint_time: DateTime<Utc>,
    policy: RiskPolicy,
) -> Recommendation {
    let boarding_time = flight.boarding_time();

    let remaining = reached.remaining_minutes(durations);
    let projected_gate_time = checkpoint_time + Duration::minutes(remaining);

    let gate_time = if projected_gate_time <= boarding_time {
        projected_gate_time
    } else {
        warn!(
            flight = %flight.id,
            step = %StepId::from(reached),
            %projected_gate_time,
            %boarding_time,
            "projected gate arrival is after boarding; capping at boarding"
        );
        boarding_time
    };

    let actual_buffer_minutes = round_minutes(boarding_time - gate_time);

    let security_done_time = gate_time - Duration::minutes(durations.walk);
    let check_in_done_time = security_done_time - Duration::minutes(durations.security);
    let curb_time = check_in_done_time - Duration::minutes(durations.check_in);
    let leave_time = curb_time - Duration::minutes(durations.travel);

    let risk_level = classify_risk(actual_buffer_minutes, target_buffer_minutes, policy);

    let segments = SegmentDurations {
        buffer: actual_buffer_minutes.max(0),
        ..*durations
    }
    .to_segments();

    debug!(
        flight = %flight.id,
        step = %StepId::from(reached),
        %checkpoint_time,
        %gate_time,
        actual_buffer_minutes,
        target_buffer_minutes,
        risk = %risk_level,
        "recalculated from checkpoint"
    );

    Recommendation {
        leave_time,
        expected_gate_arrival_time: gate_time,
        boarding_time,
        target_buffer_minutes,
        actual_buffer_minutes,
        risk_level,
        segments,
    }
}
