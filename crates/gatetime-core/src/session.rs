//! Trip session: the caller-owned record of one planned trip.
//!
//! The planning functions hold no state. A session keeps the first plan
//! (the baseline), the current plan, and the six step states, and replaces
//! them wholesale on every report. Reports are applied serially.
//!
//! ## State Transitions
//!
//! ```text
//! Planning -> InProgress -> Completed
//! ```
//!
//! Reporting any step before boarding moves the trip to `InProgress` and
//! recalculates. Reporting boarding completes the trip, marks every step
//! completed and freezes the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::checkpoint::{recalculate_from_checkpoint, CheckpointClamp, CheckpointStep};
use crate::error::SessionError;
use crate::itinerary::{complete_all, derive_step_states, initial_step_states, planned_time_for, StepId, StepState};
use crate::profile::DurationProfile;
use crate::recommendation::{build_recommendation, Recommendation};
use crate::risk::RiskPolicy;
use crate::trip::{Flight, TripOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Planning,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSession {
    flight: Flight,
    options: TripOptions,
    policy: RiskPolicy,
    clamp: CheckpointClamp,
    /// First plan built for the trip; anchors bounded checkpoint clamping.
    baseline: Recommendation,
    recommendation: Recommendation,
    steps: Vec<StepState>,
    status: TripStatus,
}

impl TripSession {
    /// Build the initial plan and open a session in `Planning`.
    pub fn plan(
        flight: Flight,
        options: TripOptions,
        profile: &DurationProfile,
        policy: RiskPolicy,
        clamp: CheckpointClamp,
    ) -> Self {
        let recommendation = build_recommendation(&flight, &options, profile, policy);
        let steps = initial_step_states(&recommendation);
        Self {
            flight,
            options,
            policy,
            clamp,
            baseline: recommendation.clone(),
            recommendation,
            steps,
            status: TripStatus::Planning,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn flight(&self) -> &Flight {
        &self.flight
    }

    pub fn options(&self) -> &TripOptions {
        &self.options
    }

    pub fn baseline(&self) -> &Recommendation {
        &self.baseline
    }

    pub fn recommendation(&self) -> &Recommendation {
        &self.recommendation
    }

    pub fn steps(&self) -> &[StepState] {
        &self.steps
    }

    pub fn status(&self) -> TripStatus {
        self.status
    }

    pub fn policy(&self) -> RiskPolicy {
        self.policy
    }

    pub fn clamp(&self) -> CheckpointClamp {
        self.clamp
    }

    /// Closing line for a completed trip.
    pub fn completion_summary(&self) -> Option<String> {
        if self.status != TripStatus::Completed {
            return None;
        }
        let actual = self.recommendation.actual_buffer_minutes.max(0);
        let target = self.recommendation.target_buffer_minutes;
        let preset = self.options.risk_preference.label();
        let verdict = if actual >= target {
            format!("That's well within your {preset} target.")
        } else {
            format!("That's {} minutes short of your {preset} target.", target - actual)
        };
        Some(format!(
            "You reached the gate about {actual} minutes before boarding. {verdict}"
        ))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Record that the traveler reached `step` at `reported_at`.
    ///
    /// `requested` is the checkpoint instant the traveler entered, if any;
    /// it passes through the session's [`CheckpointClamp`] before the plan
    /// is recalculated. The reached step is stamped with `reported_at`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyCompleted`] once boarding was reported.
    pub fn report(
        &mut self,
        step: StepId,
        reported_at: DateTime<Utc>,
        requested: Option<DateTime<Utc>>,
    ) -> Result<TripStatus, SessionError> {
        if self.status == TripStatus::Completed {
            return Err(SessionError::AlreadyCompleted(step));
        }

        let checkpoint = match CheckpointStep::try_from(step) {
            Ok(checkpoint) => checkpoint,
            Err(_) => {
                self.steps = complete_all(&self.steps, reported_at);
                self.status = TripStatus::Completed;
                info!(flight = %self.flight.id, %reported_at, "trip completed at boarding");
                return Ok(self.status);
            }
        };

        let baseline_time = planned_time_for(&self.baseline, step);
        let checkpoint_time = self.clamp.apply(baseline_time, requested, reported_at);

        let updated = recalculate_from_checkpoint(
            &self.flight,
            &self.recommendation.durations(),
            self.recommendation.target_buffer_minutes,
            checkpoint,
            checkpoint_time,
            self.policy,
        );

        self.steps = derive_step_states(&updated, checkpoint, reported_at);
        self.recommendation = updated;

        if self.status == TripStatus::Planning {
            info!(flight = %self.flight.id, %step, "trip in progress");
        }
        self.status = TripStatus::InProgress;
        Ok(self.status)
    }
}
