//! Itinerary projection and per-step status.
//!
//! A plan is shown as six milestones. Their instants are derived by adding
//! segment minutes forward from the leave time; status is derived from the
//! step the traveler last reported.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::checkpoint::{round_minutes, CheckpointStep};
use crate::error::ValidationError;
use crate::recommendation::{Recommendation, SegmentDurations};

/// Itinerary milestone, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Leave,
    Curb,
    CheckIn,
    Security,
    Gate,
    Boarding,
}

impl StepId {
    pub const ALL: [StepId; 6] = [
        StepId::Leave,
        StepId::Curb,
        StepId::CheckIn,
        StepId::Security,
        StepId::Gate,
        StepId::Boarding,
    ];

    pub fn index(&self) -> usize {
        match self {
            StepId::Leave => 0,
            StepId::Curb => 1,
            StepId::CheckIn => 2,
            StepId::Security => 3,
            StepId::Gate => 4,
            StepId::Boarding => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Leave => "leave",
            StepId::Curb => "curb",
            StepId::CheckIn => "check_in",
            StepId::Security => "security",
            StepId::Gate => "gate",
            StepId::Boarding => "boarding",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StepId::Leave => "Leave",
            StepId::Curb => "Arrive at airport curb",
            StepId::CheckIn => "Check-in / bag drop done",
            StepId::Security => "Through security",
            StepId::Gate => "At the gate",
            StepId::Boarding => "Boarding",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "leave" | "home" => Ok(StepId::Leave),
            "curb" | "intransit" => Ok(StepId::Curb),
            "checkin" => Ok(StepId::CheckIn),
            "security" => Ok(StepId::Security),
            "gate" => Ok(StepId::Gate),
            "boarding" => Ok(StepId::Boarding),
            _ => Err(ValidationError::UnknownStep(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Planned,
    Current,
    Upcoming,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepState {
    pub id: StepId,
    pub planned_time: DateTime<Utc>,
    /// Set when the traveler reports reaching this step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_time: Option<DateTime<Utc>>,
    pub status: StepStatus,
}

/// Reports within this many minutes of plan count as on plan.
const ON_PLAN_TOLERANCE_MINUTES: i64 = 3;

impl StepState {
    /// Minutes the reported instant is after plan (negative when early).
    pub fn delta_minutes(&self) -> Option<i64> {
        self.actual_time
            .map(|actual| round_minutes(actual - self.planned_time))
    }

    /// "On plan", "N min early" or "N min late"; `None` until reported.
    pub fn delta_label(&self) -> Option<String> {
        self.delta_minutes().map(|delta| {
            if delta < -ON_PLAN_TOLERANCE_MINUTES {
                format!("{} min early", -delta)
            } else if delta > ON_PLAN_TOLERANCE_MINUTES {
                format!("{delta} min late")
            } else {
                "On plan".to_string()
            }
        })
    }
}

/// Six milestone instants, each the previous plus one segment.
///
/// No clamping happens here; a capped gate is already reflected in the
/// leave time passed in.
pub fn project_itinerary(
    leave_time: DateTime<Utc>,
    durations: &SegmentDurations,
) -> [(StepId, DateTime<Utc>); 6] {
    let offsets = [
        0,
        durations.travel,
        durations.check_in,
        durations.security,
        durations.walk,
        durations.buffer,
    ];

    let mut current = leave_time;
    let mut out = [(StepId::Leave, leave_time); 6];
    for (slot, (step, minutes)) in out.iter_mut().zip(StepId::ALL.iter().zip(offsets)) {
        current = current + Duration::minutes(minutes);
        *slot = (*step, current);
    }
    out
}

/// Planned instant of one step in a recommendation.
pub fn planned_time_for(recommendation: &Recommendation, step: StepId) -> DateTime<Utc> {
    project_itinerary(recommendation.leave_time, &recommendation.durations())[step.index()].1
}

/// Fresh step states for a new plan, all `Planned`.
pub fn initial_step_states(recommendation: &Recommendation) -> Vec<StepState> {
    project_itinerary(recommendation.leave_time, &recommendation.durations())
        .iter()
        .map(|&(id, planned_time)| StepState {
            id,
            planned_time,
            actual_time: None,
            status: StepStatus::Planned,
        })
        .collect()
}

/// Step states after a checkpoint report.
///
/// Steps before `reached` are completed, `reached` is current and stamped
/// with `reported_at`, later steps are upcoming.
pub fn derive_step_states(
    recommendation: &Recommendation,
    reached: CheckpointStep,
    reported_at: DateTime<Utc>,
) -> Vec<StepState> {
    let current_index = StepId::from(reached).index();

    project_itinerary(recommendation.leave_time, &recommendation.durations())
        .iter()
        .enumerate()
        .map(|(index, &(id, planned_time))| {
            let status = if index < current_index {
                StepStatus::Completed
            } else if index == current_index {
                StepStatus::Current
            } else {
                StepStatus::Upcoming
            };
            StepState {
                id,
                planned_time,
                actual_time: (index == current_index).then_some(reported_at),
                status,
            }
        })
        .collect()
}

/// Mark every step completed and stamp boarding with `boarded_at`.
///
/// Other steps keep whatever actual instant they already had.
pub fn complete_all(states: &[StepState], boarded_at: DateTime<Utc>) -> Vec<StepState> {
    states
        .iter()
        .map(|state| StepState {
            status: StepStatus::Completed,
            actual_time: if state.id == StepId::Boarding {
                Some(boarded_at)
            } else {
                state.actual_time
            },
            ..state.clone()
        })
        .collect()
}
