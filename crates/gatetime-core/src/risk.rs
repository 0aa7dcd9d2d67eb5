//! Risk classification for gate buffers.
//!
//! Grades the spare minutes between gate arrival and boarding against the
//! traveler's target buffer. Rules are evaluated in order and the first
//! match wins:
//!
//! ```text
//! actual <= 0          -> High   (Bounded policy: Medium)
//! actual - target < -10 -> Medium
//! actual - target <  10 -> Low
//! otherwise            -> VeryLow
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Margin around the target buffer that still counts as on plan.
const TOLERANCE_MINUTES: i64 = 10;

/// Ordinal risk tier, least to most risky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
}

/// Coarse display band for a risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Comfortable,
    Caution,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "very_low",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "Very low",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            RiskLevel::VeryLow | RiskLevel::Low => Severity::Comfortable,
            RiskLevel::Medium => Severity::Caution,
            RiskLevel::High => Severity::Critical,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which tier mapping to apply.
///
/// `Bounded` never reports [`RiskLevel::High`]; a buffer that is gone is
/// reported as `Medium` instead. Used for demonstrations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskPolicy {
    #[default]
    Strict,
    Bounded,
}

impl RiskPolicy {
    fn exhausted_tier(&self) -> RiskLevel {
        match self {
            RiskPolicy::Strict => RiskLevel::High,
            RiskPolicy::Bounded => RiskLevel::Medium,
        }
    }
}

/// Grade an actual buffer against its target.
pub fn classify_risk(
    actual_buffer_minutes: i64,
    target_buffer_minutes: i64,
    policy: RiskPolicy,
) -> RiskLevel {
    let delta = actual_buffer_minutes - target_buffer_minutes;

    if actual_buffer_minutes <= 0 {
        policy.exhausted_tier()
    } else if delta < -TOLERANCE_MINUTES {
        RiskLevel::Medium
    } else if delta < TOLERANCE_MINUTES {
        RiskLevel::Low
    } else {
        RiskLevel::VeryLow
    }
}
