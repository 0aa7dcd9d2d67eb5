//! # Gatetime Core Library
//!
//! This library provides the planning logic for Gatetime, a trip-timing
//! advisor that tells a traveler when to leave for the airport and keeps
//! that advice current as they report progress. The CLI is a thin layer
//! over the same library.
//!
//! ## Architecture
//!
//! - **Profile**: fixed minute durations per travel mode, bag and security
//!   options, and risk preference
//! - **Recommendation**: backward scheduling from boarding to a leave time
//! - **Checkpoint**: forward recalculation from a reported step, capped at
//!   boarding
//! - **Itinerary**: the six-step timeline and per-step status
//! - **Session**: caller-owned trip state (planning, in progress, completed)
//! - **Guidance**: one explanatory sentence per step
//!
//! Every planning function is pure. The caller owns the current
//! recommendation and step states and replaces them on each report.
//!
//! ## Key Components
//!
//! - [`build_recommendation`]: initial leave-time plan
//! - [`recalculate_from_checkpoint`]: re-plan from a live checkpoint
//! - [`classify_risk`]: grade a buffer against its target
//! - [`TripSession`]: progress tracking over a plan
//! - [`Config`]: application configuration management

pub mod catalog;
pub mod checkpoint;
pub mod clock;
pub mod error;
pub mod guidance;
pub mod itinerary;
pub mod profile;
pub mod recommendation;
pub mod risk;
pub mod session;
pub mod storage;
pub mod trip;

pub use catalog::{Catalog, Origin};
pub use checkpoint::{recalculate_from_checkpoint, CheckpointClamp, CheckpointStep};
pub use clock::{format_clock, resolve_clock_time};
pub use error::{ConfigError, CoreError, SessionError, ValidationError};
pub use guidance::{buffer_description, step_description, TimeOfDay};
pub use itinerary::{project_itinerary, StepId, StepState, StepStatus};
pub use profile::{DurationProfile, RiskPreference, TravelMode, BOARDING_MINUTES_BEFORE_DEPARTURE};
pub use recommendation::{build_default, build_recommendation, Recommendation, Segment, SegmentDurations, SegmentKind};
pub use risk::{classify_risk, RiskLevel, RiskPolicy, Severity};
pub use session::{TripSession, TripStatus};
pub use storage::Config;
pub use trip::{Flight, TripOptions};
