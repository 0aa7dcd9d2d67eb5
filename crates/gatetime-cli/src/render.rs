//! Human-readable output for plans and trip sessions.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use gatetime_core::{
    format_clock, step_description, Config, Flight, Recommendation, Severity, StepId,
    StepState, StepStatus, TripOptions, TripSession, TripStatus,
};
use serde::Serialize;

/// Offset used to show and read clock times; UTC when the configured
/// offset is out of range.
pub fn display_offset(config: &Config) -> FixedOffset {
    config.display_offset().unwrap_or_else(|| Utc.fix())
}

/// Guidance and progress note for one step.
#[derive(Serialize)]
pub struct StepGuidance {
    pub id: StepId,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
}

/// Snapshot of a session for `--json` output.
#[derive(Serialize)]
pub struct SessionView<'a> {
    pub flight: &'a Flight,
    pub options: &'a TripOptions,
    pub recommendation: &'a Recommendation,
    pub steps: &'a [StepState],
    pub guidance: Vec<StepGuidance>,
    pub status: TripStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl<'a> SessionView<'a> {
    pub fn new(session: &'a TripSession, offset: FixedOffset) -> Self {
        let guidance = session
            .steps()
            .iter()
            .map(|step| StepGuidance {
                id: step.id,
                description: describe(session, step.id, offset),
                delta: step.delta_label(),
            })
            .collect();
        Self {
            flight: session.flight(),
            options: session.options(),
            recommendation: session.recommendation(),
            steps: session.steps(),
            guidance,
            status: session.status(),
            summary: session.completion_summary(),
        }
    }
}

fn describe(session: &TripSession, step: StepId, offset: FixedOffset) -> String {
    step_description(
        step,
        session.recommendation(),
        session.flight(),
        session.options(),
        session.policy(),
        offset,
    )
}

fn status_label(status: TripStatus) -> &'static str {
    match status {
        TripStatus::Planning => "planning",
        TripStatus::InProgress => "in progress",
        TripStatus::Completed => "completed",
    }
}

fn severity_note(severity: Severity) -> &'static str {
    match severity {
        Severity::Comfortable => "",
        Severity::Caution => " (tight)",
        Severity::Critical => " (at risk of missing boarding)",
    }
}

fn step_status_label(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Planned => "",
        StepStatus::Current => "current",
        StepStatus::Upcoming => "upcoming",
        StepStatus::Completed => "done",
    }
}

pub fn print_session(session: &TripSession, offset: FixedOffset, twenty_four_hour: bool) {
    let clock = |t: DateTime<Utc>| format_clock(t, offset, twenty_four_hour);
    let rec = session.recommendation();
    let options = session.options();

    println!("{}", session.flight().summary());
    let mut extras = Vec::new();
    if options.has_checked_bag {
        extras.push("checked bag");
    }
    if options.has_priority_security {
        extras.push("priority security");
    }
    let extras = if extras.is_empty() {
        String::new()
    } else {
        format!(", {}", extras.join(", "))
    };
    println!(
        "From {} by {} ({}){}",
        options.origin_label,
        options.travel_mode.label().to_lowercase(),
        options.risk_preference.label().to_lowercase(),
        extras
    );
    println!();
    println!("Leave at        {}", clock(rec.leave_time));
    println!("Gate by         {}", clock(rec.expected_gate_arrival_time));
    println!("Boarding        {}", clock(rec.boarding_time));
    println!(
        "Buffer          {} min (target {} min)",
        rec.actual_buffer_minutes, rec.target_buffer_minutes
    );
    println!(
        "Risk            {}{}",
        rec.risk_level.label(),
        severity_note(rec.risk_level.severity())
    );

    println!();
    println!("Timeline");
    for step in session.steps() {
        let actual = step
            .actual_time
            .map(|t| {
                let delta = step.delta_label().unwrap_or_default();
                format!(" (reported {}, {})", clock(t), delta.to_lowercase())
            })
            .unwrap_or_default();
        println!(
            "  {:>8}  {:<26} {}{}",
            clock(step.planned_time),
            step.id.label(),
            step_status_label(step.status),
            actual
        );
        println!("            {}", describe(session, step.id, offset));
    }

    println!();
    println!("Segments");
    for segment in &rec.segments {
        println!("  {:<22} {:>3} min", segment.label(), segment.minutes);
    }
    println!("  {:<22} {:>3} min", "Total", rec.durations().total());

    println!();
    println!("Status          {}", status_label(session.status()));
    if let Some(summary) = session.completion_summary() {
        println!("{summary}");
    }
}
