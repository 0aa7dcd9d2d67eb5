use std::str::FromStr;

use chrono::Utc;
use clap::Args;
use gatetime_core::itinerary::planned_time_for;
use gatetime_core::{
    resolve_clock_time, Catalog, CheckpointClamp, Config, RiskPolicy, RiskPreference, StepId,
    TravelMode, TripOptions, TripSession,
};
use tracing::debug;

use crate::render::{display_offset, print_session, SessionView};

/// Flags shared by `plan` and `track`.
#[derive(Args)]
pub struct TripArgs {
    /// Flight id from `gatetime flights`
    #[arg(long)]
    flight: String,
    /// Where you leave from (free text)
    #[arg(long)]
    origin: Option<String>,
    /// Origin id from `gatetime origins`
    #[arg(long = "origin-id")]
    origin_id: Option<String>,
    /// car, taxi, rideshare or transit
    #[arg(long)]
    mode: TravelMode,
    /// Checking a bag
    #[arg(long)]
    bag: bool,
    /// Priority security lane
    #[arg(long)]
    priority: bool,
    /// low_wait, balanced or very_safe
    #[arg(long)]
    risk: RiskPreference,
    /// Treat the flight as international
    #[arg(long)]
    international: bool,
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    trip: TripArgs,
    /// Print JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct TrackArgs {
    #[command(flatten)]
    trip: TripArgs,
    /// Progress report as STEP@HH:MM or STEP@now, in order
    #[arg(long = "report", value_name = "STEP@TIME")]
    reports: Vec<Report>,
    /// Bounded risk and bounded checkpoint clamping for this run
    #[arg(long)]
    demo: bool,
    /// Print JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone)]
enum ReportTime {
    Now,
    Clock(String),
}

/// One `--report` value.
#[derive(Debug, Clone)]
pub struct Report {
    step: StepId,
    at: ReportTime,
}

impl FromStr for Report {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (step, at) = s
            .split_once('@')
            .ok_or_else(|| format!("expected STEP@HH:MM or STEP@now, got '{s}'"))?;
        let step = step.parse::<StepId>().map_err(|e| e.to_string())?;
        let at = match at.trim() {
            "now" => ReportTime::Now,
            clock => ReportTime::Clock(clock.to_string()),
        };
        Ok(Report { step, at })
    }
}

fn start_session(
    trip: &TripArgs,
    config: &Config,
    demo: bool,
) -> Result<TripSession, Box<dyn std::error::Error>> {
    let catalog = Catalog::builtin();
    let flight = catalog
        .require_flight(&trip.flight)?
        .with_international_override(trip.international);

    let label = match (&trip.origin, &trip.origin_id) {
        (Some(label), _) => label.clone(),
        (None, Some(id)) => catalog
            .origin(id)
            .map(|o| o.label.clone())
            .ok_or_else(|| format!("unknown origin '{id}'"))?,
        (None, None) => String::new(),
    };
    let options = TripOptions::new(trip.mode, trip.risk)
        .with_origin(trip.origin_id.clone(), &label)
        .with_checked_bag(trip.bag)
        .with_priority_security(trip.priority);

    let (policy, clamp) = if demo {
        (RiskPolicy::Bounded, CheckpointClamp::bounded())
    } else {
        (config.risk_policy, config.checkpoint_clamp())
    };

    Ok(TripSession::plan(flight, options, &config.profile, policy, clamp))
}

fn output(session: &TripSession, config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let offset = display_offset(config);
    if json {
        println!("{}", serde_json::to_string_pretty(&SessionView::new(session, offset))?);
    } else {
        print_session(session, offset, config.display.time_format_24h);
    }
    Ok(())
}

pub fn plan(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let session = start_session(&args.trip, &config, false)?;
    output(&session, &config, args.json)
}

pub fn track(args: TrackArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let offset = display_offset(&config);
    let mut session = start_session(&args.trip, &config, args.demo)?;

    for report in &args.reports {
        let (reported_at, requested) = match &report.at {
            ReportTime::Now => (Utc::now(), None),
            ReportTime::Clock(text) => {
                let anchor = planned_time_for(session.recommendation(), report.step);
                let at = resolve_clock_time(text, anchor, offset)?;
                (at, Some(at))
            }
        };
        debug!(step = %report.step, %reported_at, "replaying report");
        session.report(report.step, reported_at, requested)?;
    }

    output(&session, &config, args.json)
}
