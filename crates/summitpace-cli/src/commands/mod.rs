pub mod config;
pub mod paces;
pub mod plan;
pub mod route;
pub mod track;

use clap::Args;
use summitpace_core::{
    format_clock, parse_clock, CheckpointReport, Config, DayBoundaryPolicy, PredictionEvent,
    TripPlan,
};

/// Per-invocation overrides on top of the configured trip defaults.
#[derive(Args, Debug, Default)]
pub struct PlanOverrides {
    /// Start time (HH:MM)
    #[arg(long, value_name = "HH:MM")]
    pub start: Option<String>,
    /// Summit break in minutes
    #[arg(long)]
    pub break_minutes: Option<u32>,
    /// Flat ascent pace, minutes per mile
    #[arg(long)]
    pub flat: Option<f64>,
    /// Steady incline ascent pace, minutes per mile
    #[arg(long)]
    pub steady: Option<f64>,
    /// Boulder scramble ascent pace, minutes per mile
    #[arg(long)]
    pub boulder: Option<f64>,
    /// Technical (class 3-4) ascent pace, minutes per mile
    #[arg(long)]
    pub technical: Option<f64>,
    /// Times earlier than the start: reject or next-day
    #[arg(long, value_name = "POLICY")]
    pub day_boundary: Option<DayBoundaryPolicy>,
    /// Flag returns at or after this hour
    #[arg(long)]
    pub late_return_hour: Option<u32>,
}

/// A resolved plan plus presentation settings.
pub struct Resolved {
    pub plan: TripPlan,
    pub late_return_hour: u32,
}

impl PlanOverrides {
    pub fn resolve(&self) -> Result<Resolved, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let mut plan = config.trip_plan();

        if let Some(start) = &self.start {
            plan.start_time = parse_clock(start)?;
        }
        if let Some(minutes) = self.break_minutes {
            plan.break_minutes = minutes;
        }
        if let Some(pace) = self.flat {
            plan.paces.flat = pace;
        }
        if let Some(pace) = self.steady {
            plan.paces.steady = pace;
        }
        if let Some(pace) = self.boulder {
            plan.paces.boulder = pace;
        }
        if let Some(pace) = self.technical {
            plan.paces.technical = pace;
        }
        if let Some(policy) = self.day_boundary {
            plan.day_boundary = policy;
        }
        plan.validate()?;
        tracing::debug!(
            start = %format_clock(plan.start_time),
            break_minutes = plan.break_minutes,
            "trip plan resolved"
        );

        Ok(Resolved {
            plan,
            late_return_hour: self.late_return_hour.unwrap_or(config.trip.late_return_hour),
        })
    }
}

/// Parse `MILE@HH:MM`. Either side may be left blank to model an
/// unfinished entry.
pub fn parse_checkpoint(s: &str) -> Result<CheckpointReport, String> {
    let (mile, time) = s
        .split_once('@')
        .ok_or_else(|| format!("expected MILE@HH:MM, got '{s}'"))?;

    let mile = match mile.trim() {
        "" => None,
        m => Some(
            m.parse::<f64>()
                .map_err(|_| format!("invalid mile '{m}' in '{s}'"))?,
        ),
    };
    let actual_time = match time.trim() {
        "" => None,
        t => Some(parse_clock(t).map_err(|e| e.to_string())?),
    };

    Ok(CheckpointReport { mile, actual_time })
}

pub fn print_schedule(events: &[PredictionEvent], marked: impl Fn(&PredictionEvent) -> bool) {
    println!(
        "{:<2} {:>5}  {:<40} {:>6}  {:>7}  {:<9}",
        "", "MILE", "LOCATION", "ETA", "ELEV", "TERRAIN"
    );
    for event in events {
        let marker = if marked(event) { "*" } else { event.phase.icon() };
        println!(
            "{:<2} {:>5.1}  {:<40} {:>6}  {:>6}ft  {:<9}",
            marker,
            event.mile,
            event.location,
            format_clock(event.predicted_time),
            event.elevation,
            event.terrain,
        );
    }
}
