//! Schedule generation: forward simulation of ascent, summit break and descent.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::clock::{clock_after, elapsed_minutes, hhmm};
use crate::error::{Result, ValidationError};
use crate::fatigue::{Checkpoint, FatigueAdjustment};
use crate::pace::{resolve_pace, Direction};
use crate::plan::TripPlan;
use crate::route::{Route, RouteSegment, TerrainClass};

/// Distance within which a predicted waypoint counts as a reported checkpoint.
pub const CHECKPOINT_MATCH_MILES: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Ascent,
    Summit,
    Descent,
}

impl Phase {
    pub fn icon(self) -> &'static str {
        match self {
            Phase::Ascent => "↗",
            Phase::Summit => "★",
            Phase::Descent => "↓",
        }
    }
}

/// Predicted arrival at one waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionEvent {
    pub mile: f64,
    pub location: String,
    #[serde(with = "hhmm")]
    pub predicted_time: NaiveTime,
    /// Minutes since the trip start, before wall-clock truncation
    pub elapsed_minutes: f64,
    pub elevation: f64,
    pub phase: Phase,
    pub terrain: TerrainClass,
}

impl PredictionEvent {
    fn at(segment: &RouteSegment, location: String, plan: &TripPlan, elapsed: f64, phase: Phase) -> Self {
        Self {
            mile: segment.mile,
            location,
            predicted_time: clock_after(plan.start_time, elapsed),
            elapsed_minutes: elapsed,
            elevation: segment.elevation,
            phase,
            terrain: segment.terrain,
        }
    }

    /// Whether a reported checkpoint sits on this waypoint.
    pub fn is_near_checkpoint(&self, checkpoints: &[Checkpoint]) -> bool {
        checkpoints
            .iter()
            .any(|c| (c.mile - self.mile).abs() < CHECKPOINT_MATCH_MILES)
    }
}

/// Where generation picks up when progress has been reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResumePoint {
    pub mile: f64,
    #[serde(default, with = "hhmm::option")]
    pub time: Option<NaiveTime>,
}

impl ResumePoint {
    pub fn at(mile: f64, time: NaiveTime) -> Self {
        Self {
            mile,
            time: Some(time),
        }
    }
}

/// Predict arrival times for the rest of the route.
///
/// Without a resume point the walk starts at the trailhead at the plan's
/// start time. With one, ascent events begin at the first waypoint at or
/// beyond the resume mile and the clock continues from the resume time. A
/// resume mile past the summit is treated as the summit. Descent always
/// covers the full route from the summit down, after the summit break.
///
/// # Errors
///
/// Returns an error if the resume mile is negative or not finite, or if the
/// resume time is before the start under a rejecting day boundary policy.
pub fn generate_schedule(
    route: &Route,
    plan: &TripPlan,
    adjustment: &FatigueAdjustment,
    resume: Option<&ResumePoint>,
) -> Result<Vec<PredictionEvent>> {
    let (from_mile, from_time) = match resume {
        Some(point) => {
            if !point.mile.is_finite() || point.mile < 0.0 {
                return Err(ValidationError::invalid_value(
                    "resume.mile",
                    format!("mile must be zero or more, got {}", point.mile),
                )
                .into());
            }
            (point.mile.min(route.summit_mile()), point.time)
        }
        None => (0.0, None),
    };

    let mut cumulative = match from_time {
        Some(time) => elapsed_minutes(plan.start_time, time, plan.day_boundary)? as f64,
        None => 0.0,
    };

    let segments = route.segments();
    let last = segments.len() - 1;
    let resume_index = segments
        .iter()
        .position(|s| s.mile >= from_mile)
        .unwrap_or(last);

    let mut events = Vec::with_capacity(segments.len() * 2);

    for (index, segment) in segments.iter().enumerate().skip(resume_index) {
        if index > 0 {
            let previous = &segments[index - 1];
            let distance = segment.mile - previous.mile.max(from_mile);
            if distance > 0.0 {
                if let Some(terrain) = segment.terrain.paced() {
                    cumulative +=
                        distance * resolve_pace(terrain, Direction::Ascent, &plan.paces, adjustment);
                }
            }
        }

        if segment.mile >= from_mile {
            let phase = if index == last { Phase::Summit } else { Phase::Ascent };
            events.push(PredictionEvent::at(
                segment,
                segment.location.clone(),
                plan,
                cumulative,
                phase,
            ));
        }
    }

    cumulative += f64::from(plan.break_minutes);

    for pair in segments.windows(2).rev() {
        let (below, above) = (&pair[0], &pair[1]);
        if let Some(terrain) = above.terrain.paced() {
            let distance = above.mile - below.mile;
            cumulative += distance * resolve_pace(terrain, Direction::Descent, &plan.paces, adjustment);
        }
        events.push(PredictionEvent::at(
            below,
            format!("{} (Descent)", below.location),
            plan,
            cumulative,
            Phase::Descent,
        ));
    }

    tracing::debug!(
        from_mile,
        events = events.len(),
        adjusted = adjustment.is_active(),
        "schedule generated"
    );

    Ok(events)
}
