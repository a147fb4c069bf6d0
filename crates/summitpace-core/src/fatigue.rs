//! Fatigue estimation from reported checkpoints.
//!
//! Each valid checkpoint yields a performance ratio (actual elapsed minutes
//! over the minutes the unadjusted base paces predict). Ratios are averaged
//! into an overall fatigue factor and per-terrain factors, then blended
//! 60/40 into the adjustment consumed by the pace resolver. The estimate is
//! always rebuilt from the full checkpoint set.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::clock::{elapsed_minutes, hhmm};
use crate::error::{Result, ValidationError};
use crate::pace::BasePaces;
use crate::plan::TripPlan;
use crate::route::{Route, Terrain, TerrainClass};

const TERRAIN_WEIGHT: f64 = 0.6;
const OVERALL_WEIGHT: f64 = 0.4;

/// A checkpoint as entered: either field may still be blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckpointReport {
    #[serde(default)]
    pub mile: Option<f64>,
    #[serde(default, with = "hhmm::option")]
    pub actual_time: Option<NaiveTime>,
}

impl CheckpointReport {
    pub fn new(mile: f64, actual_time: NaiveTime) -> Self {
        Self {
            mile: Some(mile),
            actual_time: Some(actual_time),
        }
    }

    /// The complete checkpoint, if both fields are filled in.
    pub fn complete(&self) -> Option<Checkpoint> {
        Some(Checkpoint {
            mile: self.mile?,
            actual_time: self.actual_time?,
        })
    }
}

/// A checkpoint with both mile and time present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub mile: f64,
    #[serde(with = "hhmm")]
    pub actual_time: NaiveTime,
}

/// Collect the complete checkpoints, in entry order.
///
/// # Errors
///
/// Returns an error if a filled-in mile is negative or not finite.
pub fn complete_checkpoints(reports: &[CheckpointReport]) -> Result<Vec<Checkpoint>, ValidationError> {
    let mut out = Vec::with_capacity(reports.len());
    for report in reports {
        if let Some(mile) = report.mile {
            if !mile.is_finite() || mile < 0.0 {
                return Err(ValidationError::invalid_value(
                    "checkpoint.mile",
                    format!("mile must be zero or more, got {mile}"),
                ));
            }
        }
        if let Some(checkpoint) = report.complete() {
            out.push(checkpoint);
        }
    }
    Ok(out)
}

/// Multiplicative pace corrections per terrain plus the overall factor.
///
/// An empty record means no adjustment is active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FatigueAdjustment {
    #[serde(default)]
    pub factors: BTreeMap<Terrain, f64>,
    #[serde(default)]
    pub overall_fatigue: Option<f64>,
}

impl FatigueAdjustment {
    pub fn none() -> Self {
        Self::default()
    }

    /// Every terrain and the overall factor set to `factor`.
    pub fn uniform(factor: f64) -> Self {
        Self {
            factors: Terrain::ALL.iter().map(|t| (*t, factor)).collect(),
            overall_fatigue: Some(factor),
        }
    }

    pub fn factor(&self, terrain: Terrain) -> Option<f64> {
        self.factors.get(&terrain).copied()
    }

    pub fn is_active(&self) -> bool {
        !self.factors.is_empty()
    }
}

/// Per-checkpoint comparison of actual against expected progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckpointAnalysis {
    pub mile: f64,
    #[serde(with = "hhmm")]
    pub actual_time: NaiveTime,
    pub elapsed_minutes: i64,
    pub expected_minutes: f64,
    /// `None` when the expected time is zero or negative
    pub performance_ratio: Option<f64>,
    pub terrain: TerrainClass,
}

/// Minutes the unadjusted base paces predict from the trailhead to `target_mile`.
pub fn expected_minutes_to_mile(route: &Route, paces: &BasePaces, target_mile: f64) -> f64 {
    let mut total = 0.0;
    for pair in route.segments().windows(2) {
        let (segment, next) = (&pair[0], &pair[1]);
        if segment.mile >= target_mile {
            break;
        }

        let distance = next.mile.min(target_mile) - segment.mile;
        if distance > 0.0 {
            if let Some(terrain) = next.terrain.paced() {
                total += distance * paces.get(terrain);
            }
        }

        if next.mile >= target_mile {
            break;
        }
    }
    total
}

/// Compare each complete checkpoint against the base-pace prediction.
///
/// # Errors
///
/// Returns an error if a checkpoint time is earlier than the start time
/// and the plan's day boundary policy rejects it.
pub fn analyze_checkpoints(
    route: &Route,
    plan: &TripPlan,
    checkpoints: &[Checkpoint],
) -> Result<Vec<CheckpointAnalysis>> {
    checkpoints
        .iter()
        .map(|checkpoint| -> Result<CheckpointAnalysis> {
            let elapsed = elapsed_minutes(plan.start_time, checkpoint.actual_time, plan.day_boundary)?;
            let expected = expected_minutes_to_mile(route, &plan.paces, checkpoint.mile);
            let performance_ratio = if expected > 0.0 {
                Some(elapsed as f64 / expected)
            } else {
                tracing::debug!(
                    mile = checkpoint.mile,
                    "checkpoint has no expected time, excluded from fatigue"
                );
                None
            };
            Ok(CheckpointAnalysis {
                mile: checkpoint.mile,
                actual_time: checkpoint.actual_time,
                elapsed_minutes: elapsed,
                expected_minutes: expected,
                performance_ratio,
                terrain: route.terrain_at(checkpoint.mile),
            })
        })
        .collect()
}

/// Derive a fresh fatigue adjustment from every reported checkpoint.
///
/// Incomplete reports are ignored. With no usable ratios the result is
/// neutral: overall fatigue 1.0 and every terrain at 1.0.
///
/// # Errors
///
/// Returns an error if a mile is invalid or a checkpoint time falls before
/// the start under [`crate::DayBoundaryPolicy::Reject`].
pub fn estimate_fatigue(
    route: &Route,
    plan: &TripPlan,
    reports: &[CheckpointReport],
) -> Result<FatigueAdjustment> {
    let checkpoints = complete_checkpoints(reports)?;
    let analyses = analyze_checkpoints(route, plan, &checkpoints)?;
    Ok(blend(&analyses))
}

/// Aggregate analysed checkpoints into the 60/40 blended adjustment.
pub fn blend(analyses: &[CheckpointAnalysis]) -> FatigueAdjustment {
    let mut all = Vec::new();
    let mut by_terrain: BTreeMap<Terrain, Vec<f64>> = BTreeMap::new();

    for analysis in analyses {
        let Some(ratio) = analysis.performance_ratio else {
            continue;
        };
        all.push(ratio);
        if let Some(terrain) = analysis.terrain.paced() {
            by_terrain.entry(terrain).or_default().push(ratio);
        }
    }

    let overall = mean(&all).unwrap_or(1.0);
    let factors = Terrain::ALL
        .iter()
        .map(|terrain| {
            let factor = match by_terrain.get(terrain).and_then(|r| mean(r)) {
                Some(terrain_factor) => terrain_factor * TERRAIN_WEIGHT + overall * OVERALL_WEIGHT,
                None => overall,
            };
            (*terrain, factor)
        })
        .collect();

    tracing::debug!(overall, samples = all.len(), "fatigue estimate recomputed");

    FatigueAdjustment {
        factors,
        overall_fatigue: Some(overall),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// How a fatigue factor reads to the climber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FatigueLevel {
    /// Ahead of schedule
    Strong,
    OnPace,
    Moderate,
    High,
}

impl FatigueLevel {
    pub fn from_factor(factor: f64) -> Self {
        if factor > 1.15 {
            Self::High
        } else if factor > 1.05 {
            Self::Moderate
        } else if factor < 0.95 {
            Self::Strong
        } else {
            Self::OnPace
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Strong => "strong performance, ahead of schedule",
            Self::OnPace => "on target",
            Self::Moderate => "moderate fatigue",
            Self::High => "high fatigue, affects all terrain",
        }
    }
}

/// Signed whole-percent change a factor applies to pace.
pub fn percent_change(factor: f64) -> i64 {
    ((factor - 1.0) * 100.0).round() as i64
}
