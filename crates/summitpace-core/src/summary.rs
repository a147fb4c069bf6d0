//! Trip summaries and pace comparison tables derived from engine output.

use chrono::NaiveTime;
use serde::Serialize;

use crate::clock::{clock_after, hhmm, minutes_of_day};
use crate::fatigue::{percent_change, FatigueAdjustment, FatigueLevel};
use crate::pace::{resolve_pace, BasePaces, Direction};
use crate::plan::TripPlan;
use crate::route::Terrain;
use crate::schedule::{Phase, PredictionEvent};

/// Returning at or after this hour is flagged as a late return.
pub const DEFAULT_LATE_RETURN_HOUR: u32 = 17;

/// Headline numbers for a schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSummary {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    pub summit_eta: Option<String>,
    #[serde(with = "hhmm")]
    pub return_time: NaiveTime,
    /// Whole minutes from start to the return at the trailhead
    pub total_minutes: i64,
    pub late_return: bool,
    /// Reported mile the schedule was revised from
    pub resumed_from_mile: Option<f64>,
}

impl TripSummary {
    /// `None` for an empty schedule. `resumed_from_mile` is the furthest
    /// reported checkpoint, or `None` for a schedule from the trailhead.
    pub fn from_schedule(
        plan: &TripPlan,
        schedule: &[PredictionEvent],
        resumed_from_mile: Option<f64>,
        late_return_hour: u32,
    ) -> Option<Self> {
        let last = schedule.last()?;
        let total_minutes = last.elapsed_minutes.trunc() as i64;
        let summit_eta = schedule
            .iter()
            .find(|e| e.phase == Phase::Summit)
            .map(|e| crate::clock::format_clock(e.predicted_time));
        let return_of_day = minutes_of_day(plan.start_time).saturating_add(total_minutes);

        Some(Self {
            start_time: plan.start_time,
            summit_eta,
            return_time: clock_after(plan.start_time, last.elapsed_minutes),
            total_minutes,
            late_return: return_of_day >= i64::from(late_return_hour) * 60,
            resumed_from_mile,
        })
    }

    /// Total time as "Hh Mm".
    pub fn total_display(&self) -> String {
        format!("{}h {}m", self.total_minutes / 60, self.total_minutes % 60)
    }
}

/// Original against adjusted paces for one terrain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceComparison {
    pub terrain: Terrain,
    pub original_ascent: f64,
    pub adjusted_ascent: f64,
    pub original_descent: f64,
    pub adjusted_descent: f64,
    pub change_percent: i64,
    pub level: FatigueLevel,
}

pub fn pace_comparison(paces: &BasePaces, adjustment: &FatigueAdjustment) -> Vec<PaceComparison> {
    let none = FatigueAdjustment::none();
    Terrain::ALL
        .iter()
        .map(|&terrain| {
            let factor = adjustment.factor(terrain).unwrap_or(1.0);
            PaceComparison {
                terrain,
                original_ascent: resolve_pace(terrain, Direction::Ascent, paces, &none),
                adjusted_ascent: resolve_pace(terrain, Direction::Ascent, paces, adjustment),
                original_descent: resolve_pace(terrain, Direction::Descent, paces, &none),
                adjusted_descent: resolve_pace(terrain, Direction::Descent, paces, adjustment),
                change_percent: percent_change(factor),
                level: FatigueLevel::from_factor(factor),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use crate::schedule::{generate_schedule, ResumePoint};

    #[test]
    fn summary_of_initial_schedule() {
        let plan = TripPlan::default();
        let schedule =
            generate_schedule(&Route::middle_teton(), &plan, &FatigueAdjustment::none(), None).unwrap();
        let summary = TripSummary::from_schedule(&plan, &schedule, None, DEFAULT_LATE_RETURN_HOUR).unwrap();
        assert_eq!(summary.summit_eta.as_deref(), Some("08:14"));
        assert_eq!(summary.total_minutes, 464);
        assert_eq!(summary.total_display(), "7h 44m");
        assert!(!summary.late_return);
        assert_eq!(summary.resumed_from_mile, None);

        let late = TripSummary::from_schedule(&plan, &schedule, None, 11).unwrap();
        assert!(late.late_return);
    }

    #[test]
    fn resumed_schedule_reports_the_checkpoint_mile() {
        let plan = TripPlan::default();
        let resume = ResumePoint::at(4.45, crate::clock::parse_clock("07:00").unwrap());
        let schedule = generate_schedule(
            &Route::middle_teton(),
            &plan,
            &FatigueAdjustment::none(),
            Some(&resume),
        )
        .unwrap();
        assert_eq!(schedule[0].mile, 4.7);
        let summary =
            TripSummary::from_schedule(&plan, &schedule, Some(4.45), DEFAULT_LATE_RETURN_HOUR).unwrap();
        assert_eq!(summary.resumed_from_mile, Some(4.45));
    }

    #[test]
    fn huge_paces_saturate_instead_of_panicking() {
        let plan = TripPlan {
            paces: BasePaces {
                flat: 1e17,
                ..BasePaces::default()
            },
            ..TripPlan::default()
        };
        assert!(plan.validate().is_ok());
        let schedule =
            generate_schedule(&Route::middle_teton(), &plan, &FatigueAdjustment::none(), None).unwrap();
        let summary = TripSummary::from_schedule(&plan, &schedule, None, DEFAULT_LATE_RETURN_HOUR).unwrap();
        assert!(summary.late_return);
    }

    #[test]
    fn empty_schedule_has_no_summary() {
        assert!(TripSummary::from_schedule(&TripPlan::default(), &[], None, 17).is_none());
    }

    #[test]
    fn comparison_without_adjustment_is_unchanged() {
        let rows = pace_comparison(&BasePaces::default(), &FatigueAdjustment::none());
        assert_eq!(rows.len(), 4);
        for row in rows {
            assert_eq!(row.original_ascent, row.adjusted_ascent);
            assert_eq!(row.original_descent, row.adjusted_descent);
            assert_eq!(row.change_percent, 0);
            assert_eq!(row.level, FatigueLevel::OnPace);
        }
    }

    #[test]
    fn comparison_reflects_adjustment() {
        let rows = pace_comparison(&BasePaces::default(), &FatigueAdjustment::uniform(1.2));
        let flat = &rows[0];
        assert_eq!(flat.adjusted_ascent, 30.0);
        // round(30 / 1.8) = 17
        assert_eq!(flat.adjusted_descent, 17.0);
        assert_eq!(flat.change_percent, 20);
        assert_eq!(flat.level, FatigueLevel::High);
    }
}
