//! Progress tracking: turning reported checkpoints into a revised schedule.
//!
//! [`update_predictions`] is the stateless orchestration. [`TripSession`]
//! is the caller-owned context that holds the plan, the checkpoint entries
//! being edited, and the currently displayed adjustment and schedule.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{PacingError, Result};
use crate::fatigue::{
    analyze_checkpoints, blend, complete_checkpoints, Checkpoint, CheckpointAnalysis,
    CheckpointReport, FatigueAdjustment,
};
use crate::plan::TripPlan;
use crate::route::Route;
use crate::schedule::{generate_schedule, PredictionEvent, ResumePoint};

/// Result of revising predictions from reported progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionUpdate {
    pub adjustment: FatigueAdjustment,
    /// The furthest checkpoint, where the new schedule picks up
    pub resumed_from: Checkpoint,
    pub analyses: Vec<CheckpointAnalysis>,
    pub schedule: Vec<PredictionEvent>,
}

/// The checkpoint with the greatest mile; the first one wins a tie.
pub fn furthest_checkpoint(checkpoints: &[Checkpoint]) -> Option<Checkpoint> {
    checkpoints.iter().fold(None, |best, checkpoint| match best {
        Some(best) if checkpoint.mile <= best.mile => Some(best),
        _ => Some(*checkpoint),
    })
}

/// Re-derive fatigue from every report and regenerate the schedule from the
/// furthest checkpoint.
///
/// # Errors
///
/// Returns [`PacingError::NoCheckpointData`] for an empty list,
/// [`PacingError::IncompleteCheckpointData`] when no report has both a mile
/// and a time, and validation or day-boundary errors from the engine.
pub fn update_predictions(
    route: &Route,
    plan: &TripPlan,
    reports: &[CheckpointReport],
) -> Result<PredictionUpdate> {
    if reports.is_empty() {
        return Err(PacingError::NoCheckpointData.into());
    }
    plan.validate()?;

    let checkpoints = complete_checkpoints(reports)?;
    let resumed_from =
        furthest_checkpoint(&checkpoints).ok_or(PacingError::IncompleteCheckpointData)?;

    let analyses = analyze_checkpoints(route, plan, &checkpoints)?;
    let adjustment = blend(&analyses);

    let resume = ResumePoint::at(
        resumed_from.mile.min(route.summit_mile()),
        resumed_from.actual_time,
    );
    let schedule = generate_schedule(route, plan, &adjustment, Some(&resume))?;

    tracing::info!(
        checkpoints = checkpoints.len(),
        resume_mile = resume.mile,
        overall_fatigue = adjustment.overall_fatigue.unwrap_or(1.0),
        "predictions updated"
    );

    Ok(PredictionUpdate {
        adjustment,
        resumed_from,
        analyses,
        schedule,
    })
}

/// One editable checkpoint row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointEntry {
    pub id: u32,
    #[serde(flatten)]
    pub report: CheckpointReport,
}

/// Caller-owned trip state: plan, checkpoint entries and the schedule
/// currently on display.
#[derive(Debug, Clone)]
pub struct TripSession {
    route: Route,
    plan: TripPlan,
    entries: Vec<CheckpointEntry>,
    next_id: u32,
    adjustment: FatigueAdjustment,
    schedule: Vec<PredictionEvent>,
    resumed_from: Option<Checkpoint>,
}

impl TripSession {
    /// Start a session and compute the initial pacing.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan fails validation.
    pub fn new(route: Route, plan: TripPlan) -> Result<Self> {
        let mut session = Self {
            route,
            plan,
            entries: Vec::new(),
            next_id: 0,
            adjustment: FatigueAdjustment::none(),
            schedule: Vec::new(),
            resumed_from: None,
        };
        session.calculate_initial_pacing()?;
        Ok(session)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn plan(&self) -> &TripPlan {
        &self.plan
    }

    pub fn checkpoints(&self) -> &[CheckpointEntry] {
        &self.entries
    }

    pub fn adjustment(&self) -> &FatigueAdjustment {
        &self.adjustment
    }

    pub fn schedule(&self) -> &[PredictionEvent] {
        &self.schedule
    }

    /// The checkpoint the displayed schedule resumed from, if updated.
    pub fn resumed_from(&self) -> Option<Checkpoint> {
        self.resumed_from
    }

    /// Replace the plan. The displayed schedule is kept until the next
    /// recalculation.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan fails validation.
    pub fn set_plan(&mut self, plan: TripPlan) -> Result<()> {
        plan.validate()?;
        self.plan = plan;
        Ok(())
    }

    /// Drop checkpoints and adjustment and predict from the trailhead.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan fails validation.
    pub fn calculate_initial_pacing(&mut self) -> Result<&[PredictionEvent]> {
        self.plan.validate()?;
        let schedule = generate_schedule(&self.route, &self.plan, &FatigueAdjustment::none(), None)?;
        self.entries.clear();
        self.adjustment = FatigueAdjustment::none();
        self.resumed_from = None;
        self.schedule = schedule;
        Ok(&self.schedule)
    }

    /// Add a blank checkpoint row and return its id.
    pub fn add_checkpoint(&mut self) -> u32 {
        self.add_report(CheckpointReport::default())
    }

    pub fn add_report(&mut self, report: CheckpointReport) -> u32 {
        self.next_id += 1;
        self.entries.push(CheckpointEntry {
            id: self.next_id,
            report,
        });
        self.next_id
    }

    /// Returns `false` if no row has this id.
    pub fn set_checkpoint_mile(&mut self, id: u32, mile: Option<f64>) -> bool {
        self.entry_mut(id).map(|e| e.report.mile = mile).is_some()
    }

    /// Returns `false` if no row has this id.
    pub fn set_checkpoint_time(&mut self, id: u32, time: Option<NaiveTime>) -> bool {
        self.entry_mut(id).map(|e| e.report.actual_time = time).is_some()
    }

    pub fn remove_checkpoint(&mut self, id: u32) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Forget all progress, restart id numbering and recompute the initial
    /// pacing.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan fails validation.
    pub fn clear_progress(&mut self) -> Result<&[PredictionEvent]> {
        self.next_id = 0;
        self.calculate_initial_pacing()
    }

    /// Re-derive fatigue from all checkpoint rows and replace the displayed
    /// schedule. On error the previous state is left untouched.
    ///
    /// # Errors
    ///
    /// See [`update_predictions`].
    pub fn update_predictions(&mut self) -> Result<PredictionUpdate> {
        let reports: Vec<CheckpointReport> =
            self.entries.iter().map(|e| e.report.clone()).collect();
        let update = update_predictions(&self.route, &self.plan, &reports)?;
        self.adjustment = update.adjustment.clone();
        self.schedule = update.schedule.clone();
        self.resumed_from = Some(update.resumed_from);
        Ok(update)
    }

    fn entry_mut(&mut self, id: u32) -> Option<&mut CheckpointEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{format_clock, parse_clock};
    use crate::error::CoreError;
    use crate::schedule::Phase;

    fn checkpoint(mile: f64, time: &str) -> Checkpoint {
        Checkpoint {
            mile,
            actual_time: parse_clock(time).unwrap(),
        }
    }

    #[test]
    fn furthest_prefers_first_seen_on_tie() {
        let list = [
            checkpoint(2.0, "05:00"),
            checkpoint(4.5, "07:00"),
            checkpoint(4.5, "07:30"),
            checkpoint(3.0, "06:00"),
        ];
        let furthest = furthest_checkpoint(&list).unwrap();
        assert_eq!(furthest.mile, 4.5);
        assert_eq!(format_clock(furthest.actual_time), "07:00");
        assert!(furthest_checkpoint(&[]).is_none());
    }

    #[test]
    fn empty_reports_are_no_checkpoint_data() {
        let err = update_predictions(&Route::middle_teton(), &TripPlan::default(), &[]).unwrap_err();
        assert!(matches!(err, CoreError::Pacing(PacingError::NoCheckpointData)));
    }

    #[test]
    fn blank_reports_are_incomplete_checkpoint_data() {
        let reports = vec![CheckpointReport::default(), CheckpointReport {
            mile: Some(2.0),
            actual_time: None,
        }];
        let err =
            update_predictions(&Route::middle_teton(), &TripPlan::default(), &reports).unwrap_err();
        assert!(matches!(err, CoreError::Pacing(PacingError::IncompleteCheckpointData)));
    }

    #[test]
    fn session_replaces_schedule_on_update() {
        let mut session = TripSession::new(Route::middle_teton(), TripPlan::default()).unwrap();
        assert_eq!(session.schedule().len(), 23);
        assert!(!session.adjustment().is_active());

        let id = session.add_checkpoint();
        assert!(session.set_checkpoint_mile(id, Some(3.0)));
        assert!(session.set_checkpoint_time(id, parse_clock("05:30").ok()));

        let update = session.update_predictions().unwrap();
        assert_eq!(update.resumed_from.mile, 3.0);
        assert_eq!(session.schedule()[0].mile, 3.0);
        assert_eq!(format_clock(session.schedule()[0].predicted_time), "05:30");
        assert!(session.adjustment().is_active());
        // 90 minutes for an expected 75
        let overall = session.adjustment().overall_fatigue.unwrap();
        assert!((overall - 1.2).abs() < 1e-9);
    }

    #[test]
    fn failed_update_keeps_previous_state() {
        let mut session = TripSession::new(Route::middle_teton(), TripPlan::default()).unwrap();
        let before = session.schedule().to_vec();
        session.add_checkpoint();
        assert!(session.update_predictions().is_err());
        assert_eq!(session.schedule(), before.as_slice());
        assert!(!session.adjustment().is_active());
    }

    #[test]
    fn remove_and_clear_progress() {
        let mut session = TripSession::new(Route::middle_teton(), TripPlan::default()).unwrap();
        let first = session.add_checkpoint();
        let second = session.add_checkpoint();
        assert_eq!((first, second), (1, 2));
        assert!(session.remove_checkpoint(first));
        assert!(!session.remove_checkpoint(first));
        assert_eq!(session.checkpoints().len(), 1);

        session.clear_progress().unwrap();
        assert!(session.checkpoints().is_empty());
        assert_eq!(session.add_checkpoint(), 1);
    }

    #[test]
    fn summit_checkpoint_resumes_at_summit() {
        let mut session = TripSession::new(Route::middle_teton(), TripPlan::default()).unwrap();
        session.add_report(CheckpointReport::new(6.5, parse_clock("09:00").unwrap()));
        session.update_predictions().unwrap();
        let schedule = session.schedule();
        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule[0].phase, Phase::Summit);
    }
}
