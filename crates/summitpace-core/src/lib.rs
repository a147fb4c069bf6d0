//! # SummitPace Core Library
//!
//! Trip pacing for a fixed mountain route: predict arrival times at every
//! waypoint from a start time and per-terrain ascent paces, then revise those
//! predictions as actual checkpoint times come in.
//!
//! ## Architecture
//!
//! - **Route**: the static, validated list of waypoints
//! - **Pace**: terrain + direction + fatigue adjustment to minutes per mile
//! - **Schedule**: forward simulation of ascent, summit break and descent
//! - **Fatigue**: performance ratios from checkpoints, blended per terrain
//! - **Tracker**: orchestration from checkpoints to a revised schedule, and
//!   the caller-owned [`TripSession`]
//!
//! Every engine function is pure: inputs are passed explicitly and a new
//! output is returned. The CLI is a thin presentation layer over this crate.

pub mod clock;
pub mod config;
pub mod error;
pub mod fatigue;
pub mod pace;
pub mod plan;
pub mod route;
pub mod schedule;
pub mod summary;
pub mod tracker;

pub use clock::{clock_after, elapsed_minutes, format_clock, parse_clock, DayBoundaryPolicy};
pub use config::Config;
pub use error::{ConfigError, CoreError, PacingError, Result, ValidationError};
pub use fatigue::{
    analyze_checkpoints, estimate_fatigue, expected_minutes_to_mile, percent_change, Checkpoint,
    CheckpointAnalysis, CheckpointReport, FatigueAdjustment, FatigueLevel,
};
pub use pace::{descent_multiplier, resolve_pace, BasePaces, Direction};
pub use plan::TripPlan;
pub use route::{Route, RouteLeg, RouteSegment, Terrain, TerrainClass};
pub use schedule::{generate_schedule, Phase, PredictionEvent, ResumePoint};
pub use summary::{pace_comparison, PaceComparison, TripSummary, DEFAULT_LATE_RETURN_HOUR};
pub use tracker::{
    furthest_checkpoint, update_predictions, CheckpointEntry, PredictionUpdate, TripSession,
};
