use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::clock::{hhmm, DayBoundaryPolicy};
use crate::error::ValidationError;
use crate::pace::BasePaces;

/// Everything the user configures before leaving the trailhead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// Rest taken once at the summit
    pub break_minutes: u32,
    pub paces: BasePaces,
    #[serde(default)]
    pub day_boundary: DayBoundaryPolicy,
}

impl Default for TripPlan {
    fn default() -> Self {
        Self {
            start_time: NaiveTime::from_hms_opt(4, 0, 0).unwrap_or_default(),
            break_minutes: 30,
            paces: BasePaces::default(),
            day_boundary: DayBoundaryPolicy::Reject,
        }
    }
}

impl TripPlan {
    pub fn new(start_time: NaiveTime, break_minutes: u32, paces: BasePaces) -> Self {
        Self {
            start_time,
            break_minutes,
            paces,
            day_boundary: DayBoundaryPolicy::default(),
        }
    }

    pub fn with_day_boundary(mut self, policy: DayBoundaryPolicy) -> Self {
        self.day_boundary = policy;
        self
    }

    /// # Errors
    ///
    /// Returns an error if any base pace is not positive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.paces.validate()
    }
}
