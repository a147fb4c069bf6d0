//! Wall-clock arithmetic for a single climbing day.
//!
//! All observable times are "HH:MM" 24-hour strings. Internally times are
//! `NaiveTime` values and elapsed spans are minutes since the trip start.

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{PacingError, ValidationError};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// What to do when a wall-clock reading is numerically earlier than the
/// trip start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayBoundaryPolicy {
    /// Treat the reading as invalid input.
    #[default]
    Reject,
    /// Treat the reading as progress past midnight on the following day.
    NextDay,
}

impl std::str::FromStr for DayBoundaryPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "next-day" | "next_day" | "nextday" => Ok(Self::NextDay),
            other => Err(ValidationError::invalid_value(
                "day_boundary",
                format!("'{other}' is not one of: reject, next-day"),
            )),
        }
    }
}

/// Parse an "HH:MM" 24-hour clock string.
pub fn parse_clock(s: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| ValidationError::InvalidClock(s.to_string()))
}

/// Format a time as "HH:MM".
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Minutes since midnight.
pub fn minutes_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight() / 60)
}

/// Wall-clock reading `minutes` after `start`.
///
/// Fractional minutes are truncated toward zero and the result wraps at
/// midnight, the way a watch reads.
pub fn clock_after(start: NaiveTime, minutes: f64) -> NaiveTime {
    let whole = (minutes.trunc() as i64).rem_euclid(MINUTES_PER_DAY);
    let (time, _) = start.overflowing_add_signed(Duration::minutes(whole));
    time
}

/// Minutes elapsed from `start` to `end` within one climbing day.
///
/// # Errors
///
/// Returns [`PacingError::TimeBeforeStart`] when `end` is earlier than
/// `start` and the policy is [`DayBoundaryPolicy::Reject`].
pub fn elapsed_minutes(
    start: NaiveTime,
    end: NaiveTime,
    policy: DayBoundaryPolicy,
) -> Result<i64, PacingError> {
    let diff = minutes_of_day(end) - minutes_of_day(start);
    if diff >= 0 {
        return Ok(diff);
    }
    match policy {
        DayBoundaryPolicy::Reject => Err(PacingError::TimeBeforeStart {
            start: format_clock(start),
            time: format_clock(end),
        }),
        DayBoundaryPolicy::NextDay => Ok(diff + MINUTES_PER_DAY),
    }
}

/// Serde adapter storing `NaiveTime` as "HH:MM".
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_clock(&s).map_err(serde::de::Error::custom)
    }

    /// Same as the parent module, for optional fields.
    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => serializer.serialize_some(&crate::clock::format_clock(*t)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            let s: Option<String> = Option::deserialize(deserializer)?;
            match s.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(s) => crate::clock::parse_clock(s)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
            }
        }
    }
}
