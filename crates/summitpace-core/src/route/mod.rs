//! Route model: the fixed, ordered list of waypoints from trailhead to summit.
//!
//! A [`Route`] is validated once at construction and never mutated. Miles
//! are strictly increasing, elevation never drops, and only the first entry
//! (mile 0) carries the `start` terrain class.

mod terrain;

pub use terrain::{Terrain, TerrainClass};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const FEET_PER_MILE: f64 = 5280.0;

/// A named waypoint on the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    /// Distance from the trailhead in miles
    pub mile: f64,
    pub location: String,
    /// Terrain of the leg arriving at this waypoint
    pub terrain: TerrainClass,
    /// Feet above sea level
    pub elevation: f64,
}

impl RouteSegment {
    pub fn new(mile: f64, location: impl Into<String>, terrain: TerrainClass, elevation: f64) -> Self {
        Self {
            mile,
            location: location.into(),
            terrain,
            elevation,
        }
    }
}

/// A leg between two consecutive waypoints, walked uphill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    pub from_mile: f64,
    pub to_mile: f64,
    pub distance: f64,
    pub terrain: Terrain,
    pub gain_ft: f64,
    /// Average grade in whole percent
    pub grade_percent: i64,
}

/// Validated, ordered route from trailhead (mile 0) to summit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    segments: Vec<RouteSegment>,
}

impl Route {
    /// Build a route from waypoints ordered trailhead first.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or shorter than two entries,
    /// if the first entry is not mile 0 with terrain `start`, if `start`
    /// appears later, or if miles are not strictly increasing or elevation
    /// decreases.
    pub fn new(segments: Vec<RouteSegment>) -> Result<Self, ValidationError> {
        let first = segments
            .first()
            .ok_or_else(|| ValidationError::EmptyCollection("route segments".into()))?;
        if first.mile != 0.0 || first.terrain != TerrainClass::Start {
            return Err(ValidationError::InvalidRoute {
                index: 0,
                message: "first waypoint must be mile 0 with terrain 'start'".into(),
            });
        }
        if segments.len() < 2 {
            return Err(ValidationError::InvalidRoute {
                index: 0,
                message: "route needs at least a trailhead and a summit".into(),
            });
        }

        for (index, pair) in segments.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            let index = index + 1;
            if !next.mile.is_finite() || next.mile <= prev.mile {
                return Err(ValidationError::InvalidRoute {
                    index,
                    message: format!("mile {} does not follow mile {}", next.mile, prev.mile),
                });
            }
            if next.elevation < prev.elevation {
                return Err(ValidationError::InvalidRoute {
                    index,
                    message: format!(
                        "elevation drops from {} to {} ft",
                        prev.elevation, next.elevation
                    ),
                });
            }
            if next.terrain == TerrainClass::Start {
                return Err(ValidationError::InvalidRoute {
                    index,
                    message: "only the trailhead may use terrain 'start'".into(),
                });
            }
        }

        Ok(Self { segments })
    }

    /// Middle Teton via the Southwest Couloir, Lupine Meadows to summit.
    pub fn middle_teton() -> Self {
        use TerrainClass::*;
        let segments = vec![
            RouteSegment::new(0.0, "Lupine Meadows Trailhead", Start, 6732.0),
            RouteSegment::new(1.0, "Forest Trail", Flat, 7332.0),
            RouteSegment::new(2.0, "Switchbacks Begin", Flat, 7932.0),
            RouteSegment::new(3.0, "Garnet Canyon Junction", Flat, 8532.0),
            RouteSegment::new(3.5, "Enter Garnet Canyon", Steady, 8707.0),
            RouteSegment::new(4.0, "Approaching Platforms", Steady, 8957.0),
            RouteSegment::new(4.2, "The Platforms", Steady, 9200.0),
            RouteSegment::new(4.7, "The Meadows", Steady, 9500.0),
            RouteSegment::new(5.2, "Boulder Field Midpoint", Boulder, 10475.0),
            RouteSegment::new(5.7, "Middle/South Teton Saddle", Boulder, 11450.0),
            RouteSegment::new(6.1, "Lower Southwest Couloir", Technical, 12000.0),
            RouteSegment::new(6.5, "Middle Teton Summit", Technical, 12804.0),
        ];
        Self { segments }
    }

    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn summit(&self) -> &RouteSegment {
        // Construction guarantees at least two segments.
        &self.segments[self.segments.len() - 1]
    }

    pub fn summit_mile(&self) -> f64 {
        self.summit().mile
    }

    /// Index of the last waypoint at or below `mile`.
    pub fn segment_index_at(&self, mile: f64) -> usize {
        self.segments
            .iter()
            .rposition(|s| s.mile <= mile)
            .unwrap_or(0)
    }

    /// Terrain class of the last waypoint at or below `mile`.
    pub fn terrain_at(&self, mile: f64) -> TerrainClass {
        self.segments[self.segment_index_at(mile)].terrain
    }

    /// Elevation at an arbitrary mile by linear interpolation, clamped to
    /// the trailhead and summit.
    pub fn elevation_at(&self, mile: f64) -> f64 {
        let first = &self.segments[0];
        let last = self.summit();
        if mile <= first.mile {
            return first.elevation;
        }
        if mile >= last.mile {
            return last.elevation;
        }

        let upper = self
            .segments
            .iter()
            .position(|s| s.mile >= mile)
            .unwrap_or(self.segments.len() - 1);
        let lower = &self.segments[upper.saturating_sub(1)];
        let upper = &self.segments[upper];

        let range = upper.mile - lower.mile;
        if range <= 0.0 {
            return lower.elevation;
        }
        let position = (mile - lower.mile) / range;
        lower.elevation + (upper.elevation - lower.elevation) * position
    }

    /// Consecutive legs walking uphill, with distance and grade.
    pub fn legs(&self) -> Vec<RouteLeg> {
        self.segments
            .windows(2)
            .filter_map(|pair| {
                let (lower, upper) = (&pair[0], &pair[1]);
                let terrain = upper.terrain.paced()?;
                let distance = upper.mile - lower.mile;
                let gain_ft = upper.elevation - lower.elevation;
                Some(RouteLeg {
                    from_mile: lower.mile,
                    to_mile: upper.mile,
                    distance,
                    terrain,
                    gain_ft,
                    grade_percent: grade_percent(gain_ft, distance),
                })
            })
            .collect()
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::middle_teton()
    }
}

/// Rise over run in whole percent; zero for a zero-length leg.
pub fn grade_percent(gain_ft: f64, distance_miles: f64) -> i64 {
    if distance_miles == 0.0 {
        return 0;
    }
    (gain_ft / (distance_miles * FEET_PER_MILE) * 100.0).round() as i64
}
