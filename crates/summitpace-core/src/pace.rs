//! Pace resolution: terrain + direction + fatigue adjustment -> minutes per mile.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::fatigue::FatigueAdjustment;
use crate::route::Terrain;

/// User-configured ascent paces in minutes per mile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasePaces {
    #[serde(default = "default_flat")]
    pub flat: f64,
    #[serde(default = "default_steady")]
    pub steady: f64,
    #[serde(default = "default_boulder")]
    pub boulder: f64,
    #[serde(default = "default_technical")]
    pub technical: f64,
}

fn default_flat() -> f64 {
    25.0
}
fn default_steady() -> f64 {
    35.0
}
fn default_boulder() -> f64 {
    60.0
}
fn default_technical() -> f64 {
    75.0
}

impl Default for BasePaces {
    fn default() -> Self {
        Self {
            flat: default_flat(),
            steady: default_steady(),
            boulder: default_boulder(),
            technical: default_technical(),
        }
    }
}

impl BasePaces {
    pub fn get(&self, terrain: Terrain) -> f64 {
        match terrain {
            Terrain::Flat => self.flat,
            Terrain::Steady => self.steady,
            Terrain::Boulder => self.boulder,
            Terrain::Technical => self.technical,
        }
    }

    pub fn set(&mut self, terrain: Terrain, pace: f64) {
        match terrain {
            Terrain::Flat => self.flat = pace,
            Terrain::Steady => self.steady = pace,
            Terrain::Boulder => self.boulder = pace,
            Terrain::Technical => self.technical = pace,
        }
    }

    /// # Errors
    ///
    /// Returns an error if any pace is not a positive finite number.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for terrain in Terrain::ALL {
            let pace = self.get(terrain);
            if !pace.is_finite() || pace <= 0.0 {
                return Err(ValidationError::invalid_value(
                    format!("paces.{terrain}"),
                    format!("pace must be a positive number of minutes per mile, got {pace}"),
                ));
            }
        }
        Ok(())
    }
}

/// Direction of travel along the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascent,
    Descent,
}

/// How much faster descent is than the matching ascent pace.
pub fn descent_multiplier(terrain: Terrain) -> f64 {
    match terrain {
        Terrain::Flat => 1.8,
        Terrain::Steady => 1.6,
        Terrain::Boulder => 1.3,
        Terrain::Technical => 1.1,
    }
}

/// Minutes per mile for `terrain` in `direction`.
///
/// Ascent pace is the base pace scaled by the terrain's adjustment factor
/// and rounded to a whole minute. Descent pace is the (rounded) ascent pace
/// divided by the terrain's descent multiplier, rounded again.
pub fn resolve_pace(
    terrain: Terrain,
    direction: Direction,
    paces: &BasePaces,
    adjustment: &FatigueAdjustment,
) -> f64 {
    match direction {
        Direction::Ascent => {
            let base = paces.get(terrain);
            match adjustment.factor(terrain) {
                Some(factor) => (base * factor).round(),
                None => base,
            }
        }
        Direction::Descent => {
            let ascent = resolve_pace(terrain, Direction::Ascent, paces, adjustment);
            (ascent / descent_multiplier(terrain)).round()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unadjusted_ascent_is_base_pace() {
        let paces = BasePaces::default();
        let none = FatigueAdjustment::none();
        for terrain in Terrain::ALL {
            assert_eq!(
                resolve_pace(terrain, Direction::Ascent, &paces, &none),
                paces.get(terrain)
            );
        }
    }

    #[test]
    fn descent_rounds_after_dividing_rounded_ascent() {
        let paces = BasePaces::default();
        let none = FatigueAdjustment::none();
        // 25 / 1.8 = 13.9
        assert_eq!(resolve_pace(Terrain::Flat, Direction::Descent, &paces, &none), 14.0);
        // 35 / 1.6 = 21.9
        assert_eq!(resolve_pace(Terrain::Steady, Direction::Descent, &paces, &none), 22.0);
        // 60 / 1.3 = 46.2
        assert_eq!(resolve_pace(Terrain::Boulder, Direction::Descent, &paces, &none), 46.0);
        // 75 / 1.1 = 68.2
        assert_eq!(resolve_pace(Terrain::Technical, Direction::Descent, &paces, &none), 68.0);
    }

    #[test]
    fn adjusted_boulder_pace() {
        let paces = BasePaces::default();
        let adjustment = FatigueAdjustment::uniform(430.0 / 390.0);
        assert_eq!(resolve_pace(Terrain::Boulder, Direction::Ascent, &paces, &adjustment), 66.0);
        // round(66 / 1.3) = round(50.77)
        assert_eq!(resolve_pace(Terrain::Boulder, Direction::Descent, &paces, &adjustment), 51.0);
    }

    #[test]
    fn multipliers_always_exceed_one() {
        for terrain in Terrain::ALL {
            assert!(descent_multiplier(terrain) > 1.0);
        }
    }

    #[test]
    fn validate_rejects_non_positive() {
        let mut paces = BasePaces::default();
        assert!(paces.validate().is_ok());
        paces.set(Terrain::Steady, 0.0);
        assert!(paces.validate().is_err());
        paces.set(Terrain::Steady, f64::NAN);
        assert!(paces.validate().is_err());
    }
}
