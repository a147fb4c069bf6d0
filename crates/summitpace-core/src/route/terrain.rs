use serde::{Deserialize, Serialize};

/// Terrain class attached to a route segment.
///
/// `Start` only marks the trailhead; it has no pace and never takes part in
/// fatigue aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainClass {
    Start,
    Flat,
    Steady,
    Boulder,
    Technical,
}

impl TerrainClass {
    /// The paced terrain, or `None` for the trailhead marker.
    pub fn paced(self) -> Option<Terrain> {
        match self {
            Self::Start => None,
            Self::Flat => Some(Terrain::Flat),
            Self::Steady => Some(Terrain::Steady),
            Self::Boulder => Some(Terrain::Boulder),
            Self::Technical => Some(Terrain::Technical),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Flat => "flat",
            Self::Steady => "steady",
            Self::Boulder => "boulder",
            Self::Technical => "technical",
        }
    }
}

impl From<Terrain> for TerrainClass {
    fn from(terrain: Terrain) -> Self {
        match terrain {
            Terrain::Flat => Self::Flat,
            Terrain::Steady => Self::Steady,
            Terrain::Boulder => Self::Boulder,
            Terrain::Technical => Self::Technical,
        }
    }
}

impl std::fmt::Display for TerrainClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Terrain that carries a pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Flat,
    Steady,
    Boulder,
    Technical,
}

impl Terrain {
    pub const ALL: [Terrain; 4] = [
        Terrain::Flat,
        Terrain::Steady,
        Terrain::Boulder,
        Terrain::Technical,
    ];

    pub fn as_str(self) -> &'static str {
        TerrainClass::from(self).as_str()
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
