use super::families::UnknownCatalogEntry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Self-rated affect dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Valence,
    Arousal,
    Power,
}

impl Dimension {
    pub const fn ordered() -> [Self; 3] {
        [Self::Valence, Self::Arousal, Self::Power]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Valence => "Valence",
            Self::Arousal => "Arousal",
            Self::Power => "Power",
        }
    }

    /// Endpoint descriptions shown beside the rating control (low, high).
    pub const fn anchors(self) -> (&'static str, &'static str) {
        match self {
            Self::Valence => ("Very unpleasant", "Very pleasant"),
            Self::Arousal => ("Very calm", "Very activated"),
            Self::Power => ("Not in control", "Fully in control"),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Dimension {
    type Err = UnknownCatalogEntry;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|dimension| dimension.label().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownCatalogEntry::new("dimension", value))
    }
}
