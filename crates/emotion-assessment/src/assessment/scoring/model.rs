use serde::{Deserialize, Serialize};

use super::clinical::RiskFlag;
use crate::assessment::catalog::{
    CombinationEmotion, CombinationTier, CompositeStrategy, Dimension, EmotionFamily,
    GewEmotion, GewQuadrant, GranularityBands, InstrumentVariant,
};
use crate::assessment::domain::ScalePolicy;

/// Ordinal granularity band for one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GranularityLevel {
    Void,
    Minimal,
    Moderate,
    High,
    Maximum,
}

impl GranularityLevel {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Void => "Void",
            Self::Minimal => "Minimal",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Maximum => "Maximum",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyScore {
    pub family: EmotionFamily,
    /// Sum of the five level ratings, unanswered counted as zero.
    pub total: u32,
    /// Total divided by the number of non-zero ratings; display only.
    pub average: f64,
    /// Level items rated above zero.
    pub selections: u8,
    /// Level items with any explicit answer, zero included.
    pub answered: u8,
    pub granularity: GranularityLevel,
    pub max_possible: u32,
}

impl FamilyScore {
    pub fn has_response(&self) -> bool {
        self.selections > 0
    }
}

/// Counts of answered items per common intensity bucket (1..=5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityHistogram {
    pub counts: [u32; 5],
    pub answered: u32,
    pub high_intensity_fraction: f64,
    pub dysregulation_indicator: bool,
}

impl IntensityHistogram {
    pub fn count_at(&self, bucket: u8) -> u32 {
        match bucket {
            1..=5 => self.counts[usize::from(bucket) - 1],
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCombination {
    pub combination: CombinationEmotion,
    pub tier: CombinationTier,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationActivity {
    pub active: Vec<ActiveCombination>,
    pub active_count: u32,
    pub complexity_percentage: u8,
    pub total_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolarConflict {
    pub first: EmotionFamily,
    pub second: EmotionFamily,
    pub first_total: u32,
    pub second_total: u32,
    pub penalty: u32,
}

/// One additive term of a composite, kept for transparent reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeComponent {
    pub term: String,
    pub value: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub strategy: CompositeStrategy,
    pub value: f64,
    pub scale_max: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<CompositeComponent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanasScore {
    pub positive_affect: u32,
    pub negative_affect: u32,
    pub positive_answered: u8,
    pub negative_answered: u8,
    pub affect_balance: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GewQuadrantScore {
    pub quadrant: GewQuadrant,
    pub total: u32,
    pub answered: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GewProfile {
    pub quadrants: Vec<GewQuadrantScore>,
    /// Rating-weighted mean valence coordinate, -1.0..=1.0.
    pub valence_index: f64,
    /// Rating-weighted mean power coordinate, -1.0..=1.0.
    pub power_index: f64,
    pub dominant_quadrant: Option<GewQuadrant>,
    pub strongest: Option<GewEmotion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionReading {
    pub dimension: Dimension,
    pub rating: u8,
    /// Rating minus the scale midpoint.
    pub centered: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionalProfile {
    pub readings: Vec<DimensionReading>,
}

impl DimensionalProfile {
    pub fn reading(&self, dimension: Dimension) -> Option<&DimensionReading> {
        self.readings
            .iter()
            .find(|reading| reading.dimension == dimension)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSummary {
    pub required: u32,
    pub answered: u32,
    pub fraction: f64,
}

/// Derived result of one scoring run. Always recomputed in full, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub variant: InstrumentVariant,
    pub scales: ScalePolicy,
    pub granularity_bands: GranularityBands,
    pub families: Vec<FamilyScore>,
    pub intensity: IntensityHistogram,
    pub combinations: CombinationActivity,
    pub conflicts: Vec<PolarConflict>,
    pub conflict_penalty: u32,
    pub composites: Vec<CompositeScore>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risk_flags: Vec<RiskFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panas: Option<PanasScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gew: Option<GewProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensional: Option<DimensionalProfile>,
    pub completion: CompletionSummary,
}

impl ScoreReport {
    pub fn family(&self, family: EmotionFamily) -> Option<&FamilyScore> {
        self.families.iter().find(|score| score.family == family)
    }

    /// Family total, zero for families the variant does not surface.
    pub fn family_total(&self, family: EmotionFamily) -> u32 {
        self.family(family).map(|score| score.total).unwrap_or(0)
    }

    pub fn composite(&self, strategy: CompositeStrategy) -> Option<&CompositeScore> {
        self.composites
            .iter()
            .find(|composite| composite.strategy == strategy)
    }

    pub fn families_with_responses(&self) -> usize {
        self.families
            .iter()
            .filter(|score| score.has_response())
            .count()
    }
}
