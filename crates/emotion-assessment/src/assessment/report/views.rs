use serde::Serialize;

use crate::assessment::catalog::{
    CombinationEmotion, CompositeStrategy, EmotionFamily, GewQuadrant, InstrumentVariant,
};
use crate::assessment::scoring::{
    ActiveCombination, CompositeScore, FamilyScore, GranularityLevel, PolarConflict, RiskFlag,
    ScoreReport,
};

#[derive(Debug, Clone, Serialize)]
pub struct FamilyScoreEntry {
    pub family: EmotionFamily,
    pub family_label: &'static str,
    pub total: u32,
    pub max_possible: u32,
    pub average: f64,
    pub selections: u8,
    pub granularity: GranularityLevel,
    pub granularity_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntensityBucketEntry {
    pub level: u8,
    pub scale_label: &'static str,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CombinationEntry {
    pub combination: CombinationEmotion,
    pub label: &'static str,
    pub tier_label: &'static str,
    pub formula: String,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConflictEntry {
    pub first_label: &'static str,
    pub second_label: &'static str,
    pub first_total: u32,
    pub second_total: u32,
    pub penalty: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompositeEntry {
    pub strategy: CompositeStrategy,
    pub strategy_label: &'static str,
    pub value: f64,
    pub scale_max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskFlagEntry {
    pub flag: RiskFlag,
    pub label: &'static str,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReportSummary {
    pub variant: InstrumentVariant,
    pub variant_label: &'static str,
    pub families: Vec<FamilyScoreEntry>,
    pub intensity: Vec<IntensityBucketEntry>,
    pub dysregulation_indicator: bool,
    pub combinations: Vec<CombinationEntry>,
    pub complexity_percentage: u8,
    pub conflicts: Vec<ConflictEntry>,
    pub conflict_penalty: u32,
    pub composites: Vec<CompositeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risk_flags: Vec<RiskFlagEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_gew_quadrant: Option<&'static str>,
    pub completion_percentage: u8,
}

impl ScoreReport {
    /// Label-carrying view for renderers that must not re-derive scores.
    pub fn summary(&self) -> ScoreReportSummary {
        let families = self.families.iter().map(FamilyScore::to_view).collect();

        let points = self.scales.labels.points();
        let intensity = (1..=5u8)
            .map(|level| IntensityBucketEntry {
                level,
                scale_label: points[usize::from(level) - 1],
                count: self.intensity.count_at(level),
            })
            .collect();

        let combinations = self
            .combinations
            .active
            .iter()
            .map(ActiveCombination::to_view)
            .collect();

        let conflicts = self.conflicts.iter().map(PolarConflict::to_view).collect();
        let composites = self.composites.iter().map(CompositeScore::to_view).collect();

        let risk_flags = self
            .risk_flags
            .iter()
            .map(|flag| RiskFlagEntry {
                flag: *flag,
                label: flag.label(),
                recommendation: flag.recommendation(),
            })
            .collect();

        ScoreReportSummary {
            variant: self.variant,
            variant_label: self.variant.label(),
            families,
            intensity,
            dysregulation_indicator: self.intensity.dysregulation_indicator,
            combinations,
            complexity_percentage: self.combinations.complexity_percentage,
            conflicts,
            conflict_penalty: self.conflict_penalty,
            composites,
            risk_flags,
            dominant_gew_quadrant: self
                .gew
                .as_ref()
                .and_then(|gew| gew.dominant_quadrant)
                .map(GewQuadrant::label),
            completion_percentage: (self.completion.fraction * 100.0).round().clamp(0.0, 100.0)
                as u8,
        }
    }
}

impl FamilyScore {
    pub fn to_view(&self) -> FamilyScoreEntry {
        FamilyScoreEntry {
            family: self.family,
            family_label: self.family.label(),
            total: self.total,
            max_possible: self.max_possible,
            average: self.average,
            selections: self.selections,
            granularity: self.granularity,
            granularity_label: self.granularity.label(),
        }
    }
}

impl ActiveCombination {
    pub fn to_view(&self) -> CombinationEntry {
        CombinationEntry {
            combination: self.combination,
            label: self.combination.label(),
            tier_label: self.tier.label(),
            formula: self.combination.formula(),
            score: self.score,
        }
    }
}

impl PolarConflict {
    pub fn to_view(&self) -> ConflictEntry {
        ConflictEntry {
            first_label: self.first.label(),
            second_label: self.second.label(),
            first_total: self.first_total,
            second_total: self.second_total,
            penalty: self.penalty,
        }
    }
}

impl CompositeScore {
    pub fn to_view(&self) -> CompositeEntry {
        CompositeEntry {
            strategy: self.strategy,
            strategy_label: self.strategy.label(),
            value: self.value,
            scale_max: self.scale_max,
        }
    }
}
