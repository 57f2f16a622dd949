use super::combinations::CombinationEmotion;
use super::dimensional::Dimension;
use super::families::{EmotionFamily, IntensityLevel, UnknownCatalogEntry};
use super::gew::GewEmotion;
use super::panas::PanasItem;
use crate::assessment::domain::{EmotionItemKey, Namespace, RatingScale, ScaleLabels, ScalePolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Assessment flavours. They share one engine and differ only in the items
/// surfaced, the scale wording, the composites reported and the rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentVariant {
    Clinical,
    Integrated,
    Unfiltered,
    Quick,
    Comprehensive,
}

impl InstrumentVariant {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Clinical,
            Self::Integrated,
            Self::Unfiltered,
            Self::Quick,
            Self::Comprehensive,
        ]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Clinical => "clinical",
            Self::Integrated => "integrated",
            Self::Unfiltered => "unfiltered",
            Self::Quick => "quick",
            Self::Comprehensive => "comprehensive",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Clinical => "Clinical Emotion Assessment",
            Self::Integrated => "Integrated Emotion Assessment",
            Self::Unfiltered => "Unfiltered Emotion Assessment",
            Self::Quick => "Quick Emotion Check-in",
            Self::Comprehensive => "Comprehensive Emotion Assessment",
        }
    }
}

impl fmt::Display for InstrumentVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for InstrumentVariant {
    type Err = UnknownCatalogEntry;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|variant| variant.slug().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownCatalogEntry::new("instrument variant", value))
    }
}

/// Composite score formulas the engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeStrategy {
    /// Mean non-zero rating x 20.
    SimpleAverage,
    /// Share of the five intensity values used anywhere, as a percentage.
    GranularityPercentage,
    /// Weighted 0..250 blend of breadth, intensity, combinations and balance.
    FinalWeighted,
}

impl CompositeStrategy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SimpleAverage => "Composite score",
            Self::GranularityPercentage => "Emotional differentiation",
            Self::FinalWeighted => "Final weighted score",
        }
    }

    pub const fn scale_max(self) -> f64 {
        match self {
            Self::SimpleAverage | Self::GranularityPercentage => 100.0,
            Self::FinalWeighted => 250.0,
        }
    }
}

/// How per-family selection counts map onto granularity bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GranularityBands {
    /// Fixed boundaries 0 / 1-3 / 4-7 / 8-12 / 13+, sized for the extended pool.
    #[default]
    Literal,
    /// Selection count normalised onto the 13-item reference pool first.
    Rescaled,
}

impl FromStr for GranularityBands {
    type Err = UnknownCatalogEntry;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "literal" => Ok(Self::Literal),
            "rescaled" => Ok(Self::Rescaled),
            other => Err(UnknownCatalogEntry::new("granularity bands", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationRules {
    None,
    Clinical,
}

/// Thresholds for the clinical rule set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClinicalThresholds {
    pub fear_total: u32,
    pub anger_total: u32,
    pub sadness_total: u32,
    pub positive_deficit_total: u32,
    pub high_intensity_fraction: f64,
}

impl Default for ClinicalThresholds {
    fn default() -> Self {
        Self {
            fear_total: 20,
            anger_total: 20,
            sadness_total: 20,
            positive_deficit_total: 10,
            high_intensity_fraction: 0.5,
        }
    }
}

/// Full parameterisation of one assessment: which items are surfaced and how
/// they are scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub variant: InstrumentVariant,
    pub scales: ScalePolicy,
    pub families: Vec<EmotionFamily>,
    pub combinations: Vec<CombinationEmotion>,
    pub include_gew: bool,
    pub include_panas: bool,
    pub include_dimensional: bool,
    pub composites: Vec<CompositeStrategy>,
    pub recommendation_rules: RecommendationRules,
    #[serde(default)]
    pub clinical_thresholds: ClinicalThresholds,
    #[serde(default)]
    pub granularity_bands: GranularityBands,
}

impl InstrumentConfig {
    pub fn for_variant(variant: InstrumentVariant) -> Self {
        let rarely_always = ScalePolicy {
            primary: RatingScale::OneToFive,
            labels: ScaleLabels::RarelyToAlways,
        };
        let not_at_all = ScalePolicy {
            primary: RatingScale::ZeroToFour,
            labels: ScaleLabels::NotAtAllToExtremely,
        };
        let families = EmotionFamily::ordered().to_vec();
        let dyads: Vec<_> = CombinationEmotion::dyads().collect();
        let all_strategies = vec![
            CompositeStrategy::SimpleAverage,
            CompositeStrategy::GranularityPercentage,
            CompositeStrategy::FinalWeighted,
        ];

        let base = Self {
            variant,
            scales: rarely_always,
            families,
            combinations: dyads,
            include_gew: false,
            include_panas: false,
            include_dimensional: false,
            composites: vec![
                CompositeStrategy::SimpleAverage,
                CompositeStrategy::GranularityPercentage,
            ],
            recommendation_rules: RecommendationRules::None,
            clinical_thresholds: ClinicalThresholds::default(),
            granularity_bands: GranularityBands::Literal,
        };

        match variant {
            InstrumentVariant::Clinical => Self {
                include_panas: true,
                include_dimensional: true,
                recommendation_rules: RecommendationRules::Clinical,
                ..base
            },
            InstrumentVariant::Integrated => Self {
                scales: not_at_all,
                include_gew: true,
                include_dimensional: true,
                ..base
            },
            InstrumentVariant::Unfiltered => Self {
                combinations: CombinationEmotion::ordered().to_vec(),
                composites: all_strategies,
                ..base
            },
            InstrumentVariant::Quick => Self {
                scales: not_at_all,
                combinations: Vec::new(),
                include_dimensional: true,
                composites: vec![CompositeStrategy::SimpleAverage],
                ..base
            },
            InstrumentVariant::Comprehensive => Self {
                combinations: CombinationEmotion::ordered().to_vec(),
                include_gew: true,
                include_panas: true,
                include_dimensional: true,
                composites: all_strategies,
                recommendation_rules: RecommendationRules::Clinical,
                ..base
            },
        }
    }

    pub fn with_granularity_bands(mut self, bands: GranularityBands) -> Self {
        self.granularity_bands = bands;
        self
    }

    pub fn scale_for(&self, namespace: Namespace) -> RatingScale {
        self.scales.scale_for(namespace)
    }

    /// Whether the key belongs to an item this configuration surfaces.
    /// Context items are always accepted.
    pub fn surfaces(&self, key: &EmotionItemKey) -> bool {
        match key {
            EmotionItemKey::Primary { family, .. } => self.families.contains(family),
            EmotionItemKey::Combination(combination) => self.combinations.contains(combination),
            EmotionItemKey::Gew(_) => self.include_gew,
            EmotionItemKey::Panas(_) => self.include_panas,
            EmotionItemKey::Dimensional(_) => self.include_dimensional,
            EmotionItemKey::Context(_) => true,
        }
    }

    /// Every item the respondent is asked to rate, in display order.
    pub fn required_keys(&self) -> Vec<EmotionItemKey> {
        let mut keys = Vec::new();
        for family in &self.families {
            keys.extend(
                IntensityLevel::ALL
                    .into_iter()
                    .map(|level| EmotionItemKey::primary(*family, level)),
            );
        }
        keys.extend(
            self.combinations
                .iter()
                .copied()
                .map(EmotionItemKey::Combination),
        );
        if self.include_gew {
            keys.extend(GewEmotion::ordered().into_iter().map(EmotionItemKey::Gew));
        }
        if self.include_panas {
            keys.extend(PanasItem::ordered().into_iter().map(EmotionItemKey::Panas));
        }
        if self.include_dimensional {
            keys.extend(
                Dimension::ordered()
                    .into_iter()
                    .map(EmotionItemKey::Dimensional),
            );
        }
        keys
    }

    /// Rejects configurations that reference catalog entries the
    /// configuration itself does not make available.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.families.is_empty() {
            return Err(ConfigurationError::NoFamilies);
        }

        let mut seen_families = HashSet::new();
        for family in &self.families {
            if !seen_families.insert(*family) {
                return Err(ConfigurationError::DuplicateFamily(*family));
            }
        }

        let mut seen_combinations = HashSet::new();
        for combination in &self.combinations {
            if !seen_combinations.insert(*combination) {
                return Err(ConfigurationError::DuplicateCombination(*combination));
            }
            if let Some(missing) = combination
                .components()
                .iter()
                .find(|family| !seen_families.contains(*family))
            {
                return Err(ConfigurationError::InactiveComponent {
                    combination: *combination,
                    family: *missing,
                });
            }
        }

        if self.recommendation_rules == RecommendationRules::Clinical {
            let needed = [
                EmotionFamily::Fear,
                EmotionFamily::Anger,
                EmotionFamily::Sadness,
                EmotionFamily::Joy,
                EmotionFamily::Trust,
            ];
            if let Some(missing) = needed
                .into_iter()
                .find(|family| !seen_families.contains(family))
            {
                return Err(ConfigurationError::RuleFamilyInactive(missing));
            }
        }

        let mut seen_strategies = HashSet::new();
        for strategy in &self.composites {
            if !seen_strategies.insert(*strategy) {
                return Err(ConfigurationError::DuplicateComposite(*strategy));
            }
        }

        Ok(())
    }
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self::for_variant(InstrumentVariant::Comprehensive)
    }
}

/// Catalog/configuration mismatch. Always a programming or deployment error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("instrument configuration activates no emotion families")]
    NoFamilies,
    #[error("family {0} is listed more than once")]
    DuplicateFamily(EmotionFamily),
    #[error("combination {0} is listed more than once")]
    DuplicateCombination(CombinationEmotion),
    #[error("combination {combination} references inactive family {family}")]
    InactiveComponent {
        combination: CombinationEmotion,
        family: EmotionFamily,
    },
    #[error("clinical rules read family {0}, which is not active")]
    RuleFamilyInactive(EmotionFamily),
    #[error("composite strategy {0:?} is listed more than once")]
    DuplicateComposite(CompositeStrategy),
}
