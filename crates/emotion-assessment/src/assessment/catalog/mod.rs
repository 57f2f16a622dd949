//! Compiled-in emotion taxonomies. Nothing here can fail or change at runtime.

mod combinations;
mod dimensional;
mod families;
mod gew;
mod panas;
mod variant;

pub use combinations::{CombinationDefinition, CombinationEmotion, CombinationTier, DYAD_COUNT};
pub use dimensional::Dimension;
pub use families::{
    EmotionFamily, FamilyValence, IntensityLevel, IntensityLevelDefinition, UnknownCatalogEntry,
};
pub use gew::{GewEmotion, GewPosition, GewQuadrant};
pub use panas::{panas_items, AffectPolarity, PanasItem};
pub use variant::{
    ClinicalThresholds, CompositeStrategy, ConfigurationError, GranularityBands,
    InstrumentConfig, InstrumentVariant, RecommendationRules,
};

use super::domain::{RatingScale, ScaleLabels};
use serde::Serialize;

/// Fixed polar-opposite family pairs, used for conflict detection only.
pub const POLAR_OPPOSITES: [(EmotionFamily, EmotionFamily); 4] = [
    (EmotionFamily::Joy, EmotionFamily::Sadness),
    (EmotionFamily::Trust, EmotionFamily::Disgust),
    (EmotionFamily::Fear, EmotionFamily::Anger),
    (EmotionFamily::Surprise, EmotionFamily::Anticipation),
];

pub fn family_levels(family: EmotionFamily) -> [IntensityLevelDefinition; 5] {
    family.level_definitions()
}

pub fn all_combinations() -> Vec<CombinationDefinition> {
    CombinationEmotion::ordered()
        .into_iter()
        .map(CombinationEmotion::definition)
        .collect()
}

pub const fn polar_opposites() -> [(EmotionFamily, EmotionFamily); 4] {
    POLAR_OPPOSITES
}

pub fn gew_circumplex() -> Vec<GewPosition> {
    GewEmotion::ordered()
        .into_iter()
        .map(GewEmotion::position)
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct FamilyCatalogEntry {
    pub family: EmotionFamily,
    pub label: &'static str,
    pub levels: Vec<IntensityLevelDefinition>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScaleView {
    pub min: u8,
    pub max: u8,
    pub labels: [&'static str; 5],
}

impl ScaleView {
    fn new(scale: RatingScale, labels: ScaleLabels) -> Self {
        Self {
            min: scale.min(),
            max: scale.max(),
            labels: labels.points(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PanasCatalogEntry {
    pub positive: Vec<&'static str>,
    pub negative: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionCatalogEntry {
    pub dimension: Dimension,
    pub label: &'static str,
    pub low_anchor: &'static str,
    pub high_anchor: &'static str,
}

/// The subset of the catalog surfaced by one configuration, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub variant: InstrumentVariant,
    pub title: &'static str,
    pub primary_scale: ScaleView,
    pub item_scale: ScaleView,
    pub families: Vec<FamilyCatalogEntry>,
    pub combinations: Vec<CombinationDefinition>,
    pub polar_opposites: Vec<(EmotionFamily, EmotionFamily)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gew: Option<Vec<GewPosition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panas: Option<PanasCatalogEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Vec<DimensionCatalogEntry>>,
}

impl CatalogView {
    pub fn for_config(config: &InstrumentConfig) -> Self {
        let families = config
            .families
            .iter()
            .map(|family| FamilyCatalogEntry {
                family: *family,
                label: family.label(),
                levels: family.level_definitions().to_vec(),
            })
            .collect();

        let panas = config.include_panas.then(|| {
            let (positive, negative) = panas_items();
            PanasCatalogEntry {
                positive: positive.iter().map(|item| item.label()).collect(),
                negative: negative.iter().map(|item| item.label()).collect(),
            }
        });

        let dimensions = config.include_dimensional.then(|| {
            Dimension::ordered()
                .into_iter()
                .map(|dimension| {
                    let (low_anchor, high_anchor) = dimension.anchors();
                    DimensionCatalogEntry {
                        dimension,
                        label: dimension.label(),
                        low_anchor,
                        high_anchor,
                    }
                })
                .collect()
        });

        Self {
            variant: config.variant,
            title: config.variant.label(),
            primary_scale: ScaleView::new(config.scales.primary, config.scales.labels),
            item_scale: ScaleView::new(RatingScale::OneToFive, ScaleLabels::RarelyToAlways),
            families,
            combinations: config
                .combinations
                .iter()
                .map(|combination| combination.definition())
                .collect(),
            polar_opposites: POLAR_OPPOSITES.to_vec(),
            gew: config.include_gew.then(gew_circumplex),
            panas,
            dimensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_opposites_cover_every_family_once() {
        let mut families: Vec<_> = POLAR_OPPOSITES
            .iter()
            .flat_map(|(a, b)| [*a, *b])
            .collect();
        families.sort();
        assert_eq!(families, EmotionFamily::ordered().to_vec());
        for (a, b) in polar_opposites() {
            assert_eq!(a.opposite(), b);
        }
    }

    #[test]
    fn catalog_view_surfaces_variant_subset() {
        let quick = CatalogView::for_config(&InstrumentConfig::for_variant(InstrumentVariant::Quick));
        assert_eq!(quick.families.len(), 8);
        assert!(quick.combinations.is_empty());
        assert!(quick.gew.is_none());
        assert_eq!(quick.primary_scale.labels[0], "Not at all");

        let clinical =
            CatalogView::for_config(&InstrumentConfig::for_variant(InstrumentVariant::Clinical));
        assert_eq!(clinical.combinations.len(), DYAD_COUNT);
        assert_eq!(clinical.primary_scale.labels[4], "Always");
        assert!(clinical.panas.is_some());
        assert_eq!(all_combinations().len(), 28);
        assert_eq!(gew_circumplex().len(), 20);
    }
}
