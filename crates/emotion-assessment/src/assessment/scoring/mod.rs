//! Pure scoring pipeline: a response snapshot plus an instrument configuration
//! in, a [`ScoreReport`] out.

mod clinical;
mod composite;
mod instruments;
mod model;
mod rules;

#[cfg(test)]
mod tests;

pub use clinical::RiskFlag;
pub use model::{
    ActiveCombination, CombinationActivity, CompletionSummary, CompositeComponent,
    CompositeScore, DimensionReading, DimensionalProfile, FamilyScore, GewProfile,
    GewQuadrantScore, GranularityLevel, IntensityHistogram, PanasScore, PolarConflict,
    ScoreReport,
};

use crate::assessment::catalog::{ConfigurationError, InstrumentConfig, RecommendationRules};
use crate::assessment::responses::ResponseSnapshot;
use composite::CompositeInputs;
use rules::ScoredRatings;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Stateless scorer bound to a validated configuration.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: InstrumentConfig,
}

impl ScoringEngine {
    pub fn new(config: InstrumentConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &InstrumentConfig {
        &self.config
    }

    pub fn score(&self, responses: &ResponseSnapshot) -> Result<ScoreReport, ScoringError> {
        let config = &self.config;
        let ratings = surfaced_ratings(responses, config)?;

        let families = rules::family_scores(&ratings, config);
        let intensity = rules::intensity_histogram(&ratings, config);
        let combinations = rules::combination_activity(&ratings, config);
        let conflicts = rules::polar_conflicts(&families);
        let conflict_penalty: u32 = conflicts.iter().map(|conflict| conflict.penalty).sum();

        let inputs = CompositeInputs {
            ratings: &ratings,
            families_with_responses: families.iter().filter(|score| score.has_response()).count(),
            combinations: &combinations,
            conflict_penalty,
        };
        let composites = config
            .composites
            .iter()
            .map(|strategy| composite::compute(*strategy, &inputs))
            .collect();

        let risk_flags = match config.recommendation_rules {
            RecommendationRules::Clinical => {
                clinical::evaluate(&families, &intensity, &config.clinical_thresholds)
            }
            RecommendationRules::None => Vec::new(),
        };

        let required = config.required_keys();
        let answered = required
            .iter()
            .filter(|key| responses.rating(key).is_some())
            .count();
        let completion = CompletionSummary {
            required: required.len() as u32,
            answered: answered as u32,
            fraction: if required.is_empty() {
                1.0
            } else {
                answered as f64 / required.len() as f64
            },
        };

        let report = ScoreReport {
            variant: config.variant,
            scales: config.scales,
            granularity_bands: config.granularity_bands,
            intensity,
            conflicts,
            conflict_penalty,
            composites,
            risk_flags,
            panas: config.include_panas.then(|| instruments::panas(&ratings)),
            gew: config.include_gew.then(|| instruments::gew(&ratings)),
            dimensional: config
                .include_dimensional
                .then(|| instruments::dimensional(&ratings, config)),
            completion,
            families,
            combinations,
        };

        debug!(
            variant = %report.variant,
            answered = report.intensity.answered,
            conflicts = report.conflicts.len(),
            active_combinations = report.combinations.active_count,
            "assessment scored"
        );

        Ok(report)
    }
}

/// Validates `config` and scores one snapshot against it.
pub fn compute_score_report(
    responses: &ResponseSnapshot,
    config: &InstrumentConfig,
) -> Result<ScoreReport, ScoringError> {
    ScoringEngine::new(config.clone())?.score(responses)
}

fn surfaced_ratings<'a>(
    responses: &'a ResponseSnapshot,
    config: &InstrumentConfig,
) -> Result<ScoredRatings<'a>, ScoringError> {
    let mut entries = BTreeMap::new();
    let mut ignored = 0usize;
    for (key, rating) in responses.iter() {
        if !config.surfaces(key) {
            ignored += 1;
            continue;
        }
        let scale = config.scale_for(key.namespace());
        if !scale.contains(i64::from(rating)) {
            return Err(ScoringError::InvalidRating {
                key: key.to_string(),
                rating,
                min: scale.min(),
                max: scale.max(),
            });
        }
        entries.insert(key, rating);
    }

    if ignored > 0 {
        warn!(
            ignored,
            variant = %config.variant,
            "responses outside the configured instrument were ignored"
        );
    }

    Ok(ScoredRatings { entries })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("rating {rating} for {key} reached the scorer outside the scale {min}..={max}")]
    InvalidRating {
        key: String,
        rating: u8,
        min: u8,
        max: u8,
    },
}
