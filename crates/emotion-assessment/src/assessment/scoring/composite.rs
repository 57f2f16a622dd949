use std::collections::BTreeSet;

use super::model::{CombinationActivity, CompositeComponent, CompositeScore};
use super::rules::ScoredRatings;
use crate::assessment::catalog::CompositeStrategy;

const SIMPLE_AVERAGE_MULTIPLIER: f64 = 20.0;
const FAMILY_BREADTH_WEIGHT: f64 = 12.5;
const MEAN_INTENSITY_WEIGHT: f64 = 5.0;
const ACTIVE_COMBINATION_WEIGHT: f64 = 2.0;
const BALANCE_BASE: f64 = 100.0;
const COMBINATION_SCORE_WEIGHT: f64 = 0.5;

/// Aggregates the composite calculation needs besides the raw ratings.
pub(crate) struct CompositeInputs<'a> {
    pub ratings: &'a ScoredRatings<'a>,
    pub families_with_responses: usize,
    pub combinations: &'a CombinationActivity,
    pub conflict_penalty: u32,
}

pub(crate) fn compute(strategy: CompositeStrategy, inputs: &CompositeInputs<'_>) -> CompositeScore {
    // Nothing endorsed: every strategy reports zero rather than a formula baseline.
    let Some(mean) = inputs.ratings.mean_non_zero() else {
        return CompositeScore {
            strategy,
            value: 0.0,
            scale_max: strategy.scale_max(),
            components: Vec::new(),
        };
    };

    let (value, components) = match strategy {
        CompositeStrategy::SimpleAverage => simple_average(mean),
        CompositeStrategy::GranularityPercentage => granularity_percentage(inputs.ratings),
        CompositeStrategy::FinalWeighted => final_weighted(mean, inputs),
    };

    CompositeScore {
        strategy,
        value,
        scale_max: strategy.scale_max(),
        components,
    }
}

fn simple_average(mean: f64) -> (f64, Vec<CompositeComponent>) {
    let value = (mean * SIMPLE_AVERAGE_MULTIPLIER).round();
    let components = vec![CompositeComponent {
        term: "mean_rating".to_string(),
        value,
        notes: format!("mean non-zero rating {mean:.2} x {SIMPLE_AVERAGE_MULTIPLIER}"),
    }];
    (value, components)
}

fn granularity_percentage(ratings: &ScoredRatings<'_>) -> (f64, Vec<CompositeComponent>) {
    let distinct: BTreeSet<u8> = ratings
        .entries
        .values()
        .copied()
        .filter(|rating| (1..=5).contains(rating))
        .collect();
    let value = (distinct.len() as f64 / 5.0 * 100.0).round();
    let used = distinct
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let components = vec![CompositeComponent {
        term: "distinct_levels".to_string(),
        value,
        notes: format!("{} of 5 intensity values used ({used})", distinct.len()),
    }];
    (value, components)
}

fn final_weighted(mean: f64, inputs: &CompositeInputs<'_>) -> (f64, Vec<CompositeComponent>) {
    let breadth = inputs.families_with_responses as f64 * FAMILY_BREADTH_WEIGHT;
    let intensity = mean * MEAN_INTENSITY_WEIGHT;
    let activity = f64::from(inputs.combinations.active_count) * ACTIVE_COMBINATION_WEIGHT;
    let balance = BALANCE_BASE - f64::from(inputs.conflict_penalty);
    let blend = f64::from(inputs.combinations.total_score) * COMBINATION_SCORE_WEIGHT;

    let components = vec![
        CompositeComponent {
            term: "family_breadth".to_string(),
            value: breadth,
            notes: format!(
                "{} families endorsed x {FAMILY_BREADTH_WEIGHT}",
                inputs.families_with_responses
            ),
        },
        CompositeComponent {
            term: "mean_intensity".to_string(),
            value: intensity,
            notes: format!("mean non-zero rating {mean:.2} x {MEAN_INTENSITY_WEIGHT}"),
        },
        CompositeComponent {
            term: "combination_activity".to_string(),
            value: activity,
            notes: format!(
                "{} active combinations x {ACTIVE_COMBINATION_WEIGHT}",
                inputs.combinations.active_count
            ),
        },
        CompositeComponent {
            term: "balance".to_string(),
            value: balance,
            notes: format!("{BALANCE_BASE} minus conflict penalty {}", inputs.conflict_penalty),
        },
        CompositeComponent {
            term: "combination_intensity".to_string(),
            value: blend,
            notes: format!(
                "combination ratings sum {} x {COMBINATION_SCORE_WEIGHT}",
                inputs.combinations.total_score
            ),
        },
    ];

    let value = breadth + intensity + activity + balance + blend;
    (value, components)
}
