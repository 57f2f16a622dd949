use super::model::{
    ActiveCombination, CombinationActivity, FamilyScore, GranularityLevel, IntensityHistogram,
    PolarConflict,
};
use crate::assessment::catalog::{
    EmotionFamily, GranularityBands, InstrumentConfig, IntensityLevel, DYAD_COUNT,
    POLAR_OPPOSITES,
};
use crate::assessment::domain::EmotionItemKey;
use std::collections::BTreeMap;

/// Points deducted per detected polar conflict.
pub(crate) const CONFLICT_PENALTY: u32 = 10;
/// Share of answers at buckets 4 and 5 above which the dysregulation indicator is set.
pub(crate) const DYSREGULATION_FRACTION: f64 = 0.5;
/// Item pool the literal granularity boundaries were sized for.
const REFERENCE_POOL: usize = 13;

/// Ratings that survived filtering to the configuration's surfaced items.
pub(crate) struct ScoredRatings<'a> {
    pub entries: BTreeMap<&'a EmotionItemKey, u8>,
}

impl ScoredRatings<'_> {
    pub fn rating(&self, key: &EmotionItemKey) -> Option<u8> {
        self.entries.get(key).copied()
    }

    pub fn non_zero(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.values().copied().filter(|rating| *rating > 0)
    }

    pub fn mean_non_zero(&self) -> Option<f64> {
        let (sum, count) = self
            .non_zero()
            .fold((0u32, 0u32), |(sum, count), rating| {
                (sum + u32::from(rating), count + 1)
            });
        (count > 0).then(|| f64::from(sum) / f64::from(count))
    }
}

pub(crate) fn family_scores(ratings: &ScoredRatings<'_>, config: &InstrumentConfig) -> Vec<FamilyScore> {
    let scale = config.scales.primary;
    config
        .families
        .iter()
        .map(|family| {
            let mut total = 0u32;
            let mut selections = 0u8;
            let mut answered = 0u8;
            for level in IntensityLevel::ALL {
                if let Some(rating) = ratings.rating(&EmotionItemKey::primary(*family, level)) {
                    answered += 1;
                    total += u32::from(rating);
                    if rating > 0 {
                        selections += 1;
                    }
                }
            }

            let average = if selections > 0 {
                f64::from(total) / f64::from(selections)
            } else {
                0.0
            };

            FamilyScore {
                family: *family,
                total,
                average,
                selections,
                answered,
                granularity: classify_granularity(
                    usize::from(selections),
                    IntensityLevel::ALL.len(),
                    config.granularity_bands,
                ),
                max_possible: IntensityLevel::ALL.len() as u32 * u32::from(scale.max()),
            }
        })
        .collect()
}

pub(crate) fn classify_granularity(
    selections: usize,
    pool: usize,
    bands: GranularityBands,
) -> GranularityLevel {
    let effective = match bands {
        GranularityBands::Literal => selections,
        GranularityBands::Rescaled if pool == 0 => 0,
        GranularityBands::Rescaled => (selections * REFERENCE_POOL).div_ceil(pool),
    };

    match effective {
        0 => GranularityLevel::Void,
        1..=3 => GranularityLevel::Minimal,
        4..=7 => GranularityLevel::Moderate,
        8..=12 => GranularityLevel::High,
        _ => GranularityLevel::Maximum,
    }
}

pub(crate) fn intensity_histogram(
    ratings: &ScoredRatings<'_>,
    config: &InstrumentConfig,
) -> IntensityHistogram {
    let mut counts = [0u32; 5];
    // A zero is "not endorsed" and counts the same as a missing answer.
    for (key, rating) in ratings.entries.iter().filter(|(_, rating)| **rating > 0) {
        let bucket = config.scale_for(key.namespace()).bucket(*rating);
        counts[usize::from(bucket) - 1] += 1;
    }

    let answered: u32 = counts.iter().sum();
    let high_intensity_fraction = if answered > 0 {
        f64::from(counts[3] + counts[4]) / f64::from(answered)
    } else {
        0.0
    };

    IntensityHistogram {
        counts,
        answered,
        high_intensity_fraction,
        dysregulation_indicator: high_intensity_fraction > DYSREGULATION_FRACTION,
    }
}

pub(crate) fn combination_activity(
    ratings: &ScoredRatings<'_>,
    config: &InstrumentConfig,
) -> CombinationActivity {
    let active: Vec<ActiveCombination> = config
        .combinations
        .iter()
        .filter_map(|combination| {
            let score = ratings.rating(&EmotionItemKey::Combination(*combination))?;
            (score > 0).then_some(ActiveCombination {
                combination: *combination,
                tier: combination.tier(),
                score,
            })
        })
        .collect();

    let active_count = active.len() as u32;
    let total_score = active.iter().map(|entry| u32::from(entry.score)).sum();
    let complexity = (f64::from(active_count) / DYAD_COUNT as f64 * 100.0)
        .round()
        .min(100.0);

    CombinationActivity {
        active,
        active_count,
        complexity_percentage: complexity as u8,
        total_score,
    }
}

pub(crate) fn polar_conflicts(families: &[FamilyScore]) -> Vec<PolarConflict> {
    let score_for = |family: EmotionFamily| families.iter().find(|score| score.family == family);

    POLAR_OPPOSITES
        .iter()
        .filter_map(|(first, second)| {
            let first_score = score_for(*first)?;
            let second_score = score_for(*second)?;
            (first_score.has_response() && second_score.has_response()).then(|| PolarConflict {
                first: *first,
                second: *second,
                first_total: first_score.total,
                second_total: second_score.total,
                penalty: CONFLICT_PENALTY,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_bands_follow_fixed_boundaries() {
        let bands = GranularityBands::Literal;
        assert_eq!(classify_granularity(0, 5, bands), GranularityLevel::Void);
        assert_eq!(classify_granularity(3, 5, bands), GranularityLevel::Minimal);
        assert_eq!(classify_granularity(4, 5, bands), GranularityLevel::Moderate);
        assert_eq!(classify_granularity(5, 5, bands), GranularityLevel::Moderate);
        assert_eq!(classify_granularity(12, 40, bands), GranularityLevel::High);
        assert_eq!(classify_granularity(13, 40, bands), GranularityLevel::Maximum);
    }

    #[test]
    fn rescaled_bands_reach_every_level_for_five_items() {
        let bands = GranularityBands::Rescaled;
        let levels: Vec<_> = (0..=5)
            .map(|selections| classify_granularity(selections, 5, bands))
            .collect();
        assert_eq!(
            levels,
            vec![
                GranularityLevel::Void,
                GranularityLevel::Minimal,
                GranularityLevel::Moderate,
                GranularityLevel::High,
                GranularityLevel::High,
                GranularityLevel::Maximum,
            ]
        );
        assert_eq!(classify_granularity(0, 0, bands), GranularityLevel::Void);
    }
}
