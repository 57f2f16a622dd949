use crate::assessment::catalog::{
    CombinationEmotion, EmotionFamily, InstrumentConfig, InstrumentVariant,
};
use crate::assessment::domain::EmotionItemKey;
use crate::assessment::responses::{ResponseSnapshot, ResponseStore};
use crate::assessment::scoring::{ScoreReport, ScoringEngine};

pub(super) fn config(variant: InstrumentVariant) -> InstrumentConfig {
    InstrumentConfig::for_variant(variant)
}

pub(super) fn level(family: EmotionFamily, emotion: &str) -> EmotionItemKey {
    EmotionItemKey::primary_named(family, emotion)
        .unwrap_or_else(|| panic!("{family} has no level named {emotion}"))
}

pub(super) fn combination(combination: CombinationEmotion) -> EmotionItemKey {
    EmotionItemKey::Combination(combination)
}

/// Records the ratings through a store so scale validation applies.
pub(super) fn snapshot(
    config: &InstrumentConfig,
    ratings: &[(EmotionItemKey, i64)],
) -> ResponseSnapshot {
    let mut store = ResponseStore::new(config.scales);
    for (key, rating) in ratings {
        store
            .set_response(key.clone(), *rating)
            .unwrap_or_else(|err| panic!("fixture rating rejected: {err}"));
    }
    store.all_responses()
}

pub(super) fn score(config: &InstrumentConfig, ratings: &[(EmotionItemKey, i64)]) -> ScoreReport {
    let responses = snapshot(config, ratings);
    ScoringEngine::new(config.clone())
        .expect("fixture configuration is valid")
        .score(&responses)
        .expect("scoring succeeds")
}
