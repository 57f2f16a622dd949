use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{EmotionItemKey, KeyParseError, RatingScale, ScalePolicy};

/// Latest rating recorded for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub rating: u8,
    pub recorded_at: DateTime<Utc>,
}

/// Per-session answers. Later writes to the same key replace earlier ones.
#[derive(Debug, Clone)]
pub struct ResponseStore {
    scales: ScalePolicy,
    responses: BTreeMap<EmotionItemKey, AssessmentResponse>,
}

impl ResponseStore {
    pub fn new(scales: ScalePolicy) -> Self {
        Self {
            scales,
            responses: BTreeMap::new(),
        }
    }

    pub fn scales(&self) -> ScalePolicy {
        self.scales
    }

    pub fn set_response(&mut self, key: EmotionItemKey, rating: i64) -> Result<(), ResponseError> {
        self.set_response_at(key, rating, Utc::now())
    }

    /// Records a rating with an explicit timestamp (imports, tests).
    pub fn set_response_at(
        &mut self,
        key: EmotionItemKey,
        rating: i64,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), ResponseError> {
        key.validate()?;
        let scale = self.scales.scale_for(key.namespace());
        let rating = validate_rating(&key, rating, scale)?;
        debug!(key = %key, rating, "response recorded");
        self.responses.insert(
            key,
            AssessmentResponse {
                rating,
                recorded_at,
            },
        );
        Ok(())
    }

    /// `None` means the item has not been answered.
    pub fn get_response(&self, key: &EmotionItemKey) -> Option<u8> {
        self.responses.get(key).map(|response| response.rating)
    }

    pub fn response(&self, key: &EmotionItemKey) -> Option<&AssessmentResponse> {
        self.responses.get(key)
    }

    pub fn remove_response(&mut self, key: &EmotionItemKey) -> Option<AssessmentResponse> {
        self.responses.remove(key)
    }

    /// Owned copy of the current ratings; later writes do not affect it.
    pub fn all_responses(&self) -> ResponseSnapshot {
        ResponseSnapshot {
            ratings: self
                .responses
                .iter()
                .map(|(key, response)| (key.clone(), response.rating))
                .collect(),
        }
    }

    /// Share of `required` keys with an explicit answer, including a recorded 0.
    /// An empty requirement list counts as complete.
    pub fn completion_fraction(&self, required: &[EmotionItemKey]) -> f64 {
        if required.is_empty() {
            return 1.0;
        }
        let answered = required
            .iter()
            .filter(|key| self.responses.contains_key(key))
            .count();
        answered as f64 / required.len() as f64
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn reset(&mut self) {
        self.responses.clear();
    }

    /// Flat `{ "namespace.item": rating }` document for local storage.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.all_responses().ratings)
    }

    /// Rebuilds a store from [`ResponseStore::to_json`] output, re-validating
    /// every key and rating against `scales`.
    pub fn from_json(scales: ScalePolicy, document: &str) -> Result<Self, ResponseError> {
        let raw: BTreeMap<String, i64> = serde_json::from_str(document)
            .map_err(|source| ResponseError::Persistence(source.to_string()))?;
        Self::from_raw(scales, raw)
    }

    /// Builds a store from string keys, as received over HTTP or from disk.
    pub fn from_raw<I>(scales: ScalePolicy, raw: I) -> Result<Self, ResponseError>
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        let mut store = Self::new(scales);
        let recorded_at = Utc::now();
        for (key, rating) in raw {
            let key: EmotionItemKey = key.parse()?;
            store.set_response_at(key, rating, recorded_at)?;
        }
        Ok(store)
    }
}

fn validate_rating(
    key: &EmotionItemKey,
    rating: i64,
    scale: RatingScale,
) -> Result<u8, ResponseError> {
    if !scale.contains(rating) {
        return Err(ResponseError::InvalidRating {
            key: key.to_string(),
            rating,
            min: scale.min(),
            max: scale.max(),
        });
    }
    u8::try_from(rating).map_err(|_| ResponseError::InvalidRating {
        key: key.to_string(),
        rating,
        min: scale.min(),
        max: scale.max(),
    })
}

/// Immutable ratings view handed to the scoring engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSnapshot {
    ratings: BTreeMap<EmotionItemKey, u8>,
}

impl ResponseSnapshot {
    pub fn rating(&self, key: &EmotionItemKey) -> Option<u8> {
        self.ratings.get(key).copied()
    }

    /// Rating with unanswered treated as zero.
    pub fn rating_or_zero(&self, key: &EmotionItemKey) -> u8 {
        self.rating(key).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EmotionItemKey, u8)> {
        self.ratings.iter().map(|(key, rating)| (key, *rating))
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl FromIterator<(EmotionItemKey, u8)> for ResponseSnapshot {
    fn from_iter<T: IntoIterator<Item = (EmotionItemKey, u8)>>(iter: T) -> Self {
        Self {
            ratings: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("rating {rating} for {key} is outside the scale {min}..={max}")]
    InvalidRating {
        key: String,
        rating: i64,
        min: u8,
        max: u8,
    },
    #[error(transparent)]
    UnknownKey(#[from] KeyParseError),
    #[error("stored responses could not be read: {0}")]
    Persistence(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::{CombinationEmotion, EmotionFamily, IntensityLevel};
    use crate::assessment::domain::ScaleLabels;
    use chrono::TimeZone;

    fn zero_based() -> ScalePolicy {
        ScalePolicy {
            primary: RatingScale::ZeroToFour,
            labels: ScaleLabels::NotAtAllToExtremely,
        }
    }

    fn joy(level: u8) -> EmotionItemKey {
        EmotionItemKey::primary(
            EmotionFamily::Joy,
            IntensityLevel::new(level).expect("valid level"),
        )
    }

    #[test]
    fn rejects_out_of_range_ratings() {
        let mut store = ResponseStore::new(zero_based());
        let err = store.set_response(joy(1), 5).expect_err("5 outside 0..=4");
        assert!(matches!(err, ResponseError::InvalidRating { max: 4, .. }));
        assert!(store
            .set_response(EmotionItemKey::Combination(CombinationEmotion::Love), 0)
            .is_err());
        assert!(store.set_response(joy(1), -1).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn last_write_wins() {
        let mut store = ResponseStore::new(zero_based());
        let first = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("valid");
        let second = Utc.with_ymd_and_hms(2025, 3, 1, 9, 5, 0).single().expect("valid");
        store.set_response_at(joy(2), 1, first).expect("valid rating");
        store.set_response_at(joy(2), 3, second).expect("valid rating");

        let response = store.response(&joy(2)).expect("answered");
        assert_eq!(response.rating, 3);
        assert_eq!(response.recorded_at, second);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn snapshot_is_isolated_from_later_writes() {
        let mut store = ResponseStore::new(zero_based());
        store.set_response(joy(1), 2).expect("valid");
        let snapshot = store.all_responses();
        store.set_response(joy(1), 4).expect("valid");
        store.set_response(joy(3), 1).expect("valid");

        assert_eq!(snapshot.rating(&joy(1)), Some(2));
        assert_eq!(snapshot.rating(&joy(3)), None);
    }

    #[test]
    fn completion_counts_explicit_zero() {
        let mut store = ResponseStore::new(zero_based());
        store.set_response(joy(1), 0).expect("zero allowed on 0..=4");
        let required = vec![joy(1), joy(2)];

        assert_eq!(store.get_response(&joy(1)), Some(0));
        assert_eq!(store.get_response(&joy(2)), None);
        assert!((store.completion_fraction(&required) - 0.5).abs() < f64::EPSILON);
        assert_eq!(store.completion_fraction(&[]), 1.0);
    }

    #[test]
    fn json_round_trip_preserves_answers() {
        let mut store = ResponseStore::new(zero_based());
        store.set_response(joy(1), 0).expect("valid");
        store.set_response(joy(5), 4).expect("valid");
        store
            .set_response(EmotionItemKey::Combination(CombinationEmotion::Awe), 3)
            .expect("valid");
        store
            .set_response(EmotionItemKey::context("sleep quality").expect("named context"), 2)
            .expect("valid");

        let document = store.to_json().expect("serializes");
        let restored = ResponseStore::from_json(zero_based(), &document).expect("restores");

        for key in [
            joy(1),
            joy(2),
            joy(5),
            EmotionItemKey::Combination(CombinationEmotion::Awe),
            EmotionItemKey::context("sleep quality").expect("named context"),
        ] {
            assert_eq!(restored.get_response(&key), store.get_response(&key), "{key}");
        }
    }

    #[test]
    fn from_json_rejects_unknown_keys() {
        let err = ResponseStore::from_json(zero_based(), r#"{"primary.joy.bliss": 2}"#)
            .expect_err("bliss is not a joy level");
        assert!(matches!(err, ResponseError::UnknownKey(_)));
    }

    #[test]
    fn unparseable_context_keys_never_reach_the_saved_session() {
        let mut store = ResponseStore::new(zero_based());
        store
            .set_response(EmotionItemKey::context("sleep quality").expect("named context"), 3)
            .expect("valid");

        let err = store
            .set_response(EmotionItemKey::Context("   ".to_string()), 3)
            .expect_err("blank context name");
        assert!(matches!(err, ResponseError::UnknownKey(_)));
        assert_eq!(store.len(), 1);

        let document = store.to_json().expect("serializes");
        let restored = ResponseStore::from_json(zero_based(), &document).expect("restores");
        assert_eq!(restored.all_responses(), store.all_responses());
    }
}
