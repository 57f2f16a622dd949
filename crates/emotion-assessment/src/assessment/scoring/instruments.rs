//! Scorers for the instruments that sit beside the Plutchik families: PANAS,
//! the Geneva Emotion Wheel and the dimensional ratings.

use super::model::{
    DimensionReading, DimensionalProfile, GewProfile, GewQuadrantScore, PanasScore,
};
use super::rules::ScoredRatings;
use crate::assessment::catalog::{
    AffectPolarity, Dimension, GewEmotion, GewQuadrant, InstrumentConfig, PanasItem,
};
use crate::assessment::domain::{EmotionItemKey, Namespace};

/// PANAS affect is a plain sum of the ten items per side, never an average.
pub(crate) fn panas(ratings: &ScoredRatings<'_>) -> PanasScore {
    let side = |polarity: AffectPolarity| {
        PanasItem::with_polarity(polarity)
            .filter_map(|item| ratings.rating(&EmotionItemKey::Panas(item)))
            .fold((0u32, 0u8), |(sum, answered), rating| {
                (sum + u32::from(rating), answered + 1)
            })
    };
    let (positive_affect, positive_answered) = side(AffectPolarity::Positive);
    let (negative_affect, negative_answered) = side(AffectPolarity::Negative);

    PanasScore {
        positive_affect,
        negative_affect,
        positive_answered,
        negative_answered,
        affect_balance: positive_affect as i32 - negative_affect as i32,
    }
}

pub(crate) fn gew(ratings: &ScoredRatings<'_>) -> GewProfile {
    let answered: Vec<(GewEmotion, u8)> = GewEmotion::ordered()
        .into_iter()
        .filter_map(|emotion| {
            ratings
                .rating(&EmotionItemKey::Gew(emotion))
                .map(|rating| (emotion, rating))
        })
        .collect();

    let quadrants: Vec<GewQuadrantScore> = GewQuadrant::ordered()
        .into_iter()
        .map(|quadrant| {
            let in_quadrant = answered
                .iter()
                .filter(|(emotion, _)| emotion.quadrant() == quadrant);
            GewQuadrantScore {
                quadrant,
                total: in_quadrant
                    .clone()
                    .map(|(_, rating)| u32::from(*rating))
                    .sum(),
                answered: in_quadrant.count() as u8,
            }
        })
        .collect();

    let weight: f64 = answered
        .iter()
        .map(|(_, rating)| f64::from(*rating))
        .sum();
    let (valence_index, power_index) = if weight > 0.0 {
        let (valence, power) =
            answered
                .iter()
                .fold((0.0, 0.0), |(valence, power), (emotion, rating)| {
                    let position = emotion.position();
                    let rating = f64::from(*rating);
                    (
                        valence + position.valence * rating,
                        power + position.power * rating,
                    )
                });
        (round3(valence / weight), round3(power / weight))
    } else {
        (0.0, 0.0)
    };

    // First-declared wins ties, so only a strictly greater value replaces the leader.
    let dominant_quadrant = quadrants
        .iter()
        .filter(|score| score.total > 0)
        .fold(None::<&GewQuadrantScore>, |best, score| match best {
            Some(current) if current.total >= score.total => Some(current),
            _ => Some(score),
        })
        .map(|score| score.quadrant);

    let strongest = answered
        .iter()
        .filter(|(_, rating)| *rating > 0)
        .fold(None::<(GewEmotion, u8)>, |best, (emotion, rating)| match best {
            Some((_, current)) if current >= *rating => best,
            _ => Some((*emotion, *rating)),
        })
        .map(|(emotion, _)| emotion);

    GewProfile {
        quadrants,
        valence_index,
        power_index,
        dominant_quadrant,
        strongest,
    }
}

pub(crate) fn dimensional(
    ratings: &ScoredRatings<'_>,
    config: &InstrumentConfig,
) -> DimensionalProfile {
    let midpoint = config.scale_for(Namespace::Dimensional).midpoint();
    let readings = Dimension::ordered()
        .into_iter()
        .filter_map(|dimension| {
            ratings
                .rating(&EmotionItemKey::Dimensional(dimension))
                .map(|rating| DimensionReading {
                    dimension,
                    rating,
                    centered: f64::from(rating) - midpoint,
                })
        })
        .collect();

    DimensionalProfile { readings }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
