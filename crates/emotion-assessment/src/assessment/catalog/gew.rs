use super::families::UnknownCatalogEntry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The twenty emotion spokes of the Geneva Emotion Wheel, listed clockwise
/// starting from the positive / high-control quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GewEmotion {
    Interest,
    Amusement,
    Pride,
    Joy,
    Pleasure,
    Contentment,
    Love,
    Admiration,
    Relief,
    Compassion,
    Sadness,
    Guilt,
    Regret,
    Shame,
    Disappointment,
    Fear,
    Disgust,
    Contempt,
    Hate,
    Anger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GewQuadrant {
    PositiveHighControl,
    PositiveLowControl,
    NegativeLowControl,
    NegativeHighControl,
}

impl GewQuadrant {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::PositiveHighControl,
            Self::PositiveLowControl,
            Self::NegativeLowControl,
            Self::NegativeHighControl,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PositiveHighControl => "Positive / high control",
            Self::PositiveLowControl => "Positive / low control",
            Self::NegativeLowControl => "Negative / low control",
            Self::NegativeHighControl => "Negative / high control",
        }
    }
}

/// One spoke of the wheel with its circumplex coordinates, each in -1.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GewPosition {
    pub emotion: GewEmotion,
    pub name: &'static str,
    pub valence: f64,
    pub power: f64,
    pub quadrant: GewQuadrant,
}

impl GewEmotion {
    pub const fn ordered() -> [Self; 20] {
        use GewEmotion::*;
        [
            Interest,
            Amusement,
            Pride,
            Joy,
            Pleasure,
            Contentment,
            Love,
            Admiration,
            Relief,
            Compassion,
            Sadness,
            Guilt,
            Regret,
            Shame,
            Disappointment,
            Fear,
            Disgust,
            Contempt,
            Hate,
            Anger,
        ]
    }

    pub const fn label(self) -> &'static str {
        use GewEmotion::*;
        match self {
            Interest => "Interest",
            Amusement => "Amusement",
            Pride => "Pride",
            Joy => "Joy",
            Pleasure => "Pleasure",
            Contentment => "Contentment",
            Love => "Love",
            Admiration => "Admiration",
            Relief => "Relief",
            Compassion => "Compassion",
            Sadness => "Sadness",
            Guilt => "Guilt",
            Regret => "Regret",
            Shame => "Shame",
            Disappointment => "Disappointment",
            Fear => "Fear",
            Disgust => "Disgust",
            Contempt => "Contempt",
            Hate => "Hate",
            Anger => "Anger",
        }
    }

    pub const fn quadrant(self) -> GewQuadrant {
        match self as usize / 5 {
            0 => GewQuadrant::PositiveHighControl,
            1 => GewQuadrant::PositiveLowControl,
            2 => GewQuadrant::NegativeLowControl,
            _ => GewQuadrant::NegativeHighControl,
        }
    }

    /// Spoke angle in degrees from the positive valence axis. Spokes run
    /// clockwise 18 degrees apart, offset half a spoke from the power axis.
    fn angle_degrees(self) -> f64 {
        90.0 - 9.0 - 18.0 * (self as usize as f64)
    }

    pub fn position(self) -> GewPosition {
        let radians = self.angle_degrees().to_radians();
        GewPosition {
            emotion: self,
            name: self.label(),
            valence: round3(radians.cos()),
            power: round3(radians.sin()),
            quadrant: self.quadrant(),
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

impl fmt::Display for GewEmotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GewEmotion {
    type Err = UnknownCatalogEntry;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|emotion| emotion.label().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownCatalogEntry::new("gew emotion", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_agree_with_quadrants() {
        for emotion in GewEmotion::ordered() {
            let position = emotion.position();
            match position.quadrant {
                GewQuadrant::PositiveHighControl => {
                    assert!(position.valence > 0.0 && position.power > 0.0, "{emotion}")
                }
                GewQuadrant::PositiveLowControl => {
                    assert!(position.valence > 0.0 && position.power < 0.0, "{emotion}")
                }
                GewQuadrant::NegativeLowControl => {
                    assert!(position.valence < 0.0 && position.power < 0.0, "{emotion}")
                }
                GewQuadrant::NegativeHighControl => {
                    assert!(position.valence < 0.0 && position.power > 0.0, "{emotion}")
                }
            }
        }
    }

    #[test]
    fn five_emotions_per_quadrant() {
        for quadrant in GewQuadrant::ordered() {
            let count = GewEmotion::ordered()
                .into_iter()
                .filter(|emotion| emotion.quadrant() == quadrant)
                .count();
            assert_eq!(count, 5);
        }
    }
}
