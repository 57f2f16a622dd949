use super::families::{EmotionFamily, UnknownCatalogEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Denominator for the complexity percentage: the number of dyads in the
/// canonical catalog.
pub const DYAD_COUNT: usize = 24;

/// Named blend emotion. Each one is rated directly by the respondent; the
/// component families are descriptive only and never used to derive a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationEmotion {
    // primary dyads
    Love,
    Submission,
    Awe,
    Disapproval,
    Remorse,
    Contempt,
    Aggressiveness,
    Optimism,
    // secondary dyads
    Guilt,
    Curiosity,
    Despair,
    Unbelief,
    Envy,
    Cynicism,
    Pride,
    Hope,
    // tertiary dyads
    Delight,
    Sentimentality,
    Shame,
    Outrage,
    Pessimism,
    Morbidness,
    Dominance,
    Anxiety,
    // triads
    Nostalgia,
    Jealousy,
    Gratitude,
    Resentment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationTier {
    PrimaryDyad,
    SecondaryDyad,
    TertiaryDyad,
    Triad,
}

impl CombinationTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PrimaryDyad => "Primary dyad",
            Self::SecondaryDyad => "Secondary dyad",
            Self::TertiaryDyad => "Tertiary dyad",
            Self::Triad => "Triad",
        }
    }

    pub const fn is_dyad(self) -> bool {
        !matches!(self, Self::Triad)
    }
}

impl CombinationEmotion {
    pub const fn ordered() -> [Self; 28] {
        use CombinationEmotion::*;
        [
            Love,
            Submission,
            Awe,
            Disapproval,
            Remorse,
            Contempt,
            Aggressiveness,
            Optimism,
            Guilt,
            Curiosity,
            Despair,
            Unbelief,
            Envy,
            Cynicism,
            Pride,
            Hope,
            Delight,
            Sentimentality,
            Shame,
            Outrage,
            Pessimism,
            Morbidness,
            Dominance,
            Anxiety,
            Nostalgia,
            Jealousy,
            Gratitude,
            Resentment,
        ]
    }

    pub fn dyads() -> impl Iterator<Item = Self> {
        Self::ordered()
            .into_iter()
            .filter(|combination| combination.tier().is_dyad())
    }

    pub fn triads() -> impl Iterator<Item = Self> {
        Self::ordered()
            .into_iter()
            .filter(|combination| !combination.tier().is_dyad())
    }

    pub const fn tier(self) -> CombinationTier {
        use CombinationEmotion::*;
        match self {
            Love | Submission | Awe | Disapproval | Remorse | Contempt | Aggressiveness
            | Optimism => CombinationTier::PrimaryDyad,
            Guilt | Curiosity | Despair | Unbelief | Envy | Cynicism | Pride | Hope => {
                CombinationTier::SecondaryDyad
            }
            Delight | Sentimentality | Shame | Outrage | Pessimism | Morbidness | Dominance
            | Anxiety => CombinationTier::TertiaryDyad,
            Nostalgia | Jealousy | Gratitude | Resentment => CombinationTier::Triad,
        }
    }

    pub const fn components(self) -> &'static [EmotionFamily] {
        use CombinationEmotion::*;
        use EmotionFamily as F;
        match self {
            Love => &[F::Joy, F::Trust],
            Submission => &[F::Trust, F::Fear],
            Awe => &[F::Fear, F::Surprise],
            Disapproval => &[F::Surprise, F::Sadness],
            Remorse => &[F::Sadness, F::Disgust],
            Contempt => &[F::Disgust, F::Anger],
            Aggressiveness => &[F::Anger, F::Anticipation],
            Optimism => &[F::Anticipation, F::Joy],
            Guilt => &[F::Joy, F::Fear],
            Curiosity => &[F::Trust, F::Surprise],
            Despair => &[F::Fear, F::Sadness],
            Unbelief => &[F::Surprise, F::Disgust],
            Envy => &[F::Sadness, F::Anger],
            Cynicism => &[F::Disgust, F::Anticipation],
            Pride => &[F::Anger, F::Joy],
            Hope => &[F::Anticipation, F::Trust],
            Delight => &[F::Joy, F::Surprise],
            Sentimentality => &[F::Trust, F::Sadness],
            Shame => &[F::Fear, F::Disgust],
            Outrage => &[F::Surprise, F::Anger],
            Pessimism => &[F::Sadness, F::Anticipation],
            Morbidness => &[F::Disgust, F::Joy],
            Dominance => &[F::Anger, F::Trust],
            Anxiety => &[F::Anticipation, F::Fear],
            Nostalgia => &[F::Joy, F::Sadness, F::Trust],
            Jealousy => &[F::Anger, F::Fear, F::Sadness],
            Gratitude => &[F::Joy, F::Trust, F::Surprise],
            Resentment => &[F::Anger, F::Disgust, F::Sadness],
        }
    }

    pub const fn label(self) -> &'static str {
        use CombinationEmotion::*;
        match self {
            Love => "Love",
            Submission => "Submission",
            Awe => "Awe",
            Disapproval => "Disapproval",
            Remorse => "Remorse",
            Contempt => "Contempt",
            Aggressiveness => "Aggressiveness",
            Optimism => "Optimism",
            Guilt => "Guilt",
            Curiosity => "Curiosity",
            Despair => "Despair",
            Unbelief => "Unbelief",
            Envy => "Envy",
            Cynicism => "Cynicism",
            Pride => "Pride",
            Hope => "Hope",
            Delight => "Delight",
            Sentimentality => "Sentimentality",
            Shame => "Shame",
            Outrage => "Outrage",
            Pessimism => "Pessimism",
            Morbidness => "Morbidness",
            Dominance => "Dominance",
            Anxiety => "Anxiety",
            Nostalgia => "Nostalgia",
            Jealousy => "Jealousy",
            Gratitude => "Gratitude",
            Resentment => "Resentment",
        }
    }

    pub const fn description(self) -> &'static str {
        use CombinationEmotion::*;
        match self {
            Love => "Warm attachment combining happiness with closeness",
            Submission => "Deference mixed with wariness",
            Awe => "Being overwhelmed by something vast or powerful",
            Disapproval => "Unpleasant surprise at how things turned out",
            Remorse => "Regret tinged with self-reproach",
            Contempt => "Scornful dismissal of someone or something",
            Aggressiveness => "Forceful, goal-driven hostility",
            Optimism => "Hopeful expectation of good outcomes",
            Guilt => "Pleasure shadowed by fear of consequences",
            Curiosity => "Open, trusting interest in the unexpected",
            Despair => "Fearful hopelessness",
            Unbelief => "Shocked refusal to accept something",
            Envy => "Resentful longing for what others have",
            Cynicism => "Expecting the worst of people or events",
            Pride => "Satisfaction asserted against others",
            Hope => "Trusting that the future will turn out well",
            Delight => "Joyful surprise",
            Sentimentality => "Tender, wistful attachment",
            Shame => "Fearful self-disgust",
            Outrage => "Shocked anger at an injustice",
            Pessimism => "Sad expectation of bad outcomes",
            Morbidness => "Taking pleasure in the unpleasant",
            Dominance => "Assertive control over trusted relationships",
            Anxiety => "Worried anticipation of threat",
            Nostalgia => "Bittersweet longing for a trusted past",
            Jealousy => "Fearful, angry sadness over a threatened bond",
            Gratitude => "Joyful, trusting recognition of an unexpected gift",
            Resentment => "Lingering angry disgust over a past hurt",
        }
    }

    /// Informational formula such as "Joy + Trust".
    pub fn formula(self) -> String {
        self.components()
            .iter()
            .map(|family| family.label())
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Nominal point value: three (the level-3 score) per component family.
    pub const fn point_value(self) -> u8 {
        3 * self.components().len() as u8
    }

    pub fn slug(self) -> String {
        self.label().to_ascii_lowercase()
    }

    pub fn definition(self) -> CombinationDefinition {
        CombinationDefinition {
            combination: self,
            name: self.label(),
            tier: self.tier(),
            components: self.components().to_vec(),
            formula: self.formula(),
            point_value: self.point_value(),
            description: self.description(),
        }
    }
}

impl fmt::Display for CombinationEmotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CombinationEmotion {
    type Err = UnknownCatalogEntry;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|combination| combination.label().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownCatalogEntry::new("combination", value))
    }
}

/// Catalog row for a combination emotion, used by catalog views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinationDefinition {
    pub combination: CombinationEmotion,
    pub name: &'static str,
    pub tier: CombinationTier,
    pub components: Vec<EmotionFamily>,
    pub formula: String,
    pub point_value: u8,
    pub description: &'static str,
}
