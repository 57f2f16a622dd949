use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Plutchik primary emotion family. Declaration order is significant: it is
/// the tie-break order for dominant-pattern detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionFamily {
    Joy,
    Trust,
    Fear,
    Surprise,
    Sadness,
    Disgust,
    Anger,
    Anticipation,
}

impl EmotionFamily {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Joy,
            Self::Trust,
            Self::Fear,
            Self::Surprise,
            Self::Sadness,
            Self::Disgust,
            Self::Anger,
            Self::Anticipation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Joy => "Joy",
            Self::Trust => "Trust",
            Self::Fear => "Fear",
            Self::Surprise => "Surprise",
            Self::Sadness => "Sadness",
            Self::Disgust => "Disgust",
            Self::Anger => "Anger",
            Self::Anticipation => "Anticipation",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Trust => "trust",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Sadness => "sadness",
            Self::Disgust => "disgust",
            Self::Anger => "anger",
            Self::Anticipation => "anticipation",
        }
    }

    /// Position in declaration order (0..8).
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Joy => Self::Sadness,
            Self::Sadness => Self::Joy,
            Self::Trust => Self::Disgust,
            Self::Disgust => Self::Trust,
            Self::Fear => Self::Anger,
            Self::Anger => Self::Fear,
            Self::Surprise => Self::Anticipation,
            Self::Anticipation => Self::Surprise,
        }
    }

    /// Whether the family contributes to the positive side of the balance insight.
    /// Surprise is neutral and sits on neither side.
    pub const fn valence(self) -> FamilyValence {
        match self {
            Self::Joy | Self::Trust | Self::Anticipation => FamilyValence::Positive,
            Self::Fear | Self::Sadness | Self::Anger | Self::Disgust => FamilyValence::Negative,
            Self::Surprise => FamilyValence::Neutral,
        }
    }

    /// The five level definitions of this family, mildest first.
    pub fn level_definitions(self) -> [IntensityLevelDefinition; 5] {
        let names = level_names(self);
        IntensityLevel::ALL.map(|level| IntensityLevelDefinition {
            family: self,
            level,
            name: names[level.index()].0,
            description: names[level.index()].1,
        })
    }

    pub fn level_name(self, level: IntensityLevel) -> &'static str {
        level_names(self)[level.index()].0
    }

    /// Looks a level up by its emotion name, ignoring ASCII case.
    pub fn level_named(self, name: &str) -> Option<IntensityLevel> {
        let name = name.trim();
        level_names(self)
            .iter()
            .position(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .and_then(|index| IntensityLevel::new(index as u8 + 1))
    }
}

impl fmt::Display for EmotionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EmotionFamily {
    type Err = UnknownCatalogEntry;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|family| family.slug().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownCatalogEntry::new("family", value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyValence {
    Positive,
    Negative,
    Neutral,
}

/// Ordinal intensity within a family, 1 (mildest) through 5 (most intense).
/// The level number doubles as the level's point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct IntensityLevel(u8);

impl IntensityLevel {
    pub const ALL: [Self; 5] = [Self(1), Self(2), Self(3), Self(4), Self(5)];

    pub const fn new(level: u8) -> Option<Self> {
        if level >= 1 && level <= 5 {
            Some(Self(level))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn score(self) -> u8 {
        self.0
    }

    const fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for IntensityLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("intensity level {value} outside 1..=5"))
    }
}

impl From<IntensityLevel> for u8 {
    fn from(level: IntensityLevel) -> Self {
        level.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntensityLevelDefinition {
    pub family: EmotionFamily,
    pub level: IntensityLevel,
    pub name: &'static str,
    pub description: &'static str,
}

impl IntensityLevelDefinition {
    pub const fn score(&self) -> u8 {
        self.level.score()
    }
}

/// Raised when parsing a catalog identifier that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownCatalogEntry {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownCatalogEntry {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

type LevelTable = [(&'static str, &'static str); 5];

const fn level_names(family: EmotionFamily) -> &'static LevelTable {
    match family {
        EmotionFamily::Joy => &[
            ("Serenity", "Calm, peaceful contentment"),
            ("Cheerfulness", "Light, easy good humour"),
            ("Joy", "Clear happiness and pleasure"),
            ("Elation", "Exhilarated, buoyant happiness"),
            ("Ecstasy", "Overwhelming, all-consuming joy"),
        ],
        EmotionFamily::Trust => &[
            ("Acceptance", "Willingness to let things and people be"),
            ("Approval", "Favourable regard for someone"),
            ("Trust", "Confident reliance on others"),
            ("Devotion", "Deep loyalty and commitment"),
            ("Admiration", "Wholehearted respect and esteem"),
        ],
        EmotionFamily::Fear => &[
            ("Apprehension", "Mild unease about what may come"),
            ("Nervousness", "Restless, jittery worry"),
            ("Fear", "Clear sense of threat or danger"),
            ("Panic", "Sudden, hard-to-control alarm"),
            ("Terror", "Paralysing, extreme fear"),
        ],
        EmotionFamily::Surprise => &[
            ("Distraction", "Attention briefly pulled away"),
            ("Uncertainty", "Unsure what is happening"),
            ("Surprise", "Caught off guard by the unexpected"),
            ("Astonishment", "Strongly startled or taken aback"),
            ("Amazement", "Overwhelming wonder"),
        ],
        EmotionFamily::Sadness => &[
            ("Pensiveness", "Quiet, reflective low mood"),
            ("Gloominess", "Heavy, downcast outlook"),
            ("Sadness", "Clear unhappiness or loss"),
            ("Sorrow", "Deep, aching sadness"),
            ("Grief", "Intense, consuming sorrow"),
        ],
        EmotionFamily::Disgust => &[
            ("Boredom", "Weariness and lack of interest"),
            ("Dislike", "Mild aversion"),
            ("Disgust", "Strong aversion or repugnance"),
            ("Revulsion", "Visceral rejection"),
            ("Loathing", "Intense, total revulsion"),
        ],
        EmotionFamily::Anger => &[
            ("Annoyance", "Minor irritation"),
            ("Frustration", "Blocked, thwarted irritation"),
            ("Anger", "Clear hostility toward a cause"),
            ("Fury", "Fierce, barely contained anger"),
            ("Rage", "Explosive, uncontrolled anger"),
        ],
        EmotionFamily::Anticipation => &[
            ("Interest", "Mild curiosity about what is next"),
            ("Expectancy", "Looking forward to an outcome"),
            ("Anticipation", "Active readiness for what comes"),
            ("Eagerness", "Impatient wanting"),
            ("Vigilance", "Intense, watchful focus"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_scores_match_level_numbers() {
        for family in EmotionFamily::ordered() {
            let definitions = family.level_definitions();
            for (index, definition) in definitions.iter().enumerate() {
                assert_eq!(definition.score() as usize, index + 1);
                assert_eq!(definition.family, family);
            }
            assert_eq!(definitions[2].name, family.label());
        }
    }

    #[test]
    fn opposites_are_symmetric() {
        for family in EmotionFamily::ordered() {
            assert_ne!(family, family.opposite());
            assert_eq!(family.opposite().opposite(), family);
        }
    }

    #[test]
    fn level_lookup_ignores_case() {
        assert_eq!(
            EmotionFamily::Joy.level_named("serenity"),
            IntensityLevel::new(1)
        );
        assert_eq!(EmotionFamily::Joy.level_named("Rage"), None);
        assert_eq!("ANGER".parse::<EmotionFamily>(), Ok(EmotionFamily::Anger));
    }
}
