use super::catalog::{
    AffectPolarity, CombinationEmotion, Dimension, EmotionFamily, GewEmotion, IntensityLevel,
    PanasItem,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Item namespaces. Each namespace is bound to one rating scale per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    Primary,
    Combination,
    Gew,
    PanasPositive,
    PanasNegative,
    Dimensional,
    Context,
}

impl Namespace {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Primary,
            Self::Combination,
            Self::Gew,
            Self::PanasPositive,
            Self::PanasNegative,
            Self::Dimensional,
            Self::Context,
        ]
    }

    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Combination => "combination",
            Self::Gew => "gew",
            Self::PanasPositive => "panas_positive",
            Self::PanasNegative => "panas_negative",
            Self::Dimensional => "dimensional",
            Self::Context => "context",
        }
    }

    fn from_prefix(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|namespace| namespace.prefix().eq_ignore_ascii_case(value))
    }
}

/// Structured identifier of a rated item. Renders as `namespace.local`, e.g.
/// `primary.joy.serenity`, `combination.love` or `panas_positive.alert`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EmotionItemKey {
    Primary {
        family: EmotionFamily,
        level: IntensityLevel,
    },
    Combination(CombinationEmotion),
    Gew(GewEmotion),
    Panas(PanasItem),
    Dimensional(Dimension),
    Context(String),
}

impl EmotionItemKey {
    pub const fn primary(family: EmotionFamily, level: IntensityLevel) -> Self {
        Self::Primary { family, level }
    }

    /// Primary key addressed by the level's emotion name, e.g. `(Joy, "Serenity")`.
    pub fn primary_named(family: EmotionFamily, emotion: &str) -> Option<Self> {
        family
            .level_named(emotion)
            .map(|level| Self::Primary { family, level })
    }

    /// Context key with a normalised name; a name that is blank after trimming is rejected.
    pub fn context(name: &str) -> Result<Self, KeyParseError> {
        context_name(name).map(Self::Context)
    }

    /// Checks that the key renders to a string that parses back to itself.
    pub fn validate(&self) -> Result<(), KeyParseError> {
        match self {
            Self::Context(name) if context_name(name)? != *name => {
                Err(KeyParseError::UnknownItem {
                    key: self.to_string(),
                    reason: format!("context name should read '{}'", normalize_context(name)),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn namespace(&self) -> Namespace {
        match self {
            Self::Primary { .. } => Namespace::Primary,
            Self::Combination(_) => Namespace::Combination,
            Self::Gew(_) => Namespace::Gew,
            Self::Panas(item) => match item.polarity() {
                AffectPolarity::Positive => Namespace::PanasPositive,
                AffectPolarity::Negative => Namespace::PanasNegative,
            },
            Self::Dimensional(_) => Namespace::Dimensional,
            Self::Context(_) => Namespace::Context,
        }
    }

    pub fn family(&self) -> Option<EmotionFamily> {
        match self {
            Self::Primary { family, .. } => Some(*family),
            _ => None,
        }
    }

    /// Human readable label for display surfaces.
    pub fn label(&self) -> String {
        match self {
            Self::Primary { family, level } => family.level_name(*level).to_string(),
            Self::Combination(combination) => combination.label().to_string(),
            Self::Gew(emotion) => emotion.label().to_string(),
            Self::Panas(item) => item.label().to_string(),
            Self::Dimensional(dimension) => dimension.label().to_string(),
            Self::Context(name) => name.replace('_', " "),
        }
    }
}

fn context_name(name: &str) -> Result<String, KeyParseError> {
    let normalized = normalize_context(name);
    if normalized.is_empty() {
        return Err(KeyParseError::UnknownItem {
            key: format!("{}.{name}", Namespace::Context.prefix()),
            reason: "context name is empty".to_string(),
        });
    }
    Ok(normalized)
}

fn normalize_context(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '-' {
                '_'
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

impl fmt::Display for EmotionItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.namespace().prefix();
        match self {
            Self::Primary { family, level } => write!(
                f,
                "{prefix}.{}.{}",
                family.slug(),
                family.level_name(*level).to_ascii_lowercase()
            ),
            Self::Combination(combination) => write!(f, "{prefix}.{}", combination.slug()),
            Self::Gew(emotion) => write!(f, "{prefix}.{}", emotion.label().to_ascii_lowercase()),
            Self::Panas(item) => write!(f, "{prefix}.{}", item.label().to_ascii_lowercase()),
            Self::Dimensional(dimension) => {
                write!(f, "{prefix}.{}", dimension.label().to_ascii_lowercase())
            }
            Self::Context(name) => write!(f, "{prefix}.{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("item key '{0}' is missing a namespace separator")]
    MissingNamespace(String),
    #[error("item key '{key}' has unknown namespace '{namespace}'")]
    UnknownNamespace { key: String, namespace: String },
    #[error("item key '{key}' does not name a catalog item: {reason}")]
    UnknownItem { key: String, reason: String },
}

impl FromStr for EmotionItemKey {
    type Err = KeyParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let (prefix, local) = raw
            .split_once('.')
            .ok_or_else(|| KeyParseError::MissingNamespace(raw.to_string()))?;
        let namespace =
            Namespace::from_prefix(prefix).ok_or_else(|| KeyParseError::UnknownNamespace {
                key: raw.to_string(),
                namespace: prefix.to_string(),
            })?;
        let unknown = |reason: String| KeyParseError::UnknownItem {
            key: raw.to_string(),
            reason,
        };

        match namespace {
            Namespace::Primary => {
                let (family, emotion) = local
                    .split_once('.')
                    .ok_or_else(|| unknown("expected family.emotion".to_string()))?;
                let family: EmotionFamily =
                    family.parse().map_err(|err| unknown(format!("{err}")))?;
                let level = match emotion.trim().parse::<u8>() {
                    Ok(number) => IntensityLevel::new(number),
                    Err(_) => family.level_named(emotion),
                }
                .ok_or_else(|| unknown(format!("no {family} level named '{emotion}'")))?;
                Ok(Self::Primary { family, level })
            }
            Namespace::Combination => local
                .parse()
                .map(Self::Combination)
                .map_err(|err| unknown(format!("{err}"))),
            Namespace::Gew => local
                .parse()
                .map(Self::Gew)
                .map_err(|err| unknown(format!("{err}"))),
            Namespace::PanasPositive | Namespace::PanasNegative => {
                let item: PanasItem = local.parse().map_err(|err| unknown(format!("{err}")))?;
                let key = Self::Panas(item);
                if key.namespace() != namespace {
                    return Err(unknown(format!(
                        "{item} belongs to {}",
                        key.namespace().prefix()
                    )));
                }
                Ok(key)
            }
            Namespace::Dimensional => local
                .parse()
                .map(Self::Dimensional)
                .map_err(|err| unknown(format!("{err}"))),
            Namespace::Context => context_name(local)
                .map(Self::Context)
                .map_err(|_| unknown("context name is empty".to_string())),
        }
    }
}

impl TryFrom<String> for EmotionItemKey {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EmotionItemKey> for String {
    fn from(key: EmotionItemKey) -> Self {
        key.to_string()
    }
}

/// Integer range accepted for a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingScale {
    ZeroToFour,
    OneToFive,
}

impl RatingScale {
    pub const fn min(self) -> u8 {
        match self {
            Self::ZeroToFour => 0,
            Self::OneToFive => 1,
        }
    }

    pub const fn max(self) -> u8 {
        match self {
            Self::ZeroToFour => 4,
            Self::OneToFive => 5,
        }
    }

    pub fn contains(self, rating: i64) -> bool {
        rating >= i64::from(self.min()) && rating <= i64::from(self.max())
    }

    pub fn midpoint(self) -> f64 {
        (f64::from(self.min()) + f64::from(self.max())) / 2.0
    }

    /// Maps a rating onto the common 1..=5 intensity bucket.
    pub const fn bucket(self, rating: u8) -> u8 {
        rating - self.min() + 1
    }
}

impl fmt::Display for RatingScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min(), self.max())
    }
}

/// Endpoint wording of the five-point scale; labels only, never scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleLabels {
    NotAtAllToExtremely,
    RarelyToAlways,
}

impl ScaleLabels {
    pub const fn points(self) -> [&'static str; 5] {
        match self {
            Self::NotAtAllToExtremely => [
                "Not at all",
                "A little",
                "Moderately",
                "Quite a bit",
                "Extremely",
            ],
            Self::RarelyToAlways => ["Rarely", "Occasionally", "Sometimes", "Often", "Always"],
        }
    }

    pub fn label_for(self, scale: RatingScale, rating: u8) -> Option<&'static str> {
        if !scale.contains(i64::from(rating)) {
            return None;
        }
        Some(self.points()[usize::from(scale.bucket(rating)) - 1])
    }
}

/// Which scale applies to which namespace. Only primary items vary between
/// variants; every other namespace is rated 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalePolicy {
    pub primary: RatingScale,
    pub labels: ScaleLabels,
}

impl ScalePolicy {
    pub const fn scale_for(&self, namespace: Namespace) -> RatingScale {
        match namespace {
            Namespace::Primary => self.primary,
            _ => RatingScale::OneToFive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_render_and_parse_symmetrically() {
        let keys = [
            EmotionItemKey::primary_named(EmotionFamily::Joy, "Serenity").expect("level exists"),
            EmotionItemKey::Combination(CombinationEmotion::Love),
            EmotionItemKey::Gew(GewEmotion::Relief),
            EmotionItemKey::Panas(PanasItem::Alert),
            EmotionItemKey::Panas(PanasItem::Jittery),
            EmotionItemKey::Dimensional(Dimension::Arousal),
            EmotionItemKey::context("Sleep Quality").expect("named context"),
        ];
        for key in keys {
            let rendered = key.to_string();
            assert_eq!(rendered.parse::<EmotionItemKey>(), Ok(key.clone()), "{rendered}");
        }
    }

    #[test]
    fn parse_accepts_level_numbers_and_mixed_case() {
        let key: EmotionItemKey = "primary.Joy.3".parse().expect("numeric level");
        assert_eq!(key.to_string(), "primary.joy.joy");
        let key: EmotionItemKey = "PANAS_POSITIVE.Enthusiastic".parse().expect("panas");
        assert_eq!(key, EmotionItemKey::Panas(PanasItem::Enthusiastic));
    }

    #[test]
    fn parse_rejects_mismatched_panas_namespace() {
        let err = "panas_negative.alert"
            .parse::<EmotionItemKey>()
            .expect_err("alert is a positive item");
        assert!(matches!(err, KeyParseError::UnknownItem { .. }));
        assert!(matches!(
            "feelings.joy".parse::<EmotionItemKey>(),
            Err(KeyParseError::UnknownNamespace { .. })
        ));
    }

    #[test]
    fn blank_context_names_are_rejected() {
        assert!(matches!(
            EmotionItemKey::context("   "),
            Err(KeyParseError::UnknownItem { .. })
        ));
        assert!(EmotionItemKey::Context(String::new()).validate().is_err());
        assert!(EmotionItemKey::Context("Work Stress".to_string())
            .validate()
            .is_err());
        assert_eq!(
            EmotionItemKey::context(" Work-Stress ")
                .expect("named context")
                .validate(),
            Ok(())
        );
    }

    #[test]
    fn zero_based_scale_shifts_into_buckets() {
        assert_eq!(RatingScale::ZeroToFour.bucket(0), 1);
        assert_eq!(RatingScale::ZeroToFour.bucket(4), 5);
        assert_eq!(RatingScale::OneToFive.bucket(5), 5);
        assert_eq!(
            ScaleLabels::RarelyToAlways.label_for(RatingScale::OneToFive, 5),
            Some("Always")
        );
        assert_eq!(
            ScaleLabels::NotAtAllToExtremely.label_for(RatingScale::ZeroToFour, 0),
            Some("Not at all")
        );
    }
}
