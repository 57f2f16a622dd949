use super::families::UnknownCatalogEntry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffectPolarity {
    Positive,
    Negative,
}

/// The twenty fixed PANAS adjectives, positive items first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanasItem {
    Interested,
    Excited,
    Strong,
    Enthusiastic,
    Proud,
    Alert,
    Inspired,
    Determined,
    Attentive,
    Active,
    Distressed,
    Upset,
    Guilty,
    Scared,
    Hostile,
    Irritable,
    Ashamed,
    Nervous,
    Jittery,
    Afraid,
}

impl PanasItem {
    pub const fn ordered() -> [Self; 20] {
        use PanasItem::*;
        [
            Interested,
            Excited,
            Strong,
            Enthusiastic,
            Proud,
            Alert,
            Inspired,
            Determined,
            Attentive,
            Active,
            Distressed,
            Upset,
            Guilty,
            Scared,
            Hostile,
            Irritable,
            Ashamed,
            Nervous,
            Jittery,
            Afraid,
        ]
    }

    pub const fn polarity(self) -> AffectPolarity {
        if (self as usize) < 10 {
            AffectPolarity::Positive
        } else {
            AffectPolarity::Negative
        }
    }

    pub const fn label(self) -> &'static str {
        use PanasItem::*;
        match self {
            Interested => "Interested",
            Excited => "Excited",
            Strong => "Strong",
            Enthusiastic => "Enthusiastic",
            Proud => "Proud",
            Alert => "Alert",
            Inspired => "Inspired",
            Determined => "Determined",
            Attentive => "Attentive",
            Active => "Active",
            Distressed => "Distressed",
            Upset => "Upset",
            Guilty => "Guilty",
            Scared => "Scared",
            Hostile => "Hostile",
            Irritable => "Irritable",
            Ashamed => "Ashamed",
            Nervous => "Nervous",
            Jittery => "Jittery",
            Afraid => "Afraid",
        }
    }

    pub fn with_polarity(polarity: AffectPolarity) -> impl Iterator<Item = Self> {
        Self::ordered()
            .into_iter()
            .filter(move |item| item.polarity() == polarity)
    }
}

/// `panasItems` accessor: positive list then negative list, ten each.
pub fn panas_items() -> ([PanasItem; 10], [PanasItem; 10]) {
    let all = PanasItem::ordered();
    let mut positive = [PanasItem::Interested; 10];
    let mut negative = [PanasItem::Distressed; 10];
    positive.copy_from_slice(&all[..10]);
    negative.copy_from_slice(&all[10..]);
    (positive, negative)
}

impl fmt::Display for PanasItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PanasItem {
    type Err = UnknownCatalogEntry;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|item| item.label().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownCatalogEntry::new("panas item", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_items_per_polarity() {
        let (positive, negative) = panas_items();
        assert!(positive
            .iter()
            .all(|item| item.polarity() == AffectPolarity::Positive));
        assert!(negative
            .iter()
            .all(|item| item.polarity() == AffectPolarity::Negative));
        assert_eq!(PanasItem::with_polarity(AffectPolarity::Negative).count(), 10);
    }
}
