use serde::Serialize;

use crate::assessment::catalog::EmotionFamily;
use crate::assessment::scoring::{FamilyScore, ScoreReport};

const BALANCE_RATIO: f64 = 1.5;
const SOPHISTICATED_COMBINATIONS: u32 = 15;
const BASIC_COMBINATIONS: u32 = 8;

const POSITIVE_FAMILIES: [EmotionFamily; 3] = [
    EmotionFamily::Joy,
    EmotionFamily::Trust,
    EmotionFamily::Anticipation,
];
const NEGATIVE_FAMILIES: [EmotionFamily; 4] = [
    EmotionFamily::Fear,
    EmotionFamily::Sadness,
    EmotionFamily::Anger,
    EmotionFamily::Disgust,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AffectBalance {
    PredominantlyPositive,
    Balanced,
    PredominantlyNegative,
}

impl AffectBalance {
    /// Either side must exceed the other by half again; everything between is balanced.
    pub fn classify(positive: u32, negative: u32) -> Self {
        let (positive, negative) = (f64::from(positive), f64::from(negative));
        if positive > BALANCE_RATIO * negative {
            Self::PredominantlyPositive
        } else if negative > BALANCE_RATIO * positive {
            Self::PredominantlyNegative
        } else {
            Self::Balanced
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PredominantlyPositive => "predominantly positive",
            Self::Balanced => "balanced",
            Self::PredominantlyNegative => "predominantly negative",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentInsights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_family: Option<EmotionFamily>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_family: Option<EmotionFamily>,
    pub positive_total: u32,
    pub negative_total: u32,
    pub balance: AffectBalance,
    pub balance_label: &'static str,
    pub insights: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl AssessmentInsights {
    pub fn from_report(report: &ScoreReport) -> Self {
        let (dominant, secondary) = ranked_patterns(report);
        let (positive_total, negative_total) = affect_totals(report);
        let balance = AffectBalance::classify(positive_total, negative_total);

        Self {
            dominant_family: dominant.map(|score| score.family),
            secondary_family: secondary.map(|score| score.family),
            positive_total,
            negative_total,
            balance,
            balance_label: balance.label(),
            insights: generate_insights(report),
            recommendations: generate_recommendations(report),
        }
    }
}

/// Natural-language observations in a fixed order: dominant pattern,
/// secondary pattern, balance, combination complexity, then the
/// instrument-specific notes.
pub fn generate_insights(report: &ScoreReport) -> Vec<String> {
    let mut insights = Vec::new();
    let (dominant, secondary) = ranked_patterns(report);

    if let Some(score) = dominant {
        insights.push(format!(
            "Dominant pattern: {} (total {} of {}, {} granularity).",
            score.family.label(),
            score.total,
            score.max_possible,
            score.granularity.label()
        ));
    }

    if let Some(score) = secondary {
        insights.push(format!(
            "Secondary pattern: {} (total {}).",
            score.family.label(),
            score.total
        ));
    }

    let (positive, negative) = affect_totals(report);
    let balance = AffectBalance::classify(positive, negative);
    insights.push(format!(
        "Emotional balance is {} (positive families {positive}, negative families {negative}).",
        balance.label()
    ));

    let active = report.combinations.active_count;
    if active > SOPHISTICATED_COMBINATIONS {
        insights.push(format!(
            "{active} combination emotions are active, indicating sophisticated emotional processing."
        ));
    } else if active < BASIC_COMBINATIONS {
        insights.push(format!(
            "{active} combination emotion{} active, suggesting basic emotional differentiation.",
            if active == 1 { " is" } else { "s are" }
        ));
    }

    if !report.conflicts.is_empty() {
        let pairs = report
            .conflicts
            .iter()
            .map(|conflict| format!("{}/{}", conflict.first.label(), conflict.second.label()))
            .collect::<Vec<_>>()
            .join(", ");
        insights.push(format!(
            "Ambivalence between opposite families ({pairs}) adds a conflict penalty of {}.",
            report.conflict_penalty
        ));
    }

    if report.intensity.dysregulation_indicator {
        insights.push(format!(
            "{:.0}% of answered items sit at the top two intensity levels.",
            report.intensity.high_intensity_fraction * 100.0
        ));
    }

    if let Some(panas) = report
        .panas
        .as_ref()
        .filter(|panas| panas.positive_answered + panas.negative_answered > 0)
    {
        insights.push(format!(
            "PANAS positive affect {} against negative affect {} (balance {:+}).",
            panas.positive_affect, panas.negative_affect, panas.affect_balance
        ));
    }

    if let Some(gew) = report.gew.as_ref() {
        if let (Some(quadrant), Some(strongest)) = (gew.dominant_quadrant, gew.strongest) {
            insights.push(format!(
                "Emotion wheel responses concentrate in the {} quadrant; strongest was {}.",
                quadrant.label().to_lowercase(),
                strongest.label()
            ));
        }
    }

    insights
}

/// One fixed string per raised risk flag, in flag order.
pub fn generate_recommendations(report: &ScoreReport) -> Vec<String> {
    report
        .risk_flags
        .iter()
        .map(|flag| flag.recommendation().to_string())
        .collect()
}

/// Highest and second-highest family totals. Ties go to the family declared
/// first, so a dominant family is always named even on an empty form. The
/// secondary pattern needs a non-zero total.
fn ranked_patterns(report: &ScoreReport) -> (Option<&FamilyScore>, Option<&FamilyScore>) {
    let mut ranked: Vec<&FamilyScore> = report.families.iter().collect();
    ranked.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.family.index().cmp(&b.family.index()))
    });

    let dominant = ranked.first().copied();
    let secondary = ranked.get(1).copied().filter(|score| score.total > 0);
    (dominant, secondary)
}

fn affect_totals(report: &ScoreReport) -> (u32, u32) {
    let sum = |families: &[EmotionFamily]| -> u32 {
        families
            .iter()
            .map(|family| report.family_total(*family))
            .sum()
    };
    (sum(&POSITIVE_FAMILIES), sum(&NEGATIVE_FAMILIES))
}
