use serde::{Deserialize, Serialize};

use super::model::{FamilyScore, IntensityHistogram};
use crate::assessment::catalog::{ClinicalThresholds, EmotionFamily};

/// Screening flags raised by the clinical rule set. Declaration order is the
/// emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    AnxietyScreening,
    ImpulseControl,
    DepressionScreening,
    PositiveAffectDeficit,
    EmotionalDysregulation,
}

impl RiskFlag {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AnxietyScreening => "Elevated fear",
            Self::ImpulseControl => "Elevated anger",
            Self::DepressionScreening => "Elevated sadness",
            Self::PositiveAffectDeficit => "Low joy and trust",
            Self::EmotionalDysregulation => "Peak-heavy intensity",
        }
    }

    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::AnxietyScreening => {
                "Consider an anxiety screening and grounding or exposure-based coping strategies."
            }
            Self::ImpulseControl => {
                "Consider impulse-control and anger-management work, such as pause-and-plan routines."
            }
            Self::DepressionScreening => {
                "Consider a depression screening and behavioural activation with a trusted clinician."
            }
            Self::PositiveAffectDeficit => {
                "Explore anhedonia and attachment themes; schedule pleasant and connecting activities."
            }
            Self::EmotionalDysregulation => {
                "Intensity clusters at the top of the scale; consider emotion-regulation skills training."
            }
        }
    }
}

/// Evaluates the clinical rules in priority order. A form with nothing endorsed
/// raises nothing.
pub(crate) fn evaluate(
    families: &[FamilyScore],
    intensity: &IntensityHistogram,
    thresholds: &ClinicalThresholds,
) -> Vec<RiskFlag> {
    let total = |family: EmotionFamily| {
        families
            .iter()
            .find(|score| score.family == family)
            .map(|score| score.total)
            .unwrap_or(0)
    };
    let anything_endorsed = intensity.answered > 0;

    let mut flags = Vec::new();
    if total(EmotionFamily::Fear) > thresholds.fear_total {
        flags.push(RiskFlag::AnxietyScreening);
    }
    if total(EmotionFamily::Anger) > thresholds.anger_total {
        flags.push(RiskFlag::ImpulseControl);
    }
    if total(EmotionFamily::Sadness) > thresholds.sadness_total {
        flags.push(RiskFlag::DepressionScreening);
    }
    if anything_endorsed
        && total(EmotionFamily::Joy) < thresholds.positive_deficit_total
        && total(EmotionFamily::Trust) < thresholds.positive_deficit_total
    {
        flags.push(RiskFlag::PositiveAffectDeficit);
    }
    if intensity.high_intensity_fraction > thresholds.high_intensity_fraction {
        flags.push(RiskFlag::EmotionalDysregulation);
    }
    flags
}
