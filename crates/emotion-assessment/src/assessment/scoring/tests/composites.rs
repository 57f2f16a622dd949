use super::common::*;
use crate::assessment::catalog::{
    CombinationEmotion, CompositeStrategy, EmotionFamily, InstrumentVariant,
};

fn value(report: &crate::assessment::scoring::ScoreReport, strategy: CompositeStrategy) -> f64 {
    report
        .composite(strategy)
        .map(|composite| composite.value)
        .unwrap_or_else(|| panic!("{strategy:?} not reported"))
}

#[test]
fn simple_average_scales_mean_rating_by_twenty() {
    let config = config(InstrumentVariant::Clinical);
    let report = score(
        &config,
        &[
            (level(EmotionFamily::Joy, "Joy"), 3),
            (level(EmotionFamily::Joy, "Serenity"), 1),
            (level(EmotionFamily::Trust, "Trust"), 2),
        ],
    );

    assert_eq!(value(&report, CompositeStrategy::SimpleAverage), 40.0);
    assert_eq!(value(&report, CompositeStrategy::GranularityPercentage), 60.0);
}

#[test]
fn simple_average_reaches_one_hundred_at_scale_maximum() {
    let config = config(InstrumentVariant::Clinical);
    let report = score(
        &config,
        &[
            (level(EmotionFamily::Fear, "Terror"), 5),
            (combination(CombinationEmotion::Awe), 5),
        ],
    );

    assert_eq!(value(&report, CompositeStrategy::SimpleAverage), 100.0);
    assert_eq!(value(&report, CompositeStrategy::GranularityPercentage), 20.0);
}

#[test]
fn final_weighted_blends_all_five_terms() {
    let config = config(InstrumentVariant::Unfiltered);
    let report = score(
        &config,
        &[
            (level(EmotionFamily::Joy, "Joy"), 3),
            (level(EmotionFamily::Sadness, "Sadness"), 2),
            (combination(CombinationEmotion::Love), 4),
            (combination(CombinationEmotion::Hope), 2),
        ],
    );

    // 2 x 12.5 + 2.75 x 5 + 2 x 2 + (100 - 10) + 6 x 0.5
    let composite = report
        .composite(CompositeStrategy::FinalWeighted)
        .expect("unfiltered reports the weighted score");
    assert!((composite.value - 135.75).abs() < 1e-9);
    assert_eq!(composite.scale_max, 250.0);
    assert_eq!(composite.components.len(), 5);
    let balance = composite
        .components
        .iter()
        .find(|component| component.term == "balance")
        .expect("balance term present");
    assert_eq!(balance.value, 90.0);

    let mean = composite
        .components
        .iter()
        .find(|component| component.term == "mean_intensity")
        .expect("mean term present");
    assert_eq!(mean.notes, "mean non-zero rating 2.75 x 5");
    assert!(report
        .composites
        .iter()
        .flat_map(|composite| &composite.components)
        .all(|component| component.notes.is_ascii()));
}

#[test]
fn explicit_zeros_leave_every_composite_at_zero() {
    let config = config(InstrumentVariant::Quick);
    let report = score(
        &config,
        &[
            (level(EmotionFamily::Joy, "Joy"), 0),
            (level(EmotionFamily::Fear, "Fear"), 0),
        ],
    );

    for composite in &report.composites {
        assert_eq!(composite.value, 0.0, "{:?}", composite.strategy);
    }
}
