use chrono::NaiveDate;
use emotion_assessment::assessment::catalog::{
    CatalogView, CombinationEmotion, CompositeStrategy, EmotionFamily, GranularityBands,
    InstrumentConfig, InstrumentVariant, PanasItem,
};
use emotion_assessment::assessment::domain::EmotionItemKey;
use emotion_assessment::assessment::report::{
    export_report, generate_insights, generate_recommendations, AssessmentDocument,
    ClientMetadata, ExportFormat,
};
use emotion_assessment::assessment::responses::{ResponseError, ResponseStore};
use emotion_assessment::assessment::scoring::{GranularityLevel, RiskFlag, ScoringEngine};

fn key(raw: &str) -> EmotionItemKey {
    raw.parse().expect("fixture key parses")
}

fn clinical_session() -> (InstrumentConfig, ResponseStore) {
    let config = InstrumentConfig::for_variant(InstrumentVariant::Clinical);
    let mut store = ResponseStore::new(config.scales);
    for (raw, rating) in [
        ("primary.fear.apprehension", 4),
        ("primary.fear.nervousness", 5),
        ("primary.fear.fear", 5),
        ("primary.fear.panic", 4),
        ("primary.fear.terror", 3),
        ("primary.anger.annoyance", 2),
        ("primary.joy.serenity", 1),
        ("combination.awe", 4),
        ("panas_negative.afraid", 5),
        ("panas_positive.alert", 2),
        ("dimensional.arousal", 5),
    ] {
        store
            .set_response(key(raw), rating)
            .expect("fixture rating fits the clinical scales");
    }
    (config, store)
}

#[test]
fn clinical_session_flows_from_store_to_document() {
    let (config, store) = clinical_session();
    let engine = ScoringEngine::new(config).expect("clinical configuration is valid");
    let report = engine
        .score(&store.all_responses())
        .expect("clinical session scores");

    assert_eq!(report.family_total(EmotionFamily::Fear), 21);
    assert_eq!(
        report
            .family(EmotionFamily::Fear)
            .map(|score| score.granularity),
        Some(GranularityLevel::Moderate)
    );
    assert_eq!(report.conflict_penalty, 10);
    assert_eq!(
        report.risk_flags,
        vec![
            RiskFlag::AnxietyScreening,
            RiskFlag::PositiveAffectDeficit,
            RiskFlag::EmotionalDysregulation,
        ]
    );

    let insights = generate_insights(&report);
    assert!(insights[0].starts_with("Dominant pattern: Fear"));
    assert!(insights
        .iter()
        .any(|line| line.contains("predominantly negative")));
    assert_eq!(generate_recommendations(&report).len(), 3);

    let client = ClientMetadata {
        name: "Sam Rivera".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 5, 2).expect("valid date"),
    };
    let document = AssessmentDocument::render(&report, &client);
    let text = document.to_string();
    assert!(text.starts_with("Clinical Emotion Assessment"));
    assert!(text.contains("Sam Rivera | 2026-05-02"));
    assert!(text.contains("Recommendations"));
    assert!(text.contains(&format!("Page {} of {}", document.page_count(), document.page_count())));
}

#[test]
fn json_persistence_round_trips_every_rating() {
    let (config, store) = clinical_session();
    let document = store.to_json().expect("store serialises");
    let restored = ResponseStore::from_json(config.scales, &document).expect("store restores");

    for item in config.required_keys() {
        assert_eq!(store.get_response(&item), restored.get_response(&item), "{item}");
    }
    assert_eq!(store.all_responses(), restored.all_responses());
}

#[test]
fn restoring_under_a_narrower_scale_rejects_out_of_range_ratings() {
    let (_, store) = clinical_session();
    let document = store.to_json().expect("store serialises");
    let quick = InstrumentConfig::for_variant(InstrumentVariant::Quick);

    let err = ResponseStore::from_json(quick.scales, &document)
        .expect_err("5 does not fit the 0..=4 primary scale");
    assert!(matches!(err, ResponseError::InvalidRating { max: 4, .. }));
}

#[test]
fn same_answers_score_differently_per_variant_without_touching_the_store() {
    let (_, clinical_store) = clinical_session();
    let snapshot = clinical_store.all_responses();

    let unfiltered = ScoringEngine::new(InstrumentConfig::for_variant(
        InstrumentVariant::Unfiltered,
    ))
    .expect("valid")
    .score(&snapshot)
    .expect("scores");
    assert!(unfiltered.panas.is_none());
    assert!(unfiltered.risk_flags.is_empty());
    assert!(unfiltered
        .composite(CompositeStrategy::FinalWeighted)
        .is_some());

    let clinical = ScoringEngine::new(InstrumentConfig::for_variant(InstrumentVariant::Clinical))
        .expect("valid")
        .score(&snapshot)
        .expect("scores");
    let panas = clinical.panas.expect("clinical includes PANAS");
    assert_eq!(panas.negative_affect, 5);
    assert_eq!(panas.positive_affect, 2);
    assert_eq!(snapshot.rating(&EmotionItemKey::Panas(PanasItem::Afraid)), Some(5));
}

#[test]
fn rescaled_bands_lift_a_full_family_to_maximum() {
    let config = InstrumentConfig::for_variant(InstrumentVariant::Unfiltered)
        .with_granularity_bands(GranularityBands::Rescaled);
    let mut store = ResponseStore::new(config.scales);
    for level in ["interest", "expectancy", "anticipation", "eagerness", "vigilance"] {
        store
            .set_response(key(&format!("primary.anticipation.{level}")), 2)
            .expect("fits");
    }
    store
        .set_response(EmotionItemKey::Combination(CombinationEmotion::Optimism), 3)
        .expect("fits");

    let report = ScoringEngine::new(config)
        .expect("valid")
        .score(&store.all_responses())
        .expect("scores");
    assert_eq!(
        report
            .family(EmotionFamily::Anticipation)
            .map(|score| score.granularity),
        Some(GranularityLevel::Maximum)
    );
}

#[test]
fn catalog_view_and_exports_cover_every_format() {
    let config = InstrumentConfig::for_variant(InstrumentVariant::Integrated);
    let catalog = CatalogView::for_config(&config);
    assert_eq!(catalog.families.len(), 8);
    assert_eq!(catalog.primary_scale.min, 0);
    assert_eq!(catalog.item_scale.min, 1);
    assert_eq!(catalog.gew.as_ref().map(Vec::len), Some(20));
    assert!(catalog.panas.is_none());

    let store = ResponseStore::new(config.scales);
    let report = ScoringEngine::new(config)
        .expect("valid")
        .score(&store.all_responses())
        .expect("scores");
    let client = ClientMetadata {
        name: "Walk-in".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 1, 9).expect("valid date"),
    };

    for format in [ExportFormat::Text, ExportFormat::Csv, ExportFormat::Json] {
        let rendered = export_report(&report, &client, format).expect("export renders");
        assert!(!rendered.is_empty(), "{format:?}");
    }
}
