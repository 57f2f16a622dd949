use crate::infra::{parse_bands, parse_date, parse_format, parse_variant, score_raw_responses};
use chrono::{Local, NaiveDate};
use clap::Args;
use emotion_assessment::assessment::catalog::{
    CatalogView, GranularityBands, InstrumentConfig, InstrumentVariant,
};
use emotion_assessment::assessment::domain::EmotionItemKey;
use emotion_assessment::assessment::report::{
    export_report, AssessmentDocument, AssessmentInsights, ClientMetadata, ExportFormat,
};
use emotion_assessment::assessment::responses::{ResponseError, ResponseStore};
use emotion_assessment::assessment::scoring::ScoringEngine;
use emotion_assessment::config::AppConfig;
use emotion_assessment::error::AppError;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Demo answers, expressed on the 1..=5 scale and shifted onto each variant's scale.
const SAMPLE_RESPONSES: [(&str, u8); 24] = [
    ("primary.joy.serenity", 3),
    ("primary.joy.joy", 4),
    ("primary.trust.acceptance", 3),
    ("primary.trust.trust", 2),
    ("primary.fear.apprehension", 4),
    ("primary.fear.nervousness", 3),
    ("primary.surprise.distraction", 2),
    ("primary.sadness.pensiveness", 2),
    ("primary.anger.annoyance", 2),
    ("primary.anticipation.interest", 5),
    ("primary.anticipation.anticipation", 4),
    ("combination.love", 4),
    ("combination.optimism", 3),
    ("combination.anxiety", 3),
    ("combination.hope", 3),
    ("combination.nostalgia", 2),
    ("gew.interest", 4),
    ("gew.relief", 3),
    ("panas_positive.alert", 4),
    ("panas_positive.enthusiastic", 3),
    ("panas_negative.nervous", 3),
    ("dimensional.valence", 4),
    ("dimensional.arousal", 3),
    ("context.sleep_quality", 2),
];

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Flat JSON document of `namespace.item` ratings
    #[arg(long)]
    pub(crate) responses: PathBuf,
    /// Instrument variant (defaults to ASSESSMENT_VARIANT)
    #[arg(long, value_parser = parse_variant)]
    pub(crate) variant: Option<InstrumentVariant>,
    /// Output format: text, csv or json
    #[arg(long, value_parser = parse_format, default_value = "text")]
    pub(crate) format: ExportFormat,
    /// Granularity band mode: literal or rescaled
    #[arg(long, value_parser = parse_bands)]
    pub(crate) granularity_bands: Option<GranularityBands>,
    /// Client name printed on the report
    #[arg(long, default_value = "Anonymous")]
    pub(crate) client_name: String,
    /// Assessment date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Instrument variant (defaults to ASSESSMENT_VARIANT)
    #[arg(long, value_parser = parse_variant)]
    pub(crate) variant: Option<InstrumentVariant>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Instrument variant (defaults to ASSESSMENT_VARIANT)
    #[arg(long, value_parser = parse_variant)]
    pub(crate) variant: Option<InstrumentVariant>,
    /// Override the report date (defaults to today).
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        responses,
        variant,
        format,
        granularity_bands,
        client_name,
        date,
    } = args;

    let settings = AppConfig::load()?.assessment;
    let document = fs::read_to_string(&responses)?;
    let raw: BTreeMap<String, i64> = serde_json::from_str(&document)?;
    let report = score_raw_responses(&settings, variant, granularity_bands, raw)?;

    let client = ClientMetadata {
        name: client_name,
        date: date.unwrap_or_else(|| Local::now().date_naive()),
    };
    println!("{}", export_report(&report, &client, format)?);
    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let settings = AppConfig::load()?.assessment;
    let config = settings.instrument_for(args.variant.unwrap_or(settings.variant));
    println!(
        "{}",
        serde_json::to_string_pretty(&CatalogView::for_config(&config))?
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let settings = AppConfig::load()?.assessment;
    let config = settings.instrument_for(args.variant.unwrap_or(settings.variant));
    let store = sample_session(&config)?;

    println!("Emotion assessment demo");
    println!(
        "Variant: {} ({} of {} items answered)",
        config.variant.label(),
        store.len(),
        config.required_keys().len()
    );

    let report = ScoringEngine::new(config)?.score(&store.all_responses())?;
    let client = ClientMetadata {
        name: "Demo Client".to_string(),
        date: args.date.unwrap_or_else(|| Local::now().date_naive()),
    };

    let insights = AssessmentInsights::from_report(&report);
    println!("\nFamily totals");
    for entry in report.summary().families {
        println!(
            "- {}: {}/{} ({} granularity)",
            entry.family_label, entry.total, entry.max_possible, entry.granularity_label
        );
    }
    println!("\nBalance: {}", insights.balance_label);

    println!("\n{}", AssessmentDocument::render(&report, &client));
    Ok(())
}

/// Fills a store with the demo answers the configuration surfaces.
pub(crate) fn sample_session(config: &InstrumentConfig) -> Result<ResponseStore, AppError> {
    let mut store = ResponseStore::new(config.scales);
    for (raw, rating) in SAMPLE_RESPONSES {
        let key: EmotionItemKey = raw.parse().map_err(ResponseError::from)?;
        if !config.surfaces(&key) {
            continue;
        }
        let scale = config.scale_for(key.namespace());
        store.set_response(key, i64::from(rating) - 1 + i64::from(scale.min()))?;
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_session_fits_every_variant() {
        for variant in InstrumentVariant::ordered() {
            let config = InstrumentConfig::for_variant(variant);
            let store = sample_session(&config).expect("sample answers fit");
            assert!(store.len() >= 12, "{variant}");

            let report = ScoringEngine::new(config)
                .expect("valid")
                .score(&store.all_responses())
                .expect("scores");
            assert!(report.family_total(
                emotion_assessment::assessment::catalog::EmotionFamily::Anticipation
            ) > 0);
        }
    }

    #[test]
    fn quick_sample_shifts_onto_zero_based_scale() {
        let config = InstrumentConfig::for_variant(InstrumentVariant::Quick);
        let store = sample_session(&config).expect("sample answers fit");
        let key: EmotionItemKey = "primary.anticipation.interest".parse().expect("key");

        assert_eq!(store.get_response(&key), Some(4));
        let combination: EmotionItemKey = "combination.love".parse().expect("key");
        assert_eq!(store.get_response(&combination), None);
    }
}
