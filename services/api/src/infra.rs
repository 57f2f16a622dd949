use chrono::NaiveDate;
use emotion_assessment::assessment::catalog::{GranularityBands, InstrumentVariant};
use emotion_assessment::assessment::report::ExportFormat;
use emotion_assessment::assessment::responses::ResponseStore;
use emotion_assessment::assessment::scoring::{ScoreReport, ScoringEngine};
use emotion_assessment::config::AssessmentSettings;
use emotion_assessment::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) assessment: AssessmentSettings,
}

/// Validates raw `namespace.item` ratings through a fresh store and scores
/// them. Nothing is shared between calls.
pub(crate) fn score_raw_responses(
    settings: &AssessmentSettings,
    variant: Option<InstrumentVariant>,
    granularity_bands: Option<GranularityBands>,
    responses: BTreeMap<String, i64>,
) -> Result<ScoreReport, AppError> {
    let variant = variant.unwrap_or(settings.variant);
    let mut config = settings.instrument_for(variant);
    if let Some(bands) = granularity_bands {
        config = config.with_granularity_bands(bands);
    }

    let store = ResponseStore::from_raw(config.scales, responses)?;
    let report = ScoringEngine::new(config)?.score(&store.all_responses())?;
    info!(
        %variant,
        answered = store.len(),
        flags = report.risk_flags.len(),
        "assessment scored"
    );
    Ok(report)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_variant(raw: &str) -> Result<InstrumentVariant, String> {
    raw.parse::<InstrumentVariant>().map_err(|err| err.to_string())
}

pub(crate) fn parse_format(raw: &str) -> Result<ExportFormat, String> {
    raw.parse::<ExportFormat>().map_err(|err| err.to_string())
}

pub(crate) fn parse_bands(raw: &str) -> Result<GranularityBands, String> {
    raw.parse::<GranularityBands>()
        .map_err(|err| err.to_string())
}
