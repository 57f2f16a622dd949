use crate::infra::{score_raw_responses, AppState};
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use emotion_assessment::assessment::catalog::{
    CatalogView, EmotionFamily, GranularityBands, InstrumentVariant,
};
use emotion_assessment::assessment::report::{
    export_report, AffectBalance, AssessmentInsights, ClientMetadata, ExportFormat,
    ScoreReportSummary,
};
use emotion_assessment::assessment::scoring::ScoreReport;
use emotion_assessment::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    pub(crate) variant: Option<InstrumentVariant>,
    #[serde(default)]
    pub(crate) granularity_bands: Option<GranularityBands>,
    pub(crate) responses: BTreeMap<String, i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    pub(crate) report: ScoreReport,
    pub(crate) summary: ScoreReportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) dominant_family: Option<EmotionFamily>,
    pub(crate) balance: AffectBalance,
    pub(crate) insights: Vec<String>,
    pub(crate) recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExportRequest {
    #[serde(flatten)]
    pub(crate) assessment: ScoreRequest,
    pub(crate) client: ClientMetadata,
    #[serde(default = "default_format")]
    pub(crate) format: ExportFormat,
}

fn default_format() -> ExportFormat {
    ExportFormat::Text
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/catalog/:variant", get(catalog_endpoint))
        .route("/api/v1/assessments/score", post(score_endpoint))
        .route("/api/v1/assessments/export", post(export_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn catalog_endpoint(
    Extension(state): Extension<AppState>,
    Path(variant): Path<String>,
) -> Result<Json<CatalogView>, AppError> {
    let variant: InstrumentVariant = variant.parse()?;
    let config = state.assessment.instrument_for(variant);
    Ok(Json(CatalogView::for_config(&config)))
}

pub(crate) async fn score_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let ScoreRequest {
        variant,
        granularity_bands,
        responses,
    } = payload;

    let report = score_raw_responses(&state.assessment, variant, granularity_bands, responses)?;
    let summary = report.summary();
    let AssessmentInsights {
        dominant_family,
        balance,
        insights,
        recommendations,
        ..
    } = AssessmentInsights::from_report(&report);

    Ok(Json(ScoreResponse {
        report,
        summary,
        dominant_family,
        balance,
        insights,
        recommendations,
    }))
}

pub(crate) async fn export_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let ExportRequest {
        assessment,
        client,
        format,
    } = payload;

    let report = score_raw_responses(
        &state.assessment,
        assessment.variant,
        assessment.granularity_bands,
        assessment.responses,
    )?;
    let body = export_report(&report, &client, format)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, format.content_type())],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use emotion_assessment::config::AssessmentSettings;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(ready: bool) -> Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            assessment: AssessmentSettings::default(),
        };
        router().layer(Extension(state))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn catalog_lists_variant_items() {
        let response = app(true)
            .oneshot(
                Request::get("/api/v1/catalog/quick")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["variant"], "quick");
        assert_eq!(body["primary_scale"]["min"], 0);
        assert_eq!(body["families"].as_array().map(Vec::len), Some(8));
        assert!(body["combinations"]
            .as_array()
            .is_some_and(|items| items.is_empty()));
    }

    #[tokio::test]
    async fn unknown_catalog_variant_is_not_found() {
        let response = app(true)
            .oneshot(
                Request::get("/api/v1/catalog/weekly")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn score_returns_report_and_insights() {
        let request = post_json(
            "/api/v1/assessments/score",
            json!({
                "variant": "clinical",
                "responses": {
                    "primary.joy.joy": 3,
                    "primary.joy.serenity": 1,
                    "primary.trust.trust": 2,
                    "primary.sadness.sadness": 2
                }
            }),
        );

        let response = app(true).oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["report"]["conflict_penalty"], 10);
        assert_eq!(body["summary"]["families"][0]["total"], 4);
        assert_eq!(body["dominant_family"], "joy");
        assert!(body["insights"][0]
            .as_str()
            .is_some_and(|line| line.starts_with("Dominant pattern: Joy")));
    }

    #[tokio::test]
    async fn out_of_scale_rating_is_unprocessable() {
        let request = post_json(
            "/api/v1/assessments/score",
            json!({ "variant": "quick", "responses": { "primary.fear.terror": 5 } }),
        );

        let response = app(true).oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.contains("primary.fear.terror")));
    }

    #[tokio::test]
    async fn malformed_key_is_a_bad_request() {
        let request = post_json(
            "/api/v1/assessments/score",
            json!({ "responses": { "joy_serenity": 2 } }),
        );

        let response = app(true).oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn export_renders_csv_with_content_type() {
        let request = post_json(
            "/api/v1/assessments/export",
            json!({
                "variant": "unfiltered",
                "responses": { "primary.anger.rage": 5 },
                "client": { "name": "Casey", "date": "2026-04-01" },
                "format": "csv"
            }),
        );

        let response = app(true).oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/csv; charset=utf-8")
        );

        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let csv = String::from_utf8(bytes.to_vec()).expect("utf-8 body");
        assert!(csv.contains("anger,5,25,1,1,5.00,Minimal"));
    }

    #[tokio::test]
    async fn export_defaults_to_paginated_text() {
        let request = post_json(
            "/api/v1/assessments/export",
            json!({
                "responses": {},
                "client": { "name": "Casey", "date": "2026-04-01" }
            }),
        );

        let response = app(true).oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let text = String::from_utf8(bytes.to_vec()).expect("utf-8 body");
        assert!(text.starts_with("Comprehensive Emotion Assessment"));
        assert!(text.contains("Page 1 of"));
    }
}
