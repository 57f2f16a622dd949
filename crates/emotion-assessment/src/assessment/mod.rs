pub mod catalog;
pub mod domain;
pub mod report;
pub mod responses;
pub mod scoring;

pub use catalog::{CatalogView, EmotionFamily, InstrumentConfig, InstrumentVariant};
pub use domain::{EmotionItemKey, Namespace, RatingScale, ScalePolicy};
pub use report::{
    generate_insights, generate_recommendations, AssessmentDocument, AssessmentInsights,
    ClientMetadata, ExportFormat, ScoreReportSummary,
};
pub use responses::{ResponseError, ResponseSnapshot, ResponseStore};
pub use scoring::{compute_score_report, ScoreReport, ScoringEngine, ScoringError};
