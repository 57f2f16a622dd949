//! Everything downstream of a [`ScoreReport`](super::scoring::ScoreReport):
//! insights, label views and exportable documents.

mod export;
mod insights;
pub mod views;

pub use export::{
    export_family_csv, export_report, AssessmentDocument, ClientMetadata, DocumentPage,
    ExportError, ExportFormat, LINES_PER_PAGE,
};
pub use insights::{generate_insights, generate_recommendations, AffectBalance, AssessmentInsights};
pub use views::ScoreReportSummary;
