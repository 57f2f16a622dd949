use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::insights::AssessmentInsights;
use super::views::ScoreReportSummary;
use crate::assessment::scoring::ScoreReport;

/// Body lines per page before a section continues on the next page.
pub const LINES_PER_PAGE: usize = 32;

/// Free-text client details printed on the cover page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMetadata {
    pub name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentPage {
    pub number: usize,
    pub heading: String,
    pub lines: Vec<String>,
}

/// Paginated, print-ready rendering of one score report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentDocument {
    pub title: String,
    pub client: ClientMetadata,
    pub pages: Vec<DocumentPage>,
}

impl AssessmentDocument {
    pub fn render(report: &ScoreReport, client: &ClientMetadata) -> Self {
        let summary = report.summary();
        let insights = AssessmentInsights::from_report(report);
        let title = summary.variant_label.to_string();

        let sections = [
            ("Overview", overview_lines(&summary, client)),
            ("Emotion families", family_lines(&summary)),
            ("Combinations and conflicts", combination_lines(&summary)),
            ("Composite scores", composite_lines(report, &summary)),
            ("Insights and recommendations", insight_lines(&insights)),
        ];

        let mut pages = Vec::new();
        for (heading, lines) in sections {
            paginate(&mut pages, heading, lines);
        }

        debug!(
            variant = %report.variant,
            pages = pages.len(),
            "assessment document rendered"
        );

        Self {
            title,
            client: client.clone(),
            pages,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl fmt::Display for AssessmentDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.pages.len();
        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                writeln!(f, "\x0c")?;
            }
            writeln!(f, "{}", self.title)?;
            writeln!(f, "{} | {}", self.client.name, self.client.date)?;
            writeln!(f)?;
            writeln!(f, "{}", page.heading)?;
            writeln!(f, "{}", "-".repeat(page.heading.chars().count()))?;
            for line in &page.lines {
                writeln!(f, "{line}")?;
            }
            writeln!(f)?;
            writeln!(f, "Page {} of {total}", page.number)?;
        }
        Ok(())
    }
}

fn paginate(pages: &mut Vec<DocumentPage>, heading: &str, lines: Vec<String>) {
    if lines.is_empty() {
        pages.push(DocumentPage {
            number: pages.len() + 1,
            heading: heading.to_string(),
            lines: vec!["Nothing to report.".to_string()],
        });
        return;
    }

    for (index, chunk) in lines.chunks(LINES_PER_PAGE).enumerate() {
        let heading = if index == 0 {
            heading.to_string()
        } else {
            format!("{heading} (continued)")
        };
        pages.push(DocumentPage {
            number: pages.len() + 1,
            heading,
            lines: chunk.to_vec(),
        });
    }
}

fn overview_lines(summary: &ScoreReportSummary, client: &ClientMetadata) -> Vec<String> {
    let mut lines = vec![
        format!("Client: {}", client.name),
        format!("Assessment date: {}", client.date),
        format!("Instrument: {}", summary.variant_label),
        format!("Completion: {}%", summary.completion_percentage),
        String::new(),
        "Intensity distribution".to_string(),
    ];
    lines.extend(summary.intensity.iter().map(|bucket| {
        format!(
            "  {} ({}): {}",
            bucket.level, bucket.scale_label, bucket.count
        )
    }));
    if summary.dysregulation_indicator {
        lines.push("  Most answers sit at the top of the scale.".to_string());
    }
    lines
}

fn family_lines(summary: &ScoreReportSummary) -> Vec<String> {
    summary
        .families
        .iter()
        .map(|family| {
            format!(
                "{:<13} {:>3}/{:<3} selections {} | average {:.2} | {} granularity",
                family.family_label,
                family.total,
                family.max_possible,
                family.selections,
                family.average,
                family.granularity_label
            )
        })
        .collect()
}

fn combination_lines(summary: &ScoreReportSummary) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .combinations
        .iter()
        .map(|entry| {
            format!(
                "{} ({}, {}): {}",
                entry.label, entry.formula, entry.tier_label, entry.score
            )
        })
        .collect();
    if !lines.is_empty() {
        lines.push(format!("Complexity: {}%", summary.complexity_percentage));
    }
    for conflict in &summary.conflicts {
        lines.push(format!(
            "Conflict: {} {} vs {} {} (penalty {})",
            conflict.first_label,
            conflict.first_total,
            conflict.second_label,
            conflict.second_total,
            conflict.penalty
        ));
    }
    lines
}

fn composite_lines(report: &ScoreReport, summary: &ScoreReportSummary) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .composites
        .iter()
        .map(|composite| {
            format!(
                "{}: {:.2} / {}",
                composite.strategy_label, composite.value, composite.scale_max
            )
        })
        .collect();

    if let Some(panas) = &report.panas {
        lines.push(format!(
            "PANAS: positive {} | negative {} | balance {:+}",
            panas.positive_affect, panas.negative_affect, panas.affect_balance
        ));
    }
    if let Some(gew) = &report.gew {
        lines.push(format!(
            "Emotion wheel: valence {:+.3} | power {:+.3}",
            gew.valence_index, gew.power_index
        ));
        if let Some(quadrant) = summary.dominant_gew_quadrant {
            lines.push(format!("  Dominant quadrant: {quadrant}"));
        }
    }
    if let Some(dimensional) = &report.dimensional {
        for reading in &dimensional.readings {
            lines.push(format!(
                "{}: {} ({:+.1} from midpoint)",
                reading.dimension.label(),
                reading.rating,
                reading.centered
            ));
        }
    }
    lines
}

fn insight_lines(insights: &AssessmentInsights) -> Vec<String> {
    let mut lines: Vec<String> = insights
        .insights
        .iter()
        .map(|line| format!("- {line}"))
        .collect();
    if !insights.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("Recommendations".to_string());
        lines.extend(
            insights
                .recommendations
                .iter()
                .map(|line| format!("- {line}")),
        );
    }
    lines
}

#[derive(Debug, Serialize)]
struct FamilyCsvRow<'a> {
    family: &'a str,
    total: u32,
    max_possible: u32,
    selections: u8,
    answered: u8,
    average: String,
    granularity: &'a str,
}

/// One row per scored family, header included.
pub fn export_family_csv(report: &ScoreReport) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for score in &report.families {
        writer.serialize(FamilyCsvRow {
            family: score.family.slug(),
            total: score.total,
            max_possible: score.max_possible,
            selections: score.selections,
            answered: score.answered,
            average: format!("{:.2}", score.average),
            granularity: score.granularity.label(),
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    client: &'a ClientMetadata,
    report: &'a ScoreReport,
    summary: ScoreReportSummary,
    insights: AssessmentInsights,
}

pub fn export_report(
    report: &ScoreReport,
    client: &ClientMetadata,
    format: ExportFormat,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Text => Ok(AssessmentDocument::render(report, client).to_string()),
        ExportFormat::Csv => export_family_csv(report),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&JsonExport {
            client,
            report,
            summary: report.summary(),
            insights: AssessmentInsights::from_report(report),
        })?),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unknown export format '{0}', expected text, csv or json")]
    UnknownFormat(String),
    #[error("failed to write csv export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv export: {0}")]
    Flush(String),
    #[error("csv export was not valid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("failed to serialise json export: {0}")]
    Json(#[from] serde_json::Error),
}
