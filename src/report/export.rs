//! JSON export of the full analysis run.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::stats::contingency::ChiSquareTest;
use crate::stats::descriptive::DescriptiveReport;
use crate::stats::logit::LogitFit;

/// Metadata about the analysis run.
#[derive(Debug, Serialize)]
pub struct AnalysisMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// Ergostat version
    pub ergostat_version: String,
    /// Input file path
    pub input_file: String,
    /// Respondents in the input dataset
    pub rows: usize,
}

impl AnalysisMetadata {
    pub fn new(input_file: &Path, rows: usize) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            ergostat_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input_file.display().to_string(),
            rows,
        }
    }
}

/// A stage that failed during the run; the rest of the export is still valid.
#[derive(Debug, Serialize)]
pub struct StageFailure {
    /// Stage label
    pub stage: String,
    /// Error message with field/row context
    pub message: String,
}

/// Complete analysis export: every report that was produced, plus the
/// failures of stages that were not.
#[derive(Debug, Serialize)]
pub struct AnalysisExport {
    pub metadata: AnalysisMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptive: Option<DescriptiveReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_associations: Option<Vec<ChiSquareTest>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_associations: Option<Vec<ChiSquareTest>>,
    pub models: Vec<LogitFit>,
    pub failures: Vec<StageFailure>,
}

impl AnalysisExport {
    pub fn new(metadata: AnalysisMetadata) -> Self {
        Self {
            metadata,
            descriptive: None,
            region_associations: None,
            site_associations: None,
            models: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Record a stage failure with its error context.
    pub fn add_failure(&mut self, stage: &str, error: &anyhow::Error) {
        self.failures.push(StageFailure {
            stage: stage.to_string(),
            message: format!("{:#}", error),
        });
    }
}

/// Write the analysis export as pretty-printed JSON.
pub fn export_analysis(export: &AnalysisExport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(export).context("Failed to serialize analysis")?;
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write report: {}", output_path.display()))?;
    Ok(())
}
