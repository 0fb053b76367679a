//! Batch report: what was rendered from which log file

use crate::logs::kind::LogKind;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of analysing a single log file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Rendered {
        kind: LogKind,
        run_id: String,
        rows: usize,
        charts: Vec<PathBuf>,
    },
    Skipped {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Outcome of a whole analysis run, in processing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub input_pattern: String,
    pub generated_at: DateTime<Utc>,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn new(input_pattern: &str) -> Self {
        Self {
            input_pattern: input_pattern.to_string(),
            generated_at: Utc::now(),
            files: Vec::new(),
        }
    }

    pub fn push(&mut self, path: &Path, outcome: FileOutcome) {
        self.files.push(FileReport {
            path: path.to_path_buf(),
            outcome,
        });
    }

    pub fn rendered_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Rendered { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.files.len() - self.rendered_count()
    }

    pub fn chart_count(&self) -> usize {
        self.charts().count()
    }

    /// Every chart written, in processing order
    pub fn charts(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter().flat_map(|f| match &f.outcome {
            FileOutcome::Rendered { charts, .. } => charts.as_slice(),
            FileOutcome::Skipped { .. } => &[][..],
        })
    }

    /// Distinct run ids that produced charts
    pub fn run_ids(&self) -> BTreeSet<&str> {
        self.files
            .iter()
            .filter_map(|f| match &f.outcome {
                FileOutcome::Rendered { run_id, .. } => Some(run_id.as_str()),
                FileOutcome::Skipped { .. } => None,
            })
            .collect()
    }

    /// Save the report as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create report directory")?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;

        let mut file = File::create(path).context("Failed to create report file")?;
        file.write_all(json.as_bytes())
            .context("Failed to write report file")?;

        info!("Report saved to: {}", path.display());
        Ok(())
    }

    /// Load a report saved by [`BatchReport::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).context("Failed to read report file")?;

        serde_json::from_str(&contents).context("Failed to parse report file")
    }
}

/// Format a report as a text summary
pub fn format_summary(report: &BatchReport) -> String {
    let mut out = String::new();
    out.push_str("\n╔══════════════════════════════════════════════════════════╗\n");
    out.push_str("║            RISK LOG ANALYSIS                             ║\n");
    out.push_str("╚══════════════════════════════════════════════════════════╝\n\n");
    out.push_str(&format!("  Input pattern:   {}\n", report.input_pattern));
    out.push_str(&format!("  Log files:       {:>6}\n", report.files.len()));
    out.push_str(&format!("  Analyzed:        {:>6}\n", report.rendered_count()));
    out.push_str(&format!("  Skipped:         {:>6}\n", report.skipped_count()));
    out.push_str(&format!("  Charts written:  {:>6}\n", report.chart_count()));

    let runs = report.run_ids();
    if !runs.is_empty() {
        let runs: Vec<&str> = runs.into_iter().collect();
        out.push_str(&format!("  Runs:            {}\n", runs.join(", ")));
    }
    out.push('\n');

    for file in &report.files {
        match &file.outcome {
            FileOutcome::Rendered {
                kind, rows, charts, ..
            } => out.push_str(&format!(
                "  ✓ {} ({}, {} rows, {} charts)\n",
                file.path.display(),
                kind,
                rows,
                charts.len()
            )),
            FileOutcome::Skipped { reason } => {
                out.push_str(&format!("  - {} skipped: {}\n", file.path.display(), reason))
            }
        }
    }

    out.push_str(&format!(
        "\nGenerated: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out
}

/// Print summary to terminal
pub fn print_summary(report: &BatchReport) {
    println!("{}", format_summary(report));
}
