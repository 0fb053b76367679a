//! Log Analyzer
//!
//! Drives a batch: discovers log files, classifies them, loads each with its
//! column schema and renders its charts into the run's output directory.
//! Files are handled one after another in discovery order.

use crate::analytics::{
    charts::{occupation_chart, per_player_charts, ChartSpec},
    render::{ChartRenderer, PdfRenderer},
    report::{BatchReport, FileOutcome},
};
use crate::config::{AnalysisConfig, UnknownLogPolicy};
use crate::error::{AnalysisError, Result};
use crate::logs::{discover, ChartLayout, LogFile, LogTable};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Batch analyzer over simulation log files
pub struct Analyzer<R: ChartRenderer> {
    config: AnalysisConfig,
    renderer: R,
}

impl Analyzer<PdfRenderer> {
    /// Analyzer writing PDF charts sized per the configuration
    pub fn from_config(config: AnalysisConfig) -> Self {
        let renderer = PdfRenderer::new(config.chart_width, config.chart_height);
        Self::new(config, renderer)
    }
}

impl<R: ChartRenderer> Analyzer<R> {
    pub fn new(config: AnalysisConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Analyze every file matching the configured input pattern
    pub fn run(&self) -> anyhow::Result<BatchReport> {
        let paths = self.discover()?;
        self.run_paths(&paths)
    }

    /// Files matching the configured input pattern, in discovery order
    pub fn discover(&self) -> anyhow::Result<Vec<PathBuf>> {
        let paths = discover(&self.config.input_pattern).with_context(|| {
            format!(
                "Failed to list log files matching {}",
                self.config.input_pattern
            )
        })?;

        if paths.is_empty() {
            warn!("No log files match {}", self.config.input_pattern);
        }

        Ok(paths)
    }

    /// Analyze the given files in order
    pub fn run_paths(&self, paths: &[PathBuf]) -> anyhow::Result<BatchReport> {
        let mut report = BatchReport::new(&self.config.input_pattern);

        for path in paths {
            info!("Analyzing {} ...", path.display());
            let outcome = self
                .analyze_file(path)
                .with_context(|| format!("Failed to analyze {}", path.display()))?;
            report.push(path, outcome);
        }

        Ok(report)
    }

    /// Classify a file, applying the unknown-log policy
    ///
    /// Returns `Ok(None)` for a file that is skipped under
    /// [`UnknownLogPolicy::Skip`].
    pub fn classify(&self, path: &Path) -> Result<Option<LogFile>> {
        match LogFile::from_path(path) {
            Ok(log) => Ok(Some(log)),
            Err(e) => self.skip_unrecognized(path, e).map(|_| None),
        }
    }

    /// Analyze one log file and write its charts
    pub fn analyze_file(&self, path: &Path) -> Result<FileOutcome> {
        let log = match LogFile::from_path(path) {
            Ok(log) => log,
            Err(e) => return self.skip_unrecognized(path, e),
        };

        let run_dir = self.config.run_dir(&log.run_id);
        fs::create_dir_all(&run_dir)?;

        let table = LogTable::load(&log.path, &log.kind.columns())?;
        debug!("{}: {} rows of {}", log.file_name(), table.len(), log.kind);

        let charts = match self.build_charts(&log, &table) {
            Ok(charts) => charts,
            Err(e @ AnalysisError::EmptySelection { .. })
                if self.config.unknown_policy == UnknownLogPolicy::Skip =>
            {
                warn!("Skipping {}: {}", path.display(), e);
                return Ok(FileOutcome::Skipped {
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        let mut written = Vec::with_capacity(charts.len());
        for chart in &charts {
            let out = run_dir.join(format!(
                "{}.{}",
                chart.file_stem,
                self.renderer.extension()
            ));
            self.renderer.render(chart, &out)?;
            info!("Chart written: {}", out.display());
            written.push(out);
        }

        Ok(FileOutcome::Rendered {
            kind: log.kind,
            run_id: log.run_id,
            rows: table.len(),
            charts: written,
        })
    }

    fn skip_unrecognized(&self, path: &Path, e: AnalysisError) -> Result<FileOutcome> {
        if !e.is_unrecognized() || self.config.unknown_policy == UnknownLogPolicy::Abort {
            return Err(e);
        }
        warn!("Skipping {}: {}", path.display(), e);
        Ok(FileOutcome::Skipped {
            reason: e.to_string(),
        })
    }

    fn build_charts(&self, log: &LogFile, table: &LogTable) -> Result<Vec<ChartSpec>> {
        match log.kind.layout() {
            ChartLayout::PerPlayer => Ok(per_player_charts(table)),
            ChartLayout::FocusPlayerRatio => {
                occupation_chart(table, self.config.focus_player, &log.path).map(|c| vec![c])
            }
        }
    }
}
