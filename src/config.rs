//! Analysis configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What to do with a log file that cannot be charted
///
/// Covers names matching no known log kind, names without a run id and
/// continent logs in which the focus player never appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownLogPolicy {
    /// Warn and continue with the next file
    #[default]
    Skip,
    /// Fail the whole batch
    Abort,
}

/// Main analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Glob pattern used to discover log files
    pub input_pattern: String,

    /// Directory under which the `img_run_<id>` directories are created
    pub output_root: PathBuf,

    /// Player whose continent occupation ratios are charted
    pub focus_player: u32,

    /// Handling of unrecognized log files and missing focus players
    pub unknown_policy: UnknownLogPolicy,

    /// Chart width in pixels
    pub chart_width: u32,

    /// Chart height in pixels
    pub chart_height: u32,

    /// Where to save the JSON batch report, if anywhere
    pub report_file: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_pattern: "../*.log".to_string(),
            output_root: PathBuf::from("."),
            focus_player: 0,
            unknown_policy: UnknownLogPolicy::Skip,
            chart_width: 800,  // 8in at 100 dpi
            chart_height: 600, // 6in at 100 dpi
            report_file: None,
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Configuration that aborts on the first unrecognized file
    pub fn strict() -> Self {
        Self {
            unknown_policy: UnknownLogPolicy::Abort,
            ..Default::default()
        }
    }

    /// Output directory for a given run id
    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        self.output_root.join(format!("img_run_{}", run_id))
    }
}
