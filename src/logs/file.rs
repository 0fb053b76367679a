//! Log file discovery and file name parsing

use crate::error::{AnalysisError, Result};
use crate::logs::kind::LogKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A classified log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub kind: LogKind,
    /// Second `_`-delimited token of the file name
    pub run_id: String,
}

impl LogFile {
    /// Classify a log file from its name
    ///
    /// The kind is resolved before the run id, so a name that is both
    /// unrecognized and malformed reports as an unknown type.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let kind = LogKind::classify(&file_name)
            .ok_or_else(|| AnalysisError::UnknownLogType(file_name.clone()))?;
        let run_id = run_id(&file_name)
            .ok_or_else(|| AnalysisError::MissingRunId(file_name.clone()))?
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            kind,
            run_id,
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Run identifier embedded in a log file name
pub fn run_id(file_name: &str) -> Option<&str> {
    file_name.split('_').nth(1).filter(|token| !token.is_empty())
}

/// Expand a glob pattern into the matching log files
pub fn discover(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry.map_err(|e| e.into_error())?;
        if path.is_file() {
            paths.push(path);
        }
    }
    debug!("Pattern {} matched {} files", pattern, paths.len());
    Ok(paths)
}
