//! Chart descriptions built from log tables
//!
//! These are plain data: what lines a chart has and how it is labelled.
//! Drawing them is left to a [`ChartRenderer`](crate::analytics::render::ChartRenderer).

use crate::error::{AnalysisError, Result};
use crate::logs::table::LogTable;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// File stem of the single continent occupation chart
pub const OCCUPATION_CHART_STEM: &str = "occupation_ratio";

/// One line of a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    /// (turn, value) points in log order
    pub points: Vec<(f64, f64)>,
}

/// Everything needed to draw and save one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Output file name without extension
    pub file_stem: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Bounds of all points as ((x_min, x_max), (y_min, y_max))
    ///
    /// Degenerate or empty ranges are widened so they can be drawn.
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let points = self.series.iter().flat_map(|s| s.points.iter());
        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        (widen(x_min, x_max), widen(y_min, y_max))
    }
}

fn widen(min: f64, max: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        (0.0, 1.0)
    } else if min == max {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

/// One chart per metric column with one line per player
pub fn per_player_charts(table: &LogTable) -> Vec<ChartSpec> {
    let groups = table.by_player();
    debug!("Grouped {} rows into {} players", table.len(), groups.len());

    table
        .metric_columns()
        .iter()
        .enumerate()
        .map(|(index, column)| ChartSpec {
            file_stem: column.clone(),
            title: column.clone(),
            x_label: "turn".to_string(),
            y_label: "Count".to_string(),
            series: groups
                .iter()
                .map(|(player, rows)| Series {
                    label: format!("player_{}", player),
                    points: rows
                        .iter()
                        .map(|row| (row.turn as f64, row.values[index]))
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

/// A single chart of every metric column for one player
pub fn occupation_chart(table: &LogTable, player: u32, source: &Path) -> Result<ChartSpec> {
    let rows: Vec<_> = table.for_player(player).collect();
    if rows.is_empty() {
        return Err(AnalysisError::EmptySelection {
            path: source.to_path_buf(),
            player,
        });
    }

    let series = table
        .metric_columns()
        .iter()
        .enumerate()
        .map(|(index, column)| Series {
            label: column.clone(),
            points: rows
                .iter()
                .map(|row| (row.turn as f64, row.values[index]))
                .collect(),
        })
        .collect();

    Ok(ChartSpec {
        file_stem: OCCUPATION_CHART_STEM.to_string(),
        title: format!("Occupation ratio for player {}", player),
        x_label: "turn".to_string(),
        y_label: "Ratio".to_string(),
        series,
    })
}
