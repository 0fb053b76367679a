//! Log kinds and their column schemas
//!
//! Each kind pairs the tag found in the log file name with the column layout
//! the simulation writes and the way its charts are drawn.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Leading columns shared by every log kind
pub const TURN_COLUMN: &str = "turn";
pub const PLAYER_COLUMN: &str = "player";

/// How the rows of a log are turned into charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartLayout {
    /// One chart per metric column, one line per player
    PerPlayer,
    /// One chart for the focus player, one line per metric column
    FocusPlayerRatio,
}

/// Closed set of log files produced by a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    TerritoryCount,
    TroopSize,
    ContinentOccupation,
}

impl LogKind {
    /// All kinds, in classification order
    pub const ALL: [LogKind; 3] = [
        LogKind::TerritoryCount,
        LogKind::TroopSize,
        LogKind::ContinentOccupation,
    ];

    /// Substring that identifies this kind in a log file name
    pub fn tag(self) -> &'static str {
        match self {
            LogKind::TerritoryCount => "OCCUPIED_TERRITORY_COUNT",
            LogKind::TroopSize => "TROOP_SIZE_EV",
            LogKind::ContinentOccupation => "CONTINENT_OCCUPATION_RATES",
        }
    }

    /// Metric columns following `turn` and `player`
    pub fn metric_columns(self) -> &'static [&'static str] {
        match self {
            LogKind::TerritoryCount => &[
                "total_territories",
                "frontline_territories",
                "backup_territories",
            ],
            LogKind::TroopSize => &["total_troops", "frontline_troops", "backup_troops"],
            // continent ids 0..=5 in board order
            LogKind::ContinentOccupation => &[
                "north_america",
                "south_america",
                "europe",
                "africa",
                "asia",
                "australia",
            ],
        }
    }

    /// Full positional schema of a row
    pub fn columns(self) -> Vec<&'static str> {
        let mut columns = vec![TURN_COLUMN, PLAYER_COLUMN];
        columns.extend_from_slice(self.metric_columns());
        columns
    }

    pub fn layout(self) -> ChartLayout {
        match self {
            LogKind::TerritoryCount | LogKind::TroopSize => ChartLayout::PerPlayer,
            LogKind::ContinentOccupation => ChartLayout::FocusPlayerRatio,
        }
    }

    /// Classify a log file name; the first kind whose tag occurs wins
    pub fn classify(file_name: &str) -> Option<LogKind> {
        Self::ALL
            .into_iter()
            .find(|kind| file_name.contains(kind.tag()))
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogKind::TerritoryCount => "territory count",
            LogKind::TroopSize => "troop size",
            LogKind::ContinentOccupation => "continent occupation",
        };
        f.write_str(name)
    }
}
