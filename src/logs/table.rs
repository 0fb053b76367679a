//! Schema-driven loading of headerless CSV logs

use crate::error::{AnalysisError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One logged row: a player's metrics after a given turn
#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    pub turn: u64,
    pub player: u32,
    /// Metric values, in schema order
    pub values: Vec<f64>,
}

/// Rows of a log file with positionally assigned column names
#[derive(Debug, Clone, PartialEq)]
pub struct LogTable {
    columns: Vec<String>,
    rows: Vec<LogRow>,
}

impl LogTable {
    /// Load a log file, naming its columns after `columns`
    pub fn load(path: &Path, columns: &[&str]) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file, columns, path)
    }

    /// Parse headerless CSV rows from a reader
    ///
    /// `columns` must start with the turn and player columns; a shorter
    /// schema is rejected before any row is read. Every row must
    /// have exactly `columns.len()` fields; `source` only labels errors.
    pub fn from_reader<R: Read>(reader: R, columns: &[&str], source: &Path) -> Result<Self> {
        if columns.len() < 2 {
            return Err(AnalysisError::SchemaTooShort {
                path: source.to_path_buf(),
                found: columns.len(),
            });
        }

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(|source_err| AnalysisError::Csv {
                path: source.to_path_buf(),
                source: source_err,
            })?;
            rows.push(parse_row(&record, columns, source)?);
        }

        debug!("Loaded {} rows from {}", rows.len(), source.display());

        Ok(Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    /// Columns after turn and player
    pub fn metric_columns(&self) -> &[String] {
        self.columns.get(2..).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[LogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows grouped by player, in ascending player order
    pub fn by_player(&self) -> BTreeMap<u32, Vec<&LogRow>> {
        let mut groups: BTreeMap<u32, Vec<&LogRow>> = BTreeMap::new();
        for row in &self.rows {
            groups.entry(row.player).or_default().push(row);
        }
        groups
    }

    /// Rows logged for a single player
    pub fn for_player(&self, player: u32) -> impl Iterator<Item = &LogRow> {
        self.rows.iter().filter(move |row| row.player == player)
    }
}

fn parse_row(record: &StringRecord, columns: &[&str], source: &Path) -> Result<LogRow> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);

    if record.len() != columns.len() {
        return Err(AnalysisError::RowArity {
            path: source.to_path_buf(),
            line,
            expected: columns.len(),
            found: record.len(),
        });
    }

    let invalid = |index: usize, value: &str| AnalysisError::InvalidField {
        path: PathBuf::from(source),
        line,
        column: columns[index].to_string(),
        value: value.to_string(),
    };

    let turn = record[0].parse::<u64>().map_err(|_| invalid(0, &record[0]))?;
    let player = record[1].parse::<u32>().map_err(|_| invalid(1, &record[1]))?;
    let values = record
        .iter()
        .enumerate()
        .skip(2)
        .map(|(i, field)| field.parse::<f64>().map_err(|_| invalid(i, field)))
        .collect::<Result<Vec<_>>>()?;

    Ok(LogRow {
        turn,
        player,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::kind::LogKind;

    fn load(data: &str, kind: LogKind) -> Result<LogTable> {
        LogTable::from_reader(data.as_bytes(), &kind.columns(), Path::new("test.log"))
    }

    #[test]
    fn test_load_territory_rows() {
        let table = load("1,0,10,7,3\n1,1,8,5,3\n", LogKind::TerritoryCount).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.metric_columns(),
            ["total_territories", "frontline_territories", "backup_territories"]
        );
        assert_eq!(table.rows()[1].player, 1);
        assert_eq!(table.rows()[1].values, vec![8.0, 5.0, 3.0]);
    }

    #[test]
    fn test_continent_rows_with_padding() {
        let table = load(
            "4,0, 0.25, 0.0, 0.14285714285714285, 0.0, 0.5, 1.0\n",
            LogKind::ContinentOccupation,
        )
        .unwrap();

        assert_eq!(table.rows()[0].turn, 4);
        assert_eq!(table.rows()[0].values.len(), 6);
        assert_eq!(table.rows()[0].values[5], 1.0);
    }

    #[test]
    fn test_short_row_fails() {
        let err = load("1,0,10,7,3\n2,0,11,7\n", LogKind::TerritoryCount).unwrap_err();

        match err {
            AnalysisError::RowArity {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 5);
                assert_eq!(found, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_long_row_fails() {
        let err = load("1,0,10,7,3,9\n", LogKind::TroopSize).unwrap_err();
        assert!(matches!(err, AnalysisError::RowArity { found: 6, .. }));
    }

    #[test]
    fn test_invalid_field() {
        let err = load("1,zero,10,7,3\n", LogKind::TroopSize).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidField { ref column, .. } if column == "player"));
    }

    #[test]
    fn test_group_by_player_sorted() {
        let table = load(
            "1,2,1,1,0\n1,0,5,4,1\n2,2,2,1,1\n2,0,6,4,2\n1,1,3,3,0\n",
            LogKind::TerritoryCount,
        )
        .unwrap();

        let groups = table.by_player();
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(groups[&2].len(), 2);
        assert_eq!(table.for_player(0).count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let table = load("", LogKind::TroopSize).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_schema_without_player_column_rejected() {
        for columns in [&["turn"][..], &[][..]] {
            let err = LogTable::from_reader("1\n".as_bytes(), columns, Path::new("test.log"))
                .unwrap_err();
            assert!(matches!(
                err,
                AnalysisError::SchemaTooShort { found, .. } if found == columns.len()
            ));
        }
    }

    #[test]
    fn test_schema_without_metrics_loads() {
        let table =
            LogTable::from_reader("3,1\n".as_bytes(), &["turn", "player"], Path::new("test.log"))
                .unwrap();
        assert_eq!(table.rows()[0].turn, 3);
        assert!(table.metric_columns().is_empty());
    }
}
