use std::fmt;

use serde::Serialize;

use super::export::COLUMNS;
use super::normalizer::VehicleRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Integer,
    /// Number or text, whichever the upstream sent.
    Mixed,
}

impl ColumnKind {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Integer => "integer",
            ColumnKind::Mixed => "mixed",
        }
    }
}

const COLUMN_KINDS: [ColumnKind; 15] = [
    ColumnKind::Text,
    ColumnKind::Text,
    ColumnKind::Text,
    ColumnKind::Text,
    ColumnKind::Text,
    ColumnKind::Text,
    ColumnKind::Text,
    ColumnKind::Mixed,
    ColumnKind::Mixed,
    ColumnKind::Integer,
    ColumnKind::Text,
    ColumnKind::Integer,
    ColumnKind::Text,
    ColumnKind::Integer,
    ColumnKind::Text,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSummary {
    pub name: &'static str,
    pub non_null: usize,
    pub kind: ColumnKind,
}

/// Shape of an exported table: row count plus per-column fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

impl TableSummary {
    pub fn from_records(records: &[VehicleRecord]) -> Self {
        let mut non_null = [0usize; 15];
        for record in records {
            for (count, present) in non_null.iter_mut().zip(record.column_presence()) {
                if present {
                    *count += 1;
                }
            }
        }

        let columns = COLUMNS
            .into_iter()
            .zip(COLUMN_KINDS)
            .zip(non_null)
            .map(|((name, kind), non_null)| ColumnSummary {
                name,
                non_null,
                kind,
            })
            .collect();

        Self {
            rows: records.len(),
            columns,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|column| column.name == name)
    }
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Vehicle table: {} rows x {} columns",
            self.rows,
            self.columns.len()
        )?;
        writeln!(f, " {:>2}  {:<12}  {:>8}  {}", "#", "Column", "Non-Null", "Kind")?;
        for (index, column) in self.columns.iter().enumerate() {
            writeln!(
                f,
                " {:>2}  {:<12}  {:>8}  {}",
                index,
                column.name,
                column.non_null,
                column.kind.label()
            )?;
        }
        Ok(())
    }
}
