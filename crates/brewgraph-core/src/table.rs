//! In-memory input table.
//!
//! Loaders hand the assembler a fully materialized `Table`: ordered column
//! names plus rows of raw text cells, `None` standing for null.

use crate::error::{GraphError, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Build a table, rejecting duplicate column names and rows whose width
    /// differs from the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if positions.insert(column.clone(), i).is_some() {
                return Err(GraphError::DuplicateColumn {
                    column: column.clone(),
                });
            }
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(GraphError::RaggedRow {
                    row: i,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }

        Ok(Self {
            columns,
            positions,
            rows,
        })
    }

    /// Convenience constructor for string literals; empty strings become null.
    pub fn from_strs(columns: &[&str], rows: &[&[&str]]) -> Result<Self> {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                    .collect()
            })
            .collect();
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row {
            index,
            cells,
            positions: &self.positions,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().enumerate().map(|(index, cells)| Row {
            index,
            cells,
            positions: &self.positions,
        })
    }
}

/// Borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    index: usize,
    cells: &'a [Option<String>],
    positions: &'a HashMap<String, usize>,
}

impl<'a> Row<'a> {
    /// Zero-based position of this row in its table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw cell, `None` when the column is unknown or the cell is null.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let pos = *self.positions.get(column)?;
        self.cells.get(pos)?.as_deref()
    }

    /// Trimmed cell, `None` unless it has visible content.
    pub fn text(&self, column: &str) -> Option<&'a str> {
        self.get(column).map(str::trim).filter(|s| !s.is_empty())
    }
}
