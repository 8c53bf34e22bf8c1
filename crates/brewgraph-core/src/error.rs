//! Errors raised while building a graph.
//!
//! Every variant is fatal for the batch: a failed `build_graph` call produces
//! no graph. Recoverable conditions (malformed note segments, missing optional
//! fields) never surface here.

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Required columns absent from the table header.
    #[error("missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// A numeric core field holds something that is not a finite number.
    #[error("row {row}: column `{column}` is not numeric: {value:?}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: expected {expected} cells, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("duplicate column `{column}`")]
    DuplicateColumn { column: String },
}

impl GraphError {
    /// Column names this error is about, if any.
    pub fn columns(&self) -> Vec<&str> {
        match self {
            GraphError::MissingColumns { columns } => columns.iter().map(String::as_str).collect(),
            GraphError::InvalidNumber { column, .. } | GraphError::DuplicateColumn { column } => {
                vec![column.as_str()]
            }
            GraphError::RaggedRow { .. } => Vec::new(),
        }
    }
}
