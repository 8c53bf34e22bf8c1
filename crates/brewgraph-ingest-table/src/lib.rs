//! Table loading for brewgraph
//!
//! Reads brew logs from disk into a [`brewgraph_core::Table`]:
//! - CSV / TSV with a header row
//! - JSON: an array of flat objects, one per row
//!
//! Every cell is kept as raw text (`None` for empty/null); typing happens in
//! the core, which owns the coercion rules.

use anyhow::{anyhow, bail, Context, Result};
use brewgraph_core::Table;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv { delimiter: u8 },
    Json,
}

impl TableFormat {
    pub const CSV: TableFormat = TableFormat::Csv { delimiter: b',' };
    pub const TSV: TableFormat = TableFormat::Csv { delimiter: b'\t' };

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::CSV),
            "tsv" | "tab" => Ok(Self::TSV),
            "json" => Ok(Self::Json),
            other => Err(anyhow!(
                "unknown table format `{other}` (expected csv|tsv|json)"
            )),
        }
    }

    /// Guess from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| anyhow!("cannot infer table format of {}", path.display()))?;
        Self::parse(ext).with_context(|| format!("cannot infer table format of {}", path.display()))
    }
}

/// Load a table from `path`, inferring the format from the extension unless
/// `format` is given.
pub fn load_table(path: &Path, format: Option<TableFormat>) -> Result<Table> {
    let format = match format {
        Some(f) => f,
        None => TableFormat::from_path(path)?,
    };

    let table = match format {
        TableFormat::Csv { delimiter } => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            read_csv(file, delimiter)
        }
        TableFormat::Json => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            read_json(&text)
        }
    }
    .with_context(|| format!("failed to load table from {}", path.display()))?;

    debug!(
        path = %path.display(),
        columns = table.columns().len(),
        rows = table.len(),
        "loaded table"
    );
    Ok(table)
}

/// Read delimited text with a header row. Blank cells become null.
pub fn read_csv<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let columns: Vec<String> = rdr
        .headers()
        .context("failed to read header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("failed to read row {i}"))?;
        rows.push(
            record
                .iter()
                .map(|cell| (!cell.trim().is_empty()).then(|| cell.to_string()))
                .collect(),
        );
    }

    Ok(Table::new(columns, rows)?)
}

/// Read a JSON array of flat objects. Columns are the union of keys in
/// first-seen order; a key missing from an object is null for that row.
pub fn read_json(text: &str) -> Result<Table> {
    let value: Value = serde_json::from_str(text).context("invalid JSON")?;
    let Value::Array(items) = value else {
        bail!("expected a JSON array of row objects");
    };

    let mut columns: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let Value::Object(obj) = item else {
            bail!("row {i}: expected a JSON object");
        };
        for key in obj.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let mut rows = Vec::with_capacity(objects.len());
    for (i, obj) in objects.iter().enumerate() {
        let mut cells = Vec::with_capacity(columns.len());
        for column in &columns {
            let cell = match obj.get(column) {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => (!s.trim().is_empty()).then(|| s.clone()),
                Some(v @ (Value::Number(_) | Value::Bool(_))) => Some(v.to_string()),
                Some(_) => bail!("row {i}: column `{column}` holds a nested value"),
            };
            cells.push(cell);
        }
        rows.push(cells);
    }

    Ok(Table::new(columns, rows)?)
}
