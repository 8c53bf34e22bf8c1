//! Core vs. dynamic columns.
//!
//! Core columns have a fixed role in the graph. Every other column is dynamic:
//! its per-row values are attached to the `BREWED_WITH` edge of that row, so a
//! dataset can record method-specific parameters (water temperature, bloom
//! time, ...) without a schema change.

use crate::error::{GraphError, Result};
use crate::table::Row;
use crate::value::{Attributes, Value};

pub const BREW_ID: &str = "brew_id";
pub const BARISTA: &str = "barista";
pub const BREW_DATE: &str = "brew_date";
pub const ROASTER: &str = "roaster";
pub const COFFEE_NAME: &str = "coffee_name";
pub const ROAST_LEVEL: &str = "roast_level";
pub const ROAST_DATE: &str = "roast_date";
pub const BREW_METHOD: &str = "brew_method";
pub const BREWER_BRAND: &str = "brewer_brand";
pub const BREWER_MODEL: &str = "brewer_model";
pub const DOSE_G: &str = "dose_g";
pub const TOTAL_BREW_TIME_SEC: &str = "total_brew_time_sec";
pub const NOTES_INTENSITIES: &str = "notes_intensities";
pub const SWEETNESS: &str = "sweetness_0_10";
pub const ACIDITY: &str = "acidity_0_10";
pub const BITTERNESS: &str = "bitterness_0_10";
pub const BODY: &str = "body_0_10";
pub const OVERALL: &str = "overall_0_10";
pub const GRINDER: &str = "grinder";
pub const GRIND_SETTING: &str = "grind_setting";
pub const FILTER_MATERIAL: &str = "filter_material";
pub const NOTES_OVERALL: &str = "notes_overall";

/// Columns with a fixed role; never captured as dynamic metadata.
pub const CORE_COLUMNS: [&str; 22] = [
    BREW_ID,
    BARISTA,
    BREW_DATE,
    ROASTER,
    COFFEE_NAME,
    ROAST_LEVEL,
    ROAST_DATE,
    BREW_METHOD,
    BREWER_BRAND,
    BREWER_MODEL,
    DOSE_G,
    TOTAL_BREW_TIME_SEC,
    NOTES_INTENSITIES,
    SWEETNESS,
    ACIDITY,
    BITTERNESS,
    BODY,
    OVERALL,
    GRINDER,
    GRIND_SETTING,
    FILTER_MATERIAL,
    NOTES_OVERALL,
];

/// Columns that must be present in the table header.
pub const REQUIRED_COLUMNS: [&str; 17] = [
    BREW_ID,
    BARISTA,
    BREW_DATE,
    ROASTER,
    COFFEE_NAME,
    ROAST_LEVEL,
    BREW_METHOD,
    BREWER_BRAND,
    BREWER_MODEL,
    DOSE_G,
    TOTAL_BREW_TIME_SEC,
    NOTES_INTENSITIES,
    SWEETNESS,
    ACIDITY,
    BITTERNESS,
    BODY,
    OVERALL,
];

pub fn is_core_column(column: &str) -> bool {
    CORE_COLUMNS.contains(&column)
}

/// Column classification for one table, computed once before any row is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    dynamic: Vec<String>,
}

impl TableSchema {
    /// Validate required columns and fix the dynamic set (header order).
    pub fn from_columns(columns: &[String]) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|required| !columns.iter().any(|c| c == *required))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(GraphError::MissingColumns { columns: missing });
        }

        let dynamic = columns
            .iter()
            .filter(|c| !is_core_column(c))
            .cloned()
            .collect();
        Ok(Self { dynamic })
    }

    pub fn dynamic_columns(&self) -> &[String] {
        &self.dynamic
    }

    /// Dynamic values present in `row`: numbers where the text parses as a
    /// finite float, trimmed text otherwise. Null and blank cells are left
    /// out entirely.
    pub fn dynamic_values(&self, row: &Row<'_>) -> Attributes {
        self.dynamic
            .iter()
            .filter_map(|column| {
                row.text(column)
                    .map(|raw| (column.clone(), Value::coerce(raw)))
            })
            .collect()
    }
}
