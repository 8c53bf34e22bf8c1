//! Typed view of one brew-session row.

use crate::error::{GraphError, Result};
use crate::notes::{parse_note_intensities, NoteIntensities};
use crate::schema::*;
use crate::slug::UNKNOWN;
use crate::table::Row;

/// Core fields of one row after defaulting and numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct BrewRecord {
    pub brew_id: String,
    pub barista: String,
    pub brew_date: String,

    pub roaster: String,
    pub coffee_name: String,
    pub roast_level: String,
    pub roast_date: String,

    pub grinder: String,
    pub grind_setting: String,

    pub brew_method: String,
    pub brewer_brand: String,
    pub brewer_model: String,
    pub filter_material: String,

    pub dose_g: f64,
    pub total_brew_time_sec: f64,

    pub notes: NoteIntensities,
    pub notes_overall: String,

    pub sweetness: f64,
    pub acidity: f64,
    pub bitterness: f64,
    pub body: f64,
    pub overall: f64,
}

impl BrewRecord {
    /// Extract the core fields of `row`.
    ///
    /// Absent string fields become `"unknown"`, absent optional text becomes
    /// `""`, absent numbers become `0.0`. A present numeric cell that is not
    /// a finite number fails the whole batch.
    pub fn from_row(row: &Row<'_>) -> Result<Self> {
        let field = |column: &str| row.text(column).unwrap_or(UNKNOWN).to_string();
        let optional = |column: &str| row.text(column).unwrap_or_default().to_string();
        let number = |column: &str| -> Result<f64> {
            match row.text(column) {
                None => Ok(0.0),
                Some(raw) => match raw.parse::<f64>() {
                    Ok(v) if v.is_finite() => Ok(v),
                    _ => Err(GraphError::InvalidNumber {
                        row: row.index(),
                        column: column.to_string(),
                        value: raw.to_string(),
                    }),
                },
            }
        };

        Ok(Self {
            brew_id: field(BREW_ID),
            barista: field(BARISTA),
            brew_date: field(BREW_DATE),
            roaster: field(ROASTER),
            coffee_name: field(COFFEE_NAME),
            roast_level: field(ROAST_LEVEL),
            roast_date: optional(ROAST_DATE),
            grinder: field(GRINDER),
            grind_setting: field(GRIND_SETTING),
            brew_method: field(BREW_METHOD),
            brewer_brand: field(BREWER_BRAND),
            brewer_model: field(BREWER_MODEL),
            filter_material: optional(FILTER_MATERIAL),
            dose_g: number(DOSE_G)?,
            total_brew_time_sec: number(TOTAL_BREW_TIME_SEC)?,
            notes: parse_note_intensities(row.get(NOTES_INTENSITIES)),
            notes_overall: optional(NOTES_OVERALL),
            sweetness: number(SWEETNESS)?,
            acidity: number(ACIDITY)?,
            bitterness: number(BITTERNESS)?,
            body: number(BODY)?,
            overall: number(OVERALL)?,
        })
    }

    pub fn roast_batch_label(&self) -> String {
        format!("{} ({})", self.coffee_name, self.roast_level)
    }

    pub fn brewer_label(&self) -> String {
        format!("{} {}", self.brewer_brand, self.brewer_model)
            .trim()
            .to_string()
    }

    pub fn evaluation_label(&self) -> String {
        format!("Eval {}", self.brew_id)
    }
}
