//! Feature Row: the canonical ten-column record consumed by the model.

use serde::Serialize;

use crate::error::{PredictError, PredictResult};

/// Column names in the exact order the model was trained with.
pub const FEATURE_COLUMNS: [&str; 10] = [
    "month_year",
    "month_month",
    "town",
    "flat_type",
    "storey_range",
    "floor_area_sqm",
    "flat_model",
    "lease_commence_date",
    "remaining_lease_months",
    "block",
];

/// Number of columns in a Feature Row.
pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureRow {
    pub month_year: i64,
    pub month_month: i64,
    pub town: i64,
    pub flat_type: i64,
    pub storey_range: i64,
    pub floor_area_sqm: f64,
    pub flat_model: i64,
    pub lease_commence_date: i64,
    pub remaining_lease_months: i64,
    pub block: i64,
}

impl FeatureRow {
    /// Values in canonical column order, widened to f64 for scoring.
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.month_year as f64,
            self.month_month as f64,
            self.town as f64,
            self.flat_type as f64,
            self.storey_range as f64,
            self.floor_area_sqm,
            self.flat_model as f64,
            self.lease_commence_date as f64,
            self.remaining_lease_months as f64,
            self.block as f64,
        ]
    }
}

/// A not-yet-encoded column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Label(String),
}

impl Cell {
    pub fn as_int(&self, field: &str) -> PredictResult<i64> {
        match self {
            Cell::Int(v) => Ok(*v),
            other => Err(type_mismatch(field, "integer", other)),
        }
    }

    pub fn as_float(&self, field: &str) -> PredictResult<f64> {
        match self {
            Cell::Float(v) => Ok(*v),
            Cell::Int(v) => Ok(*v as f64),
            other => Err(type_mismatch(field, "number", other)),
        }
    }

    pub fn as_label(&self, field: &str) -> PredictResult<&str> {
        match self {
            Cell::Label(v) => Ok(v.as_str()),
            other => Err(type_mismatch(field, "label", other)),
        }
    }
}

fn type_mismatch(field: &str, expected: &str, got: &Cell) -> PredictError {
    PredictError::Schema {
        field: format!("{field} (expected {expected}, got {got:?})"),
    }
}

/// Pick the expected columns out of `columns` in canonical order.
///
/// Extra columns are ignored; the first missing expected column is an error.
pub fn order_columns(columns: &[(&str, Cell)]) -> PredictResult<[Cell; FEATURE_COUNT]> {
    let mut ordered: Vec<Cell> = Vec::with_capacity(FEATURE_COUNT);
    for name in FEATURE_COLUMNS {
        let cell = columns
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| c.clone())
            .ok_or_else(|| PredictError::Schema {
                field: name.to_string(),
            })?;
        ordered.push(cell);
    }
    ordered.try_into().map_err(|_| PredictError::Schema {
        field: "row width".to_string(),
    })
}
