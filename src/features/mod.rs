//! # Feature Encoder
//! Pure transformation from a raw form record to one validated [`FeatureRow`].
//! No I/O; the categorical tables are the only state and are read-only.
//!
//! Pipeline: parse period and lease → check widget bounds → assemble named
//! columns → verify and order them canonically → apply categorical codes.

pub mod block;
pub mod categorical;
pub mod lease;
pub mod period;
pub mod row;

pub use block::{encode_block, encode_block_batch};
pub use categorical::{encode_categorical, CategoryTable, CategoryTables};
pub use lease::parse_remaining_lease;
pub use period::parse_period;
pub use row::{order_columns, Cell, FeatureRow, FEATURE_COLUMNS, FEATURE_COUNT};

use crate::error::PredictResult;
use crate::form::RawRecord;

/// Encoder bound to one set of categorical tables.
#[derive(Debug, Clone, Default)]
pub struct FeatureEncoder {
    tables: CategoryTables,
}

impl FeatureEncoder {
    pub fn new(tables: CategoryTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &CategoryTables {
        &self.tables
    }

    /// Encode one submission.
    pub fn build_feature_row(&self, raw: &RawRecord) -> PredictResult<FeatureRow> {
        build_feature_row(raw, &self.tables)
    }
}

/// Columns as collected from the form, before ordering and encoding.
/// Order follows the form, not the model.
pub fn assemble_columns(raw: &RawRecord) -> PredictResult<Vec<(&'static str, Cell)>> {
    let (year, month) = parse_period(&raw.month)?;
    let remaining = parse_remaining_lease(&raw.remaining_lease)?;
    raw.check_bounds()?;

    Ok(vec![
        ("month_year", Cell::Int(i64::from(year))),
        ("month_month", Cell::Int(i64::from(month))),
        ("town", Cell::Label(raw.town.clone())),
        ("flat_type", Cell::Label(raw.flat_type.clone())),
        ("block", Cell::Label(raw.block.clone())),
        ("storey_range", Cell::Label(raw.storey_range.clone())),
        ("floor_area_sqm", Cell::Float(raw.floor_area_sqm)),
        ("flat_model", Cell::Label(raw.flat_model.clone())),
        ("lease_commence_date", Cell::Int(raw.lease_commence_date)),
        ("remaining_lease_months", Cell::Int(remaining)),
    ])
}

/// Build the canonical Feature Row for one raw record.
pub fn build_feature_row(raw: &RawRecord, tables: &CategoryTables) -> PredictResult<FeatureRow> {
    let columns = assemble_columns(raw)?;
    let [month_year, month_month, town, flat_type, storey_range, floor_area_sqm, flat_model, lease_commence_date, remaining_lease_months, block] =
        order_columns(&columns)?;

    let row = FeatureRow {
        month_year: month_year.as_int("month_year")?,
        month_month: month_month.as_int("month_month")?,
        town: encode_categorical("town", town.as_label("town")?, &tables.town)?,
        flat_type: encode_categorical(
            "flat_type",
            flat_type.as_label("flat_type")?,
            &tables.flat_type,
        )?,
        storey_range: encode_categorical(
            "storey_range",
            storey_range.as_label("storey_range")?,
            &tables.storey_range,
        )?,
        floor_area_sqm: floor_area_sqm.as_float("floor_area_sqm")?,
        flat_model: encode_categorical(
            "flat_model",
            flat_model.as_label("flat_model")?,
            &tables.flat_model,
        )?,
        lease_commence_date: lease_commence_date.as_int("lease_commence_date")?,
        remaining_lease_months: remaining_lease_months.as_int("remaining_lease_months")?,
        block: encode_block(block.as_label("block")?),
    };

    tracing::debug!(target: "features", ?row, "feature row built");
    Ok(row)
}
