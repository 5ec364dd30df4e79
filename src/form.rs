//! # Input Collector
//!
//! The raw record submitted by the form, its defaults, and the schema the
//! page renders its widgets from. Numeric widget bounds are re-checked here
//! because the browser is not trusted to enforce them.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{PredictError, PredictResult};
use crate::features::categorical::{CategoryTable, CategoryTables};

pub const MIN_FLOOR_AREA_SQM: f64 = 0.0;
pub const MIN_LEASE_COMMENCE_YEAR: i64 = 1900;

/// One form submission, exactly as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    /// Sale period, `YYYY-MM`.
    pub month: String,
    pub town: String,
    pub flat_type: String,
    pub block: String,
    /// Collected by the form, not used by the model.
    pub street_name: String,
    pub storey_range: String,
    pub floor_area_sqm: f64,
    pub flat_model: String,
    pub lease_commence_date: i64,
    /// Free text such as `54 years 05 months`.
    pub remaining_lease: String,
}

impl Default for RawRecord {
    fn default() -> Self {
        Self {
            month: "2024-11".to_string(),
            town: "ANG MO KIO".to_string(),
            flat_type: "2 ROOM".to_string(),
            block: "123".to_string(),
            street_name: "EXAMPLE STREET".to_string(),
            storey_range: "01 TO 03".to_string(),
            floor_area_sqm: 50.0,
            flat_model: "Improved".to_string(),
            lease_commence_date: 2000,
            remaining_lease: "54 years 05 months".to_string(),
        }
    }
}

impl RawRecord {
    /// Enforce the numeric widget bounds (`min` values of the form).
    pub fn check_bounds(&self) -> PredictResult<()> {
        if !self.floor_area_sqm.is_finite() || self.floor_area_sqm < MIN_FLOOR_AREA_SQM {
            return Err(PredictError::validation(
                "floor_area_sqm",
                format!("must be a number >= {MIN_FLOOR_AREA_SQM}"),
            ));
        }
        if self.lease_commence_date < MIN_LEASE_COMMENCE_YEAR {
            return Err(PredictError::validation(
                "lease_commence_date",
                format!("must be a year >= {MIN_LEASE_COMMENCE_YEAR}"),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<&'static str>,
    },
    Select { choices: Vec<&'static str> },
    Number { min: f64, step: f64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    pub default: Value,
}

/// Widgets in the order the page shows them.
#[derive(Debug, Clone, Serialize)]
pub struct FormSchema {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(tables: &CategoryTables) -> Self {
        let d = RawRecord::default();
        let select = |t: &CategoryTable| Widget::Select {
            choices: t.labels().to_vec(),
        };

        let fields = vec![
            FieldSpec {
                name: "month",
                label: "Sale month (format: YYYY-MM)",
                widget: Widget::Text {
                    placeholder: Some("YYYY-MM"),
                },
                default: json!(d.month),
            },
            FieldSpec {
                name: "town",
                label: "Town",
                widget: select(&tables.town),
                default: json!(d.town),
            },
            FieldSpec {
                name: "flat_type",
                label: "Flat type",
                widget: select(&tables.flat_type),
                default: json!(d.flat_type),
            },
            FieldSpec {
                name: "block",
                label: "Block",
                widget: Widget::Text { placeholder: None },
                default: json!(d.block),
            },
            FieldSpec {
                name: "street_name",
                label: "Street name",
                widget: Widget::Text { placeholder: None },
                default: json!(d.street_name),
            },
            FieldSpec {
                name: "storey_range",
                label: "Storey range",
                widget: select(&tables.storey_range),
                default: json!(d.storey_range),
            },
            FieldSpec {
                name: "floor_area_sqm",
                label: "Floor area (m²)",
                widget: Widget::Number {
                    min: MIN_FLOOR_AREA_SQM,
                    step: 0.1,
                },
                default: json!(d.floor_area_sqm),
            },
            FieldSpec {
                name: "flat_model",
                label: "Flat model",
                widget: select(&tables.flat_model),
                default: json!(d.flat_model),
            },
            FieldSpec {
                name: "lease_commence_date",
                label: "Lease commencement year",
                widget: Widget::Number {
                    min: MIN_LEASE_COMMENCE_YEAR as f64,
                    step: 1.0,
                },
                default: json!(d.lease_commence_date),
            },
            FieldSpec {
                name: "remaining_lease",
                label: "Remaining lease (e.g. 54 years 05 months)",
                widget: Widget::Text {
                    placeholder: Some("54 years 05 months"),
                },
                default: json!(d.remaining_lease),
            },
        ];

        Self {
            title: "Flat resale price prediction",
            submit_label: "Predict",
            fields,
        }
    }
}
