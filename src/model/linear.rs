//! Linear regression over the canonical columns.

use serde::Deserialize;

use super::{ModelError, Scorer};
use crate::features::FeatureRow;

#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn validate(&self) -> Result<(), ModelError> {
        super::check_feature_names(&self.feature_names)?;
        super::check_width(self.coefficients.len(), self.feature_names.len())?;
        if self.coefficients.iter().any(|c| !c.is_finite()) || !self.intercept.is_finite() {
            return Err(ModelError::Invalid("non-finite coefficient".into()));
        }
        Ok(())
    }
}

impl Scorer for LinearModel {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, ModelError> {
        rows.iter()
            .map(|row| {
                let values = row.values();
                super::check_width(values.len(), self.coefficients.len())?;
                let dot: f64 = values
                    .iter()
                    .zip(&self.coefficients)
                    .map(|(x, w)| x * w)
                    .sum();
                Ok(self.intercept + dot)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_COLUMNS;

    fn model(coefficients: Vec<f64>) -> LinearModel {
        LinearModel {
            feature_names: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            intercept: 1000.0,
            coefficients,
        }
    }

    #[test]
    fn intercept_plus_dot_product() {
        let mut w = vec![0.0; 10];
        w[5] = 4000.0; // floor_area_sqm
        w[8] = 100.0; // remaining_lease_months
        let m = model(w);
        m.validate().unwrap();

        let row = FeatureRow {
            month_year: 2024,
            month_month: 11,
            town: 1,
            flat_type: 2,
            storey_range: 2,
            floor_area_sqm: 90.0,
            flat_model: 0,
            lease_commence_date: 2000,
            remaining_lease_months: 653,
            block: 0,
        };
        let out = m.predict(&[row]).unwrap();
        assert_eq!(out, vec![1000.0 + 360000.0 + 65300.0]);
    }

    #[test]
    fn coefficient_count_must_match_columns() {
        let m = model(vec![1.0; 9]);
        assert!(matches!(m.validate(), Err(ModelError::Shape(_))));
    }
}
