//! Scoring boundary: the pre-trained model behind a small trait.
//!
//! The model artifact is loaded once at startup into an [`SharedScorer`] and
//! never reloaded. Handlers only see the trait object.

pub mod linear;
pub mod tree;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use crate::error::{PredictError, PredictResult};
use crate::features::{FeatureRow, FEATURE_COLUMNS};

pub use linear::LinearModel;
pub use tree::TreeEnsemble;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("shape mismatch: {0}")]
    Shape(String),
    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

/// Anything that maps Feature Rows to price estimates, one per row.
pub trait Scorer: Send + Sync {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, ModelError>;
    /// Model family, for logs and diagnostics.
    fn name(&self) -> &'static str;
}

pub type SharedScorer = Arc<dyn Scorer>;

/// On-disk model artifact, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    TreeEnsemble(TreeEnsemble),
    Linear(LinearModel),
}

impl ModelArtifact {
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(s).context("parsing model artifact")?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            ModelArtifact::TreeEnsemble(m) => m.validate(),
            ModelArtifact::Linear(m) => m.validate(),
        }
    }

    pub fn into_scorer(self) -> SharedScorer {
        match self {
            ModelArtifact::TreeEnsemble(m) => Arc::new(m),
            ModelArtifact::Linear(m) => Arc::new(m),
        }
    }
}

/// Load and validate a model artifact from a JSON file.
pub fn load_model<P: AsRef<Path>>(path: P) -> anyhow::Result<SharedScorer> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading model artifact from {}", path.display()))?;
    let artifact = ModelArtifact::from_json_str(&content)
        .with_context(|| format!("loading model artifact {}", path.display()))?;
    let scorer = artifact.into_scorer();
    info!(target: "model", kind = scorer.name(), path = %path.display(), "model loaded");
    Ok(scorer)
}

/// Score one completed row. Any model failure becomes a `Scoring` error.
pub fn score_row(scorer: &dyn Scorer, row: &FeatureRow) -> PredictResult<f64> {
    let out = scorer
        .predict(std::slice::from_ref(row))
        .map_err(|e| PredictError::Scoring(e.to_string()))?;
    let price = out
        .first()
        .copied()
        .ok_or_else(|| PredictError::Scoring("model returned no prediction".into()))?;
    if !price.is_finite() {
        return Err(PredictError::Scoring(format!(
            "model returned a non-finite value ({price})"
        )));
    }
    Ok(price)
}

pub(crate) fn check_feature_names(names: &[String]) -> Result<(), ModelError> {
    if names.len() != FEATURE_COLUMNS.len()
        || names.iter().zip(FEATURE_COLUMNS).any(|(a, b)| a != b)
    {
        return Err(ModelError::Shape(format!(
            "model columns {names:?} do not match {FEATURE_COLUMNS:?}"
        )));
    }
    Ok(())
}

pub(crate) fn check_width(got: usize, expected: usize) -> Result<(), ModelError> {
    if got != expected {
        return Err(ModelError::Shape(format!(
            "row has {got} columns, model expects {expected}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct Empty;
    impl Scorer for Empty {
        fn predict(&self, _rows: &[FeatureRow]) -> Result<Vec<f64>, ModelError> {
            Ok(Vec::new())
        }
        fn name(&self) -> &'static str {
            "empty"
        }
    }

    struct Broken;
    impl Scorer for Broken {
        fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, ModelError> {
            Err(ModelError::Shape(format!("got {} rows", rows.len())))
        }
        fn name(&self) -> &'static str {
            "broken"
        }
    }

    fn row() -> FeatureRow {
        FeatureRow {
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
        }
    }

    const LINEAR: &str = r#"{
        "kind": "linear",
        "feature_names": ["month_year","month_month","town","flat_type","storey_range",
                          "floor_area_sqm","flat_model","lease_commence_date",
                          "remaining_lease_months","block"],
        "intercept": 50000.0,
        "coefficients": [0,0,0,0,0,4000,0,0,0,0]
    }"#;

    #[test]
    fn scorer_failures_become_scoring_errors() {
        let err = score_row(&Broken, &row()).unwrap_err();
        assert!(matches!(err, PredictError::Scoring(ref m) if m.contains("1 rows")));

        let err = score_row(&Empty, &row()).unwrap_err();
        assert_eq!(err.kind(), "scoring");
    }

    #[test]
    fn artifact_kind_selects_model() {
        let scorer = ModelArtifact::from_json_str(LINEAR).unwrap().into_scorer();
        assert_eq!(scorer.name(), "linear");
        assert_eq!(score_row(scorer.as_ref(), &row()).unwrap(), 410000.0);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let bad = LINEAR.replace("\"linear\"", "\"neural\"");
        assert!(ModelArtifact::from_json_str(&bad).is_err());
    }

    #[test]
    fn load_model_reads_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(LINEAR.as_bytes()).unwrap();
        let scorer = load_model(f.path()).unwrap();
        assert_eq!(scorer.name(), "linear");

        let err = load_model("does/not/exist.json").err().unwrap();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
