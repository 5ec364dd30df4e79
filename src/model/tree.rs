//! Gradient-boosted regression trees in the shape of an XGBoost JSON dump.
//!
//! Each tree is a flat node array rooted at index 0. A split sends a sample
//! to `yes` when `value < threshold`, to `no` otherwise, and to `missing`
//! (default `yes`) when the value is NaN. The prediction is `base_score`
//! plus the sum of the reached leaves.

use serde::Deserialize;

use super::{ModelError, Scorer};
use crate::features::FeatureRow;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Leaf {
        leaf: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
        #[serde(default)]
        missing: Option<usize>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Children must come after their parent, so every walk terminates.
    fn validate(&self, tree_idx: usize, n_features: usize) -> Result<(), ModelError> {
        let invalid = |msg: String| ModelError::Invalid(format!("tree {tree_idx}: {msg}"));

        if self.nodes.is_empty() {
            return Err(invalid("no nodes".into()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let Node::Split {
                feature,
                threshold,
                yes,
                no,
                missing,
            } = node
            {
                if *feature >= n_features {
                    return Err(invalid(format!("node {i} splits on unknown feature {feature}")));
                }
                if !threshold.is_finite() {
                    return Err(invalid(format!("node {i} has a non-finite threshold")));
                }
                for child in [Some(*yes), Some(*no), *missing].into_iter().flatten() {
                    if child <= i || child >= self.nodes.len() {
                        return Err(invalid(format!("node {i} points to invalid child {child}")));
                    }
                }
            }
        }
        Ok(())
    }

    fn leaf_value(&self, values: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { leaf } => return *leaf,
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    let v = values[*feature];
                    idx = if v.is_nan() {
                        missing.unwrap_or(*yes)
                    } else if v < *threshold {
                        *yes
                    } else {
                        *no
                    };
                }
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub base_score: f64,
    pub feature_names: Vec<String>,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    pub fn validate(&self) -> Result<(), ModelError> {
        super::check_feature_names(&self.feature_names)?;
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("ensemble has no trees".into()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.feature_names.len())?;
        }
        Ok(())
    }

    fn predict_one(&self, values: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.leaf_value(values)).sum::<f64>()
    }
}

impl Scorer for TreeEnsemble {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, ModelError> {
        rows.iter()
            .map(|row| {
                let values = row.values();
                super::check_width(values.len(), self.feature_names.len())?;
                Ok(self.predict_one(&values))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "tree_ensemble"
    }
}
