//! Persisted model artifacts.
//!
//! The trained models ship as postcard-encoded weight vectors next to a JSON
//! metadata file. This system only ever reads them; training and export live
//! in the analysis pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::errors::{Error, Result};

/// Logistic no-show classifier: weights over a named feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl ClassifierArtifact {
    /// No-show probability for a feature vector, via the logistic link.
    pub fn predict_probability(&self, features: &[f64]) -> Result<f64> {
        let z = self.linear_term(features)?;
        Ok(1.0 / (1.0 + (-z).exp()))
    }

    fn linear_term(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.weights.len() {
            return Err(Error::Feature(format!(
                "classifier expects {} features, got {}",
                self.weights.len(),
                features.len()
            )));
        }
        Ok(self.intercept
            + self
                .weights
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>())
    }
}

/// Linear demand regressor: weights over a named feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressorArtifact {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl RegressorArtifact {
    /// Raw appointment-count prediction for a feature vector.
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.weights.len() {
            return Err(Error::Feature(format!(
                "forecaster expects {} features, got {}",
                self.weights.len(),
                features.len()
            )));
        }
        Ok(self.intercept
            + self
                .weights
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>())
    }
}

/// Training provenance stored alongside each model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub algorithm: String,
    #[serde(default)]
    pub trained_at: Option<String>,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logistic_link_is_bounded() {
        let model = ClassifierArtifact {
            weights: vec![2.5, -1.0],
            intercept: 0.3,
        };
        let p = model.predict_probability(&[10.0, -10.0]).unwrap();
        assert!(p > 0.99 && p <= 1.0);
        let p = model.predict_probability(&[-10.0, 10.0]).unwrap();
        assert!(p < 0.01 && p >= 0.0);
    }

    #[test]
    fn zero_weights_give_intercept_probability() {
        let model = ClassifierArtifact {
            weights: vec![0.0],
            intercept: 0.0,
        };
        let p = model.predict_probability(&[3.0]).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn feature_arity_mismatch_is_rejected() {
        let model = RegressorArtifact {
            weights: vec![1.0, 2.0],
            intercept: 0.0,
        };
        assert!(model.predict(&[1.0]).is_err());
    }

    #[test]
    fn regressor_is_linear() {
        let model = RegressorArtifact {
            weights: vec![100.0, -30.0],
            intercept: 50.0,
        };
        let y = model.predict(&[2.0, 1.0]).unwrap();
        assert!((y - 220.0).abs() < 1e-12);
    }
}
