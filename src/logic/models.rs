//! Model Catalog
//!
//! The closed set of classifier names offered to the analyst. Starts from the
//! fixed enumeration; a successful `GET /models` replaces it.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use super::service::{ClassifierClient, ClientError, ModelDescriptor};
use crate::error::{DashboardError, DashboardResult};

/// Fixed model enumeration; the first entry is the default
pub const FIXED_MODELS: [&str; 5] = [
    "Random Forest",
    "XGBoost",
    "Decision Tree",
    "Gradient Boosting",
    "Logistic Regression",
];

#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Arc<RwLock<Vec<ModelDescriptor>>>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        let fixed = FIXED_MODELS
            .iter()
            .map(|name| ModelDescriptor {
                name: name.to_string(),
                filename: None,
                description: None,
            })
            .collect();

        Self {
            models: Arc::new(RwLock::new(fixed)),
        }
    }
}

impl ModelCatalog {
    pub fn names(&self) -> Vec<String> {
        self.models.read().iter().map(|m| m.name.clone()).collect()
    }

    pub fn descriptors(&self) -> Vec<ModelDescriptor> {
        self.models.read().clone()
    }

    pub fn default_model(&self) -> String {
        self.models
            .read()
            .first()
            .map(|m| m.name.clone())
            .unwrap_or_else(|| FIXED_MODELS[0].to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.read().iter().any(|m| m.name == name)
    }

    /// Check a user choice against the catalog
    pub fn validate(&self, name: &str) -> DashboardResult<String> {
        if self.contains(name) {
            Ok(name.to_string())
        } else {
            Err(DashboardError::Validation(format!("Unknown model: {}", name)))
        }
    }

    /// Take the service's list as the source of truth. Empty lists are ignored.
    pub fn replace(&self, models: Vec<ModelDescriptor>) -> bool {
        let models: Vec<ModelDescriptor> = models
            .into_iter()
            .filter(|m| !m.name.trim().is_empty())
            .collect();

        if models.is_empty() {
            log::warn!("Service returned no models, keeping current catalog");
            return false;
        }

        log::info!("Model catalog updated: {} models", models.len());
        *self.models.write() = models;
        true
    }

    /// Fetch `GET /models`; on failure the current list stays
    pub async fn refresh(&self, client: &ClassifierClient) -> Result<bool, ClientError> {
        match client.list_models().await {
            Ok(models) => Ok(self.replace(models)),
            Err(e) => {
                log::warn!("Model list unavailable: {}", e);
                Err(e)
            }
        }
    }
}

// ============================================================================
// MODEL DOCUMENTATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub strengths: &'static [&'static str],
    pub weaknesses: &'static [&'static str],
    pub use_case: &'static str,
}

pub fn model_documentation() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            name: "Random Forest",
            description: "Ensemble of decision trees; predicts the most frequent class across trees.",
            strengths: &["High accuracy", "Handles non-linear data well", "Robust to outliers"],
            weaknesses: &["Can be slow to predict", "Large model size"],
            use_case: "General purpose threat detection with balanced precision and recall.",
        },
        ModelInfo {
            name: "XGBoost",
            description: "Optimized distributed gradient boosting.",
            strengths: &["State-of-the-art performance", "Handles missing values", "Regularization prevents overfitting"],
            weaknesses: &["Sensitive to hyperparameters", "Black-box nature"],
            use_case: "When maximum accuracy is required and computational resources are available.",
        },
        ModelInfo {
            name: "Decision Tree",
            description: "Flowchart of feature tests whose leaves carry the predicted class.",
            strengths: &["Easy to interpret", "Fast training and prediction", "Requires little data preparation"],
            weaknesses: &["Prone to overfitting", "Unstable with small data variations"],
            use_case: "When explainability is critical and the dataset is simple.",
        },
        ModelInfo {
            name: "Gradient Boosting",
            description: "Sequential ensemble where each model corrects the errors of the previous ones.",
            strengths: &["High predictive accuracy", "Flexible with different loss functions"],
            weaknesses: &["Sensitive to noisy data", "Longer training time"],
            use_case: "Complex datasets with subtle patterns.",
        },
        ModelInfo {
            name: "Logistic Regression",
            description: "Statistical model of class probabilities.",
            strengths: &["Simple and interpretable", "Fast training", "Low resource usage"],
            weaknesses: &["Assumes linearity", "Not suitable for complex relationships"],
            use_case: "Baseline model and when low latency is the top priority.",
        },
    ]
}
