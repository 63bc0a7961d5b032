//! Request and result types for demand prediction

use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Date format accepted in prediction requests
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single demand prediction request
///
/// Identifies the store/product combination being forecast plus the pricing
/// and assortment context. The date is kept as the raw ISO string it arrived
/// as and parsed during validation, so results can echo it back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Store identifier (e.g. ST_001)
    pub store_id: String,
    /// Product identifier (e.g. PR_1001)
    pub product_id: String,
    /// Target date in YYYY-MM-DD format
    pub date: String,
    /// Unit price, must be positive
    pub price: f64,
    /// Whether the product is on promotion
    pub promotion_flag: bool,
    /// Store chain name (e.g. Loblaws)
    pub chain: String,
    /// Province code (e.g. ON)
    pub province: String,
    /// Product category (e.g. Dairy)
    pub category: String,
    /// Product brand (e.g. Brand_A)
    pub brand: String,
}

impl PredictionRequest {
    /// Validate the request before it reaches feature building.
    ///
    /// Malformed dates, non-positive prices and missing identifiers are
    /// rejected here; the feature builder itself never fails.
    pub fn validate(&self) -> Result<()> {
        if self.store_id.trim().is_empty() {
            return Err(ForecastError::InvalidRequest(
                "store_id must not be empty".to_string(),
            ));
        }

        if self.product_id.trim().is_empty() {
            return Err(ForecastError::InvalidRequest(
                "product_id must not be empty".to_string(),
            ));
        }

        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ForecastError::InvalidRequest(format!(
                "price must be positive, got {}",
                self.price
            )));
        }

        self.target_date()?;

        Ok(())
    }

    /// Parse the target date from the request.
    pub fn target_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|e| {
            ForecastError::InvalidRequest(format!(
                "date '{}' is not a valid YYYY-MM-DD date: {}",
                self.date, e
            ))
        })
    }
}

/// Result of a single demand prediction
///
/// The confidence band is a heuristic ±20% interval around the point
/// estimate, not a statistically derived predictive interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Store identifier echoed from the request
    pub store_id: String,
    /// Product identifier echoed from the request
    pub product_id: String,
    /// Target date echoed from the request
    pub date: String,
    /// Predicted demand quantity, never negative
    pub predicted_demand: f64,
    /// Lower confidence bound, never above the prediction
    pub confidence_lower: f64,
    /// Upper confidence bound, never below the prediction
    pub confidence_upper: f64,
    /// Name of the model that produced the prediction
    pub model_used: String,
    /// When the prediction was made
    pub predicted_at: DateTime<Utc>,
}

/// Aggregated outcome of a batch prediction
///
/// One bad request never aborts the batch: failures are collected per index
/// while the remaining requests are still served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Successful predictions, in request order
    pub results: Vec<PredictionResult>,
    /// Number of requests that produced a prediction
    pub success_count: usize,
    /// Number of requests that failed
    pub failure_count: usize,
    /// One message per failed request, referencing its index
    pub failures: Vec<String>,
}

/// Liveness report for the prediction service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Overall service status
    pub status: String,
    /// Whether model, schema and encoder artifacts are loaded
    pub model_loaded: bool,
    /// Library version serving the predictions
    pub version: String,
    /// When the status was taken
    pub checked_at: DateTime<Utc>,
}

/// Metadata about the currently loaded model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model name
    pub name: String,
    /// Number of features the model expects
    pub num_features: usize,
    /// Number of trees in the ensemble
    pub num_trees: usize,
}
