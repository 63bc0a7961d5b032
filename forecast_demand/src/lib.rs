//! # Forecast Demand
//!
//! A Rust library for serving retail demand forecasts from a trained
//! gradient-boosted regression model.
//!
//! ## Features
//!
//! - Feature vector construction from sparse prediction requests (calendar
//!   derivation, categorical encoding with fallback, pattern-based defaults)
//! - Serving of gradient-boosted tree ensembles shipped as JSON artifacts
//! - Single and batch prediction with per-item failure isolation
//! - Heuristic ±20% confidence bands around the point estimate
//! - Liveness reporting for the loaded artifacts
//!
//! ## Quick Start
//!
//! ```
//! use forecast_demand::{
//!     EncodingTable, FeatureSchema, GradientBoostedModel, PredictionRequest,
//!     PredictionService, ServingContext,
//! };
//! use std::collections::HashMap;
//!
//! # fn main() -> forecast_demand::Result<()> {
//! // Artifacts normally come from disk via ArtifactLoader; a constant model
//! // (no trees, base score 25) keeps this example self-contained.
//! let schema = FeatureSchema::new(vec![
//!     "price".to_string(),
//!     "promotion_flag".to_string(),
//!     "store_id_encoded".to_string(),
//! ])?;
//! let model = GradientBoostedModel::new("demo", 3, 25.0, vec![])?;
//! let context = ServingContext::new(schema, EncodingTable::default(), Box::new(model))?;
//!
//! let service = PredictionService::with_context(context);
//!
//! let request = PredictionRequest {
//!     store_id: "ST_001".to_string(),
//!     product_id: "PR_1001".to_string(),
//!     date: "2024-01-15".to_string(),
//!     price: 5.99,
//!     promotion_flag: false,
//!     chain: "Loblaws".to_string(),
//!     province: "ON".to_string(),
//!     category: "Dairy".to_string(),
//!     brand: "Brand_A".to_string(),
//! };
//!
//! let result = service.predict(&request)?;
//! assert_eq!(result.predicted_demand, 25.0);
//! assert!(result.confidence_lower <= result.predicted_demand);
//! assert!(result.predicted_demand <= result.confidence_upper);
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod data;
pub mod error;
pub mod features;
pub mod models;
pub mod service;
pub mod utils;

// Re-export commonly used types
pub use crate::artifacts::{
    ArtifactLoader, ArtifactPaths, EncodingTable, FeatureSchema, ServingContext,
};
pub use crate::data::{
    BatchOutcome, HealthStatus, ModelInfo, PredictionRequest, PredictionResult,
};
pub use crate::error::{ForecastError, Result};
pub use crate::features::{FeatureVector, FeatureVectorBuilder};
pub use crate::models::{DemandModel, GradientBoostedModel};
pub use crate::service::{PredictionService, ServiceOptions};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
