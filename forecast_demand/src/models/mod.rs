//! Demand models served by the prediction service
//!
//! The service treats the model as an opaque scorer: a 2-D feature matrix in
//! training-time column order goes in, one prediction per row comes out.
//! Training happens elsewhere; only serving lives here.

use crate::data::ModelInfo;
use crate::error::Result;
use ndarray::ArrayView2;
use std::fmt::Debug;

/// A trained regression model producing one demand estimate per feature row.
///
/// Implementations must be shareable across threads; the service keeps a
/// single read-only instance for the life of the process.
pub trait DemandModel: Debug + Send + Sync {
    /// Score a feature matrix whose columns follow the trained schema order.
    /// Returns one raw (unclamped) prediction per row.
    fn predict(&self, features: &ArrayView2<'_, f64>) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;

    /// Number of feature columns the model expects
    fn num_features(&self) -> usize;

    /// Metadata describing the model
    fn info(&self) -> ModelInfo;
}

pub mod gradient_boosting;

pub use gradient_boosting::GradientBoostedModel;
