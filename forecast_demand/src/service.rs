//! Prediction service over loaded artifacts
//!
//! Binds the feature builder and the model together: validate the request,
//! build the ordered feature row, score it, clamp and round the output and
//! attach the heuristic confidence band.

use crate::artifacts::{ArtifactLoader, ArtifactPaths, ServingContext};
use crate::data::{BatchOutcome, HealthStatus, ModelInfo, PredictionRequest, PredictionResult};
use crate::error::{ForecastError, Result};
use crate::features::FeatureVectorBuilder;
use crate::utils::round2;
use chrono::Utc;
use std::sync::Arc;

/// Half-width of the heuristic confidence band as a fraction of the point
/// estimate. A stand-in for a true predictive interval.
const CONFIDENCE_BAND: f64 = 0.2;

/// Tunable serving behavior
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOptions {
    /// Minimum demand the service will ever report. Defaults to 0 since
    /// demand cannot be negative; deployments that must never recommend zero
    /// stock can raise it to 1.
    pub demand_floor: f64,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self { demand_floor: 0.0 }
    }
}

/// Demand prediction service.
///
/// Starts without artifacts and reports itself not ready until a
/// [`ServingContext`] is installed. The installed context is immutable and
/// shared; concurrent `predict` calls proceed in parallel without locking.
#[derive(Debug, Default)]
pub struct PredictionService {
    context: Option<Arc<ServingContext>>,
    options: ServiceOptions,
}

impl PredictionService {
    /// Create a service with no artifacts loaded.
    pub fn new() -> Self {
        Self {
            context: None,
            options: ServiceOptions::default(),
        }
    }

    /// Create a service over an already constructed context.
    pub fn with_context(context: ServingContext) -> Self {
        Self {
            context: Some(Arc::new(context)),
            options: ServiceOptions::default(),
        }
    }

    /// Replace the serving options.
    pub fn with_options(mut self, options: ServiceOptions) -> Self {
        self.options = options;
        self
    }

    /// Load artifacts from disk and install them.
    pub fn load(&mut self, paths: &ArtifactPaths) -> Result<()> {
        self.context = Some(Arc::new(ArtifactLoader::load(paths)?));
        Ok(())
    }

    /// Install an already constructed context.
    pub fn install(&mut self, context: ServingContext) {
        self.context = Some(Arc::new(context));
    }

    /// Whether model, schema and encoder artifacts are loaded.
    pub fn is_ready(&self) -> bool {
        self.context.is_some()
    }

    /// Liveness probe.
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            model_loaded: self.is_ready(),
            version: crate::VERSION.to_string(),
            checked_at: Utc::now(),
        }
    }

    /// Metadata about the loaded model, if any.
    pub fn model_info(&self) -> Option<ModelInfo> {
        self.context.as_ref().map(|context| context.model().info())
    }

    /// Predict demand for a single request.
    ///
    /// Fails with [`ForecastError::ModelUnavailable`] when no artifacts are
    /// loaded and [`ForecastError::InvalidRequest`] on a malformed request;
    /// a structurally valid request against loaded artifacts always yields a
    /// result.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        let context = self.require_context()?;

        request.validate()?;
        let date = request.target_date()?;

        let builder = FeatureVectorBuilder::new(context.schema(), context.encoders());
        let vector = builder.build(request, date);
        let matrix = vector.to_matrix();

        let raw = context.model().predict(&matrix.view())?;
        let raw = raw.first().copied().ok_or_else(|| {
            ForecastError::PredictionError("model returned no prediction for the row".to_string())
        })?;

        // Demand cannot be negative; the band is ±20% around the clamped
        // point estimate with the lower bound kept non-negative.
        let predicted = raw.max(self.options.demand_floor).max(0.0);
        let lower = (predicted * (1.0 - CONFIDENCE_BAND)).max(0.0);
        let upper = predicted * (1.0 + CONFIDENCE_BAND);

        Ok(PredictionResult {
            store_id: request.store_id.clone(),
            product_id: request.product_id.clone(),
            date: request.date.clone(),
            predicted_demand: round2(predicted),
            confidence_lower: round2(lower),
            confidence_upper: round2(upper),
            model_used: context.model().name().to_string(),
            predicted_at: Utc::now(),
        })
    }

    /// Predict demand for a sequence of requests, isolating failures.
    ///
    /// Each request goes through the single-prediction path independently;
    /// one bad entry never aborts the batch. Successes keep request order
    /// and every failure message names the offending index.
    pub fn predict_batch(&self, requests: &[PredictionRequest]) -> Result<BatchOutcome> {
        self.require_context()?;

        let mut results = Vec::with_capacity(requests.len());
        let mut failures = Vec::new();

        for (index, request) in requests.iter().enumerate() {
            match self.predict(request) {
                Ok(result) => results.push(result),
                Err(err) => failures.push(format!("request {}: {}", index, err)),
            }
        }

        Ok(BatchOutcome {
            success_count: results.len(),
            failure_count: failures.len(),
            results,
            failures,
        })
    }

    fn require_context(&self) -> Result<&ServingContext> {
        self.context.as_deref().ok_or_else(|| {
            ForecastError::ModelUnavailable("no artifacts loaded".to_string())
        })
    }
}
