//! Trained artifacts: feature schema, categorical encoders and their loading
//!
//! All artifacts are produced at training time, loaded exactly once at
//! process start and treated as immutable, shared, read-only state for the
//! rest of the process lifetime.

use crate::error::{ForecastError, Result};
use crate::models::{DemandModel, GradientBoostedModel};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// The ordered list of feature names the model was trained on.
///
/// The order is authoritative: the feature vector handed to the model must
/// match it column for column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    /// Create a schema from an ordered list of feature names.
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(ForecastError::ArtifactError(
                "feature schema must not be empty".to_string(),
            ));
        }

        let mut seen = HashMap::new();
        for (index, name) in names.iter().enumerate() {
            if let Some(previous) = seen.insert(name.clone(), index) {
                return Err(ForecastError::ArtifactError(format!(
                    "feature '{}' appears at positions {} and {}",
                    name, previous, index
                )));
            }
        }

        Ok(Self { names })
    }

    /// Load a schema from a JSON array of feature names.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let names: Vec<String> = serde_json::from_str(&text)?;
        Self::new(names)
    }

    /// The feature names in training order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the schema has no features.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column position of a feature name, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// Trained mapping from raw categorical values to integer codes.
///
/// Lookups are total: any miss, whether an unknown field, an unseen value or
/// an empty string, falls back to [`EncodingTable::DEFAULT_CODE`] so that
/// forecasting stays available for entities absent from the training data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncodingTable {
    fields: HashMap<String, HashMap<String, i64>>,
}

impl EncodingTable {
    /// Code substituted for any value the training data never saw
    pub const DEFAULT_CODE: i64 = 0;

    /// Create a table from per-field code maps.
    pub fn new(fields: HashMap<String, HashMap<String, i64>>) -> Self {
        Self { fields }
    }

    /// Load a table from a JSON object of `{field: {raw value: code}}` maps.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let fields: HashMap<String, HashMap<String, i64>> = serde_json::from_str(&text)?;
        Ok(Self::new(fields))
    }

    /// Encode a raw categorical value, falling back to the default code on
    /// any miss. Never fails.
    pub fn encode(&self, field: &str, raw: &str) -> i64 {
        match self.fields.get(field).and_then(|codes| codes.get(raw)) {
            Some(code) => *code,
            None => {
                debug!(
                    "no trained code for {}='{}', using default {}",
                    field,
                    raw,
                    Self::DEFAULT_CODE
                );
                Self::DEFAULT_CODE
            }
        }
    }

    /// The categorical fields the table covers.
    pub fn fields(&self) -> Vec<&str> {
        self.fields.keys().map(|k| k.as_str()).collect()
    }
}

/// Filesystem locations of the three serving artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    /// JSON array of feature names in training order
    pub schema_path: PathBuf,
    /// JSON object of per-field categorical code maps
    pub encoders_path: PathBuf,
    /// JSON dump of the gradient-boosted model
    pub model_path: PathBuf,
}

impl ArtifactPaths {
    /// Conventional artifact file names inside a model directory.
    pub fn for_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            schema_path: dir.join("feature_list.json"),
            encoders_path: dir.join("label_encoders.json"),
            model_path: dir.join("model.json"),
        }
    }

    /// Load artifact locations from a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let paths: Self = serde_json::from_str(&text)?;
        Ok(paths)
    }
}

/// The immutable bundle of loaded artifacts the service predicts with.
///
/// Constructed once at startup and shared read-only afterwards; concurrent
/// predictions need no locking.
#[derive(Debug)]
pub struct ServingContext {
    schema: FeatureSchema,
    encoders: EncodingTable,
    model: Box<dyn DemandModel>,
}

impl ServingContext {
    /// Bundle artifacts, checking that the model and schema agree on the
    /// feature count.
    pub fn new(
        schema: FeatureSchema,
        encoders: EncodingTable,
        model: Box<dyn DemandModel>,
    ) -> Result<Self> {
        if model.num_features() != schema.len() {
            return Err(ForecastError::ArtifactError(format!(
                "model expects {} features but schema lists {}",
                model.num_features(),
                schema.len()
            )));
        }

        Ok(Self {
            schema,
            encoders,
            model,
        })
    }

    /// The trained feature schema.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// The trained categorical encoders.
    pub fn encoders(&self) -> &EncodingTable {
        &self.encoders
    }

    /// The trained model.
    pub fn model(&self) -> &dyn DemandModel {
        self.model.as_ref()
    }
}

/// Loader for the serving artifacts
#[derive(Debug)]
pub struct ArtifactLoader;

impl ArtifactLoader {
    /// Load schema, encoders and model from disk into a serving context.
    pub fn load(paths: &ArtifactPaths) -> Result<ServingContext> {
        let schema = FeatureSchema::from_json_file(&paths.schema_path)?;
        let encoders = EncodingTable::from_json_file(&paths.encoders_path)?;
        let model = GradientBoostedModel::from_json_file(&paths.model_path)?;

        info!(
            "loaded artifacts: model '{}' with {} trees over {} features",
            model.name(),
            model.num_trees(),
            schema.len()
        );

        ServingContext::new(schema, encoders, Box::new(model))
    }
}
