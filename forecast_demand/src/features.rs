//! Feature vector construction for demand prediction
//!
//! Turns a sparse, validated request into the exact ordered numeric row the
//! trained model expects. Resolution is a fixed three-tier order per schema
//! name: a directly derivable value, a categorical encoding, or a
//! name-pattern default for the historical aggregates the serving path
//! cannot compute.

use crate::artifacts::{EncodingTable, FeatureSchema};
use crate::data::PredictionRequest;
use chrono::NaiveDate;
use ndarray::{Array2, Axis};
use retail_calendar::CalendarFeatures;
use std::collections::HashMap;

/// A single row of named numeric values in schema order.
///
/// Ephemeral: built per request, handed to the model, discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Feature names in schema order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Feature values in schema order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of features in the row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a feature by name, if the schema lists it.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|index| self.values[index])
    }

    /// The row as a 1×N matrix for the model.
    pub fn to_matrix(&self) -> Array2<f64> {
        ndarray::Array1::from(self.values.clone()).insert_axis(Axis(0))
    }
}

/// Builds feature vectors against a fixed schema and encoding table.
#[derive(Debug, Clone, Copy)]
pub struct FeatureVectorBuilder<'a> {
    schema: &'a FeatureSchema,
    encoders: &'a EncodingTable,
}

impl<'a> FeatureVectorBuilder<'a> {
    /// Create a builder over the loaded artifacts.
    pub fn new(schema: &'a FeatureSchema, encoders: &'a EncodingTable) -> Self {
        Self { schema, encoders }
    }

    /// Build the ordered feature row for a validated request.
    ///
    /// Total function: unseen categorical values encode to the default code
    /// and features the request cannot supply get pattern defaults, so a
    /// structurally valid request always produces a full row. Values derived
    /// for names the schema does not list are dropped; the schema alone
    /// decides membership and order.
    pub fn build(&self, request: &PredictionRequest, date: NaiveDate) -> FeatureVector {
        let mut known: HashMap<&str, f64> = HashMap::new();

        // Tier 1: direct passthrough and calendar derivation
        known.insert("price", request.price);
        known.insert(
            "promotion_flag",
            if request.promotion_flag { 1.0 } else { 0.0 },
        );
        for (name, value) in CalendarFeatures::from_date(date).feature_pairs() {
            known.insert(name, value);
        }

        // Tier 2: categorical encodings with unseen-value fallback
        let categorical = [
            ("store_id", "store_id_encoded", &request.store_id),
            ("product_id", "product_id_encoded", &request.product_id),
            ("category", "category_encoded", &request.category),
            ("brand", "brand_encoded", &request.brand),
            ("chain", "chain_encoded", &request.chain),
            ("province", "province_encoded", &request.province),
        ];
        for (field, feature_name, raw) in categorical {
            known.insert(feature_name, self.encoders.encode(field, raw) as f64);
        }

        // Tier 3: resolve in schema order, pattern defaults for the rest
        let values = self
            .schema
            .names()
            .iter()
            .map(|name| match known.get(name.as_str()) {
                Some(value) => *value,
                None => default_feature_value(name),
            })
            .collect();

        FeatureVector {
            names: self.schema.names().to_vec(),
            values,
        }
    }
}

/// Default value for a feature the request cannot supply directly.
///
/// The serving path has no access to the historical database used at
/// training time, so lag/rolling aggregates, market shares and volume
/// features get plausible baselines instead. First match wins; the order of
/// the checks is part of the contract.
pub fn default_feature_value(name: &str) -> f64 {
    if name.contains("lag") || name.contains("rolling") {
        10.0
    } else if name.contains("share") {
        0.1
    } else if name.contains("daily") {
        100.0
    } else {
        0.0
    }
}
