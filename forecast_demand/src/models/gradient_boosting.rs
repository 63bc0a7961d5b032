//! Serving-side gradient-boosted regression trees
//!
//! The trained ensemble is shipped as a JSON dump of trees. Each tree is a
//! flat node array: split nodes carry a feature index, a threshold and two
//! child indices; leaves carry the value to add to the running score. A row's
//! prediction is the base score plus one leaf value per tree, taking the left
//! child when `row[feature] <= threshold`.

use crate::data::ModelInfo;
use crate::error::{ForecastError, Result};
use crate::models::DemandModel;
use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A node in a decision tree: either an internal split or a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Internal split node
    Split {
        /// Column index into the feature vector
        feature: usize,
        /// Split threshold; `<=` goes left
        threshold: f64,
        /// Index of the left child within the tree's node array
        left: usize,
        /// Index of the right child within the tree's node array
        right: usize,
    },
    /// Leaf node contributing its value to the ensemble score
    Leaf {
        /// Leaf output, shrinkage already applied at training time
        value: f64,
    },
}

/// A single regression tree as a flat node array rooted at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Nodes of the tree; children always come after their parent
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk the tree for one feature row. Only callable after structural
    /// validation, which guarantees in-bounds children and termination.
    fn score(&self, row: &ArrayView1<'_, f64>) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Check node indices against the tree and the declared feature count.
    fn validate(&self, tree_index: usize, num_features: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(ForecastError::ArtifactError(format!(
                "tree {} has no nodes",
                tree_index
            )));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= num_features {
                    return Err(ForecastError::ArtifactError(format!(
                        "tree {} node {} splits on feature {} but the model only has {}",
                        tree_index, index, feature, num_features
                    )));
                }

                // Children strictly after their parent: traversal always
                // makes progress and terminates at a leaf.
                for &child in [left, right] {
                    if child <= index || child >= self.nodes.len() {
                        return Err(ForecastError::ArtifactError(format!(
                            "tree {} node {} has out-of-order child index {}",
                            tree_index, index, child
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

/// A trained gradient-boosted tree ensemble for demand regression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoostedModel {
    name: String,
    num_features: usize,
    base_score: f64,
    trees: Vec<DecisionTree>,
}

impl GradientBoostedModel {
    /// Create a model from its parts, validating the tree structure.
    pub fn new(
        name: impl Into<String>,
        num_features: usize,
        base_score: f64,
        trees: Vec<DecisionTree>,
    ) -> Result<Self> {
        let model = Self {
            name: name.into(),
            num_features,
            base_score,
            trees,
        };
        model.validate()?;
        Ok(model)
    }

    /// Load a model from its JSON dump, validating the tree structure.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&text)?;
        model.validate()?;
        Ok(model)
    }

    /// Number of trees in the ensemble.
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// The base score every prediction starts from.
    pub fn base_score(&self) -> f64 {
        self.base_score
    }

    fn validate(&self) -> Result<()> {
        if self.num_features == 0 {
            return Err(ForecastError::ArtifactError(
                "model declares zero features".to_string(),
            ));
        }

        for (tree_index, tree) in self.trees.iter().enumerate() {
            tree.validate(tree_index, self.num_features)?;
        }

        Ok(())
    }

    fn score_row(&self, row: &ArrayView1<'_, f64>) -> f64 {
        self.base_score + self.trees.iter().map(|tree| tree.score(row)).sum::<f64>()
    }
}

impl DemandModel for GradientBoostedModel {
    fn predict(&self, features: &ArrayView2<'_, f64>) -> Result<Vec<f64>> {
        if features.ncols() != self.num_features {
            return Err(ForecastError::PredictionError(format!(
                "feature matrix has {} columns but the model expects {}",
                features.ncols(),
                self.num_features
            )));
        }

        Ok(features
            .outer_iter()
            .map(|row| self.score_row(&row))
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn num_features(&self) -> usize {
        self.num_features
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            name: self.name.clone(),
            num_features: self.num_features,
            num_trees: self.trees.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn stump(feature: usize, threshold: f64, low: f64, high: f64) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: low },
                TreeNode::Leaf { value: high },
            ],
        }
    }

    #[test]
    fn sums_base_score_and_leaves() {
        let model = GradientBoostedModel::new(
            "test_gbm",
            2,
            5.0,
            vec![stump(0, 10.0, 1.0, 2.0), stump(1, 0.5, 10.0, 20.0)],
        )
        .unwrap();

        let features = array![[3.0, 0.0], [15.0, 1.0]];
        let predictions = model.predict(&features.view()).unwrap();

        // row 0: 5.0 + 1.0 + 10.0, row 1: 5.0 + 2.0 + 20.0
        assert_eq!(predictions, vec![16.0, 27.0]);
    }

    #[test]
    fn threshold_boundary_goes_left() {
        let model = GradientBoostedModel::new("test_gbm", 1, 0.0, vec![stump(0, 10.0, -1.0, 1.0)])
            .unwrap();

        let predictions = model.predict(&array![[10.0]].view()).unwrap();
        assert_eq!(predictions, vec![-1.0]);
    }

    #[test]
    fn rejects_wrong_column_count() {
        let model = GradientBoostedModel::new("test_gbm", 3, 0.0, vec![]).unwrap();

        let result = model.predict(&array![[1.0, 2.0]].view());
        assert!(matches!(result, Err(ForecastError::PredictionError(_))));
    }

    #[test]
    fn rejects_out_of_bounds_feature() {
        let result = GradientBoostedModel::new("test_gbm", 1, 0.0, vec![stump(4, 1.0, 0.0, 1.0)]);
        assert!(matches!(result, Err(ForecastError::ArtifactError(_))));
    }

    #[test]
    fn rejects_backward_child_index() {
        let tree = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 1,
                },
                TreeNode::Leaf { value: 1.0 },
            ],
        };

        let result = GradientBoostedModel::new("test_gbm", 1, 0.0, vec![tree]);
        assert!(matches!(result, Err(ForecastError::ArtifactError(_))));
    }

    #[test]
    fn round_trips_through_json() {
        let model = GradientBoostedModel::new("test_gbm", 1, 2.5, vec![stump(0, 3.0, 1.0, -1.0)])
            .unwrap();

        let json = serde_json::to_string(&model).unwrap();
        let restored: GradientBoostedModel = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.name, "test_gbm");
        assert_eq!(restored.base_score(), 2.5);
        assert_eq!(restored.trees, model.trees);
    }
}
