use forecast_demand::models::gradient_boosting::{DecisionTree, TreeNode};
use forecast_demand::{
    EncodingTable, FeatureSchema, GradientBoostedModel, PredictionRequest, PredictionService,
    ServingContext,
};
use std::collections::HashMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Forecast Demand: Single Prediction Example");
    println!("==========================================\n");

    // Build a small serving context in code. Real deployments load the same
    // three artifacts from disk with PredictionService::load.
    println!("Installing artifacts...");
    let service = PredictionService::with_context(build_context()?);

    let health = service.health();
    println!(
        "Service ready: model_loaded={}, version={}\n",
        health.model_loaded, health.version
    );

    let request = PredictionRequest {
        store_id: "ST_001".to_string(),
        product_id: "PR_1001".to_string(),
        date: "2024-01-15".to_string(),
        price: 5.99,
        promotion_flag: false,
        chain: "Loblaws".to_string(),
        province: "ON".to_string(),
        category: "Dairy".to_string(),
        brand: "Brand_A".to_string(),
    };

    println!(
        "Predicting demand for {} / {} on {}...",
        request.store_id, request.product_id, request.date
    );
    let result = service.predict(&request)?;
    println!(
        "Predicted demand: {:.2} units ({:.2} - {:.2})",
        result.predicted_demand, result.confidence_lower, result.confidence_upper
    );

    // The same product on promotion
    let mut promoted = request.clone();
    promoted.promotion_flag = true;
    let result = service.predict(&promoted)?;
    println!(
        "With promotion:   {:.2} units ({:.2} - {:.2})",
        result.predicted_demand, result.confidence_lower, result.confidence_upper
    );

    // An unseen store degrades to the default encoding instead of failing
    let mut new_store = request.clone();
    new_store.store_id = "ST_999".to_string();
    let result = service.predict(&new_store)?;
    println!(
        "Unseen store:     {:.2} units ({:.2} - {:.2})",
        result.predicted_demand, result.confidence_lower, result.confidence_upper
    );

    if let Some(info) = service.model_info() {
        println!(
            "\nServed by '{}' ({} trees, {} features)",
            info.name, info.num_trees, info.num_features
        );
    }

    Ok(())
}

fn build_context() -> forecast_demand::Result<ServingContext> {
    let schema = FeatureSchema::new(
        [
            "price",
            "promotion_flag",
            "month",
            "day_of_week",
            "is_weekend",
            "store_id_encoded",
            "product_id_encoded",
            "category_encoded",
            "chain_encoded",
            "province_encoded",
            "sales_lag_7",
            "sales_rolling_mean_30",
            "product_category_share",
            "daily_store_volume",
        ]
        .iter()
        .map(|n| n.to_string())
        .collect(),
    )?;

    let mut fields: HashMap<String, HashMap<String, i64>> = HashMap::new();
    fields.insert(
        "store_id".to_string(),
        HashMap::from([("ST_001".to_string(), 1), ("ST_002".to_string(), 2)]),
    );
    fields.insert(
        "product_id".to_string(),
        HashMap::from([("PR_1001".to_string(), 1)]),
    );
    fields.insert(
        "category".to_string(),
        HashMap::from([("Dairy".to_string(), 1)]),
    );
    fields.insert(
        "chain".to_string(),
        HashMap::from([("Loblaws".to_string(), 1), ("Metro".to_string(), 2)]),
    );
    fields.insert(
        "province".to_string(),
        HashMap::from([("ON".to_string(), 1), ("QC".to_string(), 2)]),
    );
    let encoders = EncodingTable::new(fields);

    // A toy ensemble: promotions lift demand, higher prices lower it
    let promotion_tree = DecisionTree {
        nodes: vec![
            TreeNode::Split {
                feature: 1,
                threshold: 0.5,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { value: 70.0 },
            TreeNode::Leaf { value: 105.0 },
        ],
    };
    let price_tree = DecisionTree {
        nodes: vec![
            TreeNode::Split {
                feature: 0,
                threshold: 7.5,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { value: 12.0 },
            TreeNode::Leaf { value: -8.0 },
        ],
    };
    let model = GradientBoostedModel::new(
        "lightgbm_demand_v1",
        14,
        10.0,
        vec![promotion_tree, price_tree],
    )?;

    ServingContext::new(schema, encoders, Box::new(model))
}
