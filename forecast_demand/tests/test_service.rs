use forecast_demand::models::gradient_boosting::{DecisionTree, TreeNode};
use forecast_demand::{
    EncodingTable, FeatureSchema, ForecastError, GradientBoostedModel, PredictionRequest,
    PredictionService, ServiceOptions, ServingContext,
};
use pretty_assertions::assert_eq;

fn schema() -> FeatureSchema {
    FeatureSchema::new(vec![
        "price".to_string(),
        "promotion_flag".to_string(),
        "store_id_encoded".to_string(),
        "sales_lag_7".to_string(),
    ])
    .unwrap()
}

fn promotion_stump(low: f64, high: f64) -> DecisionTree {
    DecisionTree {
        nodes: vec![
            TreeNode::Split {
                feature: 1,
                threshold: 0.5,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { value: low },
            TreeNode::Leaf { value: high },
        ],
    }
}

fn service_with_base(base_score: f64, trees: Vec<DecisionTree>) -> PredictionService {
    let model = GradientBoostedModel::new("test_gbm", schema().len(), base_score, trees).unwrap();
    let context = ServingContext::new(schema(), EncodingTable::default(), Box::new(model)).unwrap();
    PredictionService::with_context(context)
}

fn request() -> PredictionRequest {
    PredictionRequest {
        store_id: "ST_001".to_string(),
        product_id: "PR_1001".to_string(),
        date: "2024-01-15".to_string(),
        price: 5.99,
        promotion_flag: false,
        chain: "Loblaws".to_string(),
        province: "ON".to_string(),
        category: "Dairy".to_string(),
        brand: "Brand_A".to_string(),
    }
}

#[test]
fn prediction_is_clamped_rounded_and_banded() {
    let service = service_with_base(123.456, vec![]);

    let result = service.predict(&request()).unwrap();

    assert!(result.predicted_demand >= 0.0);
    assert_eq!(result.predicted_demand, 123.46);
    assert_eq!(result.confidence_lower, 98.76);
    assert_eq!(result.confidence_upper, 148.15);
    assert!(result.confidence_lower <= result.predicted_demand);
    assert!(result.predicted_demand <= result.confidence_upper);
    assert_eq!(result.model_used, "test_gbm");
}

#[test]
fn result_echoes_request_fields() {
    let service = service_with_base(50.0, vec![]);

    let result = service.predict(&request()).unwrap();

    assert_eq!(result.store_id, "ST_001");
    assert_eq!(result.product_id, "PR_1001");
    assert_eq!(result.date, "2024-01-15");
}

#[test]
fn negative_model_output_clamps_to_zero() {
    let service = service_with_base(-5.0, vec![]);

    let result = service.predict(&request()).unwrap();

    assert_eq!(result.predicted_demand, 0.0);
    assert_eq!(result.confidence_lower, 0.0);
    assert_eq!(result.confidence_upper, 0.0);
}

#[test]
fn demand_floor_keeps_predictions_at_least_one() {
    let service = service_with_base(-5.0, vec![]).with_options(ServiceOptions {
        demand_floor: 1.0,
    });

    let result = service.predict(&request()).unwrap();

    assert_eq!(result.predicted_demand, 1.0);
    assert_eq!(result.confidence_lower, 0.8);
    assert_eq!(result.confidence_upper, 1.2);
}

#[test]
fn promotion_changes_the_prediction() {
    let service = service_with_base(0.0, vec![promotion_stump(80.0, 110.0)]);

    let without = service.predict(&request()).unwrap();
    let mut promoted = request();
    promoted.promotion_flag = true;
    let with = service.predict(&promoted).unwrap();

    assert_eq!(without.predicted_demand, 80.0);
    assert_eq!(with.predicted_demand, 110.0);
}

#[test]
fn identical_requests_predict_identically() {
    let service = service_with_base(42.0, vec![promotion_stump(1.0, 2.0)]);

    let first = service.predict(&request()).unwrap();
    let second = service.predict(&request()).unwrap();

    assert_eq!(first.predicted_demand, second.predicted_demand);
    assert_eq!(first.confidence_lower, second.confidence_lower);
    assert_eq!(first.confidence_upper, second.confidence_upper);
    assert_eq!(first.model_used, second.model_used);
}

#[test]
fn predict_without_artifacts_is_model_unavailable() {
    let service = PredictionService::new();

    let result = service.predict(&request());
    assert!(matches!(result, Err(ForecastError::ModelUnavailable(_))));

    let batch = service.predict_batch(&[request()]);
    assert!(matches!(batch, Err(ForecastError::ModelUnavailable(_))));
}

#[test]
fn invalid_requests_are_rejected_before_prediction() {
    let service = service_with_base(10.0, vec![]);

    let mut bad_price = request();
    bad_price.price = 0.0;
    assert!(matches!(
        service.predict(&bad_price),
        Err(ForecastError::InvalidRequest(_))
    ));

    let mut bad_date = request();
    bad_date.date = "15/01/2024".to_string();
    assert!(matches!(
        service.predict(&bad_date),
        Err(ForecastError::InvalidRequest(_))
    ));

    let mut no_store = request();
    no_store.store_id = "  ".to_string();
    assert!(matches!(
        service.predict(&no_store),
        Err(ForecastError::InvalidRequest(_))
    ));
}

#[test]
fn batch_isolates_the_failing_request() {
    let service = service_with_base(30.0, vec![]);

    let mut second = request();
    second.price = -2.0;
    let mut third = request();
    third.store_id = "ST_002".to_string();

    let outcome = service
        .predict_batch(&[request(), second, third])
        .unwrap();

    assert_eq!(outcome.success_count, 2);
    assert_eq!(outcome.failure_count, 1);
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.failures[0].contains("request 1"));

    // Successes keep request order
    assert_eq!(outcome.results[0].store_id, "ST_001");
    assert_eq!(outcome.results[1].store_id, "ST_002");
}

#[test]
fn empty_batch_succeeds_with_zero_counts() {
    let service = service_with_base(30.0, vec![]);

    let outcome = service.predict_batch(&[]).unwrap();

    assert_eq!(outcome.success_count, 0);
    assert_eq!(outcome.failure_count, 0);
    assert!(outcome.results.is_empty());
    assert!(outcome.failures.is_empty());
}

#[test]
fn health_reports_artifact_state() {
    let empty = PredictionService::new();
    assert!(!empty.is_ready());
    assert!(!empty.health().model_loaded);
    assert_eq!(empty.health().status, "healthy");
    assert!(empty.model_info().is_none());

    let model =
        GradientBoostedModel::new("test_gbm", schema().len(), 10.0, vec![promotion_stump(1.0, 2.0)])
            .unwrap();
    let context = ServingContext::new(schema(), EncodingTable::default(), Box::new(model)).unwrap();
    let mut loaded = PredictionService::new();
    loaded.install(context);
    assert!(loaded.is_ready());
    assert!(loaded.health().model_loaded);

    let info = loaded.model_info().unwrap();
    assert_eq!(info.name, "test_gbm");
    assert_eq!(info.num_features, 4);
    assert_eq!(info.num_trees, 1);
}

#[test]
fn mismatched_schema_and_model_are_rejected() {
    let model = GradientBoostedModel::new("test_gbm", 2, 0.0, vec![]).unwrap();
    let result = ServingContext::new(schema(), EncodingTable::default(), Box::new(model));

    assert!(matches!(result, Err(ForecastError::ArtifactError(_))));
}
