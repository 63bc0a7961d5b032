use forecast_demand::utils::generate_test_requests;
use forecast_demand::{
    EncodingTable, FeatureSchema, GradientBoostedModel, PredictionService, ServingContext,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Forecast Demand: Batch Prediction Example");
    println!("=========================================\n");

    // A constant model keeps the example focused on the batch mechanics
    let schema = FeatureSchema::new(
        ["price", "promotion_flag", "store_id_encoded", "sales_lag_7"]
            .iter()
            .map(|n| n.to_string())
            .collect(),
    )?;
    let model = GradientBoostedModel::new("lightgbm_demand_v1", 4, 85.0, vec![])?;
    let context = ServingContext::new(schema, EncodingTable::default(), Box::new(model))?;
    let service = PredictionService::with_context(context);

    // Ten generated requests plus one deliberately broken entry
    let mut requests = generate_test_requests(10);
    let mut broken = requests[0].clone();
    broken.price = -1.0;
    requests.insert(4, broken);

    println!("Submitting {} requests...\n", requests.len());
    let outcome = service.predict_batch(&requests)?;

    for result in &outcome.results {
        println!(
            "{} {} {}: {:.2} units ({:.2} - {:.2})",
            result.date,
            result.store_id,
            result.product_id,
            result.predicted_demand,
            result.confidence_lower,
            result.confidence_upper
        );
    }

    println!(
        "\n{} succeeded, {} failed",
        outcome.success_count, outcome.failure_count
    );
    for failure in &outcome.failures {
        println!("  {}", failure);
    }

    Ok(())
}
