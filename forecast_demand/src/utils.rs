//! Utility functions for the forecast_demand crate

use crate::data::PredictionRequest;
use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Round a value to two decimal places for reporting.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Generate plausible prediction requests for examples and tests.
///
/// Stores, products, chains and provinces rotate through small fixed pools
/// while prices and promotion flags are drawn at random. Dates advance one
/// day per request starting at 2024-01-01.
pub fn generate_test_requests(count: usize) -> Vec<PredictionRequest> {
    const CHAINS: [&str; 5] = ["Loblaws", "Metro", "Sobeys", "FreshCo", "No Frills"];
    const PROVINCES: [&str; 5] = ["ON", "QC", "BC", "AB", "MB"];
    const CATEGORIES: [&str; 5] = ["Dairy", "Snacks", "Beverages", "Produce", "Bakery"];
    const BRANDS: [&str; 3] = ["Brand_A", "Brand_B", "Brand_C"];

    let mut rng = rand::thread_rng();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();

    (0..count)
        .map(|i| {
            let date = start + Duration::days(i as i64);
            PredictionRequest {
                store_id: format!("ST_{:03}", i % 10 + 1),
                product_id: format!("PR_{:04}", 1000 + i % 25),
                date: date.format("%Y-%m-%d").to_string(),
                price: round2(rng.gen_range(1.0..20.0)),
                promotion_flag: rng.gen_bool(0.3),
                chain: CHAINS[i % CHAINS.len()].to_string(),
                province: PROVINCES[i % PROVINCES.len()].to_string(),
                category: CATEGORIES[i % CATEGORIES.len()].to_string(),
                brand: BRANDS[i % BRANDS.len()].to_string(),
            }
        })
        .collect()
}
