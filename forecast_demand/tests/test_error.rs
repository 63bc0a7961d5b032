use forecast_demand::ForecastError;
use std::io;

#[test]
fn io_errors_convert() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let error = ForecastError::from(io_error);

    assert!(matches!(error, ForecastError::IoError(_)));
    let message = format!("{}", error);
    assert!(message.contains("IO error"));
    assert!(message.contains("file not found"));
}

#[test]
fn json_errors_convert() {
    let json_error = serde_json::from_str::<Vec<String>>("{oops").unwrap_err();
    let error = ForecastError::from(json_error);

    assert!(matches!(error, ForecastError::JsonError(_)));
    assert!(format!("{}", error).contains("JSON error"));
}

#[test]
fn display_carries_the_detail_message() {
    let error = ForecastError::InvalidRequest("price must be positive, got -1".to_string());
    assert!(format!("{}", error).contains("price must be positive"));

    let error = ForecastError::ModelUnavailable("no artifacts loaded".to_string());
    let message = format!("{}", error);
    assert!(message.contains("Model unavailable"));
    assert!(message.contains("no artifacts loaded"));
}

#[test]
fn variants_stay_distinguishable() {
    let invalid = ForecastError::InvalidRequest("bad".to_string());
    let unavailable = ForecastError::ModelUnavailable("empty".to_string());
    let artifact = ForecastError::ArtifactError("shape".to_string());

    assert!(matches!(invalid, ForecastError::InvalidRequest(_)));
    assert!(matches!(unavailable, ForecastError::ModelUnavailable(_)));
    assert!(matches!(artifact, ForecastError::ArtifactError(_)));
}
