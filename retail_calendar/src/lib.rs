//! # Retail Calendar
//!
//! Calendar feature calculations for retail demand forecasting.
//! This crate derives the date-based features a demand model consumes:
//! calendar fields (month, day of week, quarter), shopping-pattern flags
//! (weekend, start/middle/end of month) and cyclic sine/cosine encodings
//! that keep wrap-around dates (December next to January) adjacent in
//! feature space.

use thiserror::Error;

// Feature modules
pub mod cyclic;
pub mod features;

pub use cyclic::{cyclic_pair, DAYS_PER_WEEK, DAYS_PER_YEAR, MONTHS_PER_YEAR};
pub use features::CalendarFeatures;

/// Errors that can occur in calendar-related calculations
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for calendar operations
pub type Result<T> = std::result::Result<T, CalendarError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn derives_features_through_reexports() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let features = CalendarFeatures::from_date(date);
        assert_eq!(features.month, 1);
        assert!(features.is_monday);
    }
}
