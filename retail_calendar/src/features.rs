//! Calendar feature derivation from a target date

use crate::cyclic;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar features derived from a single target date.
///
/// Day-of-week uses the 0 = Monday convention. The boolean flags follow the
/// retail month phases: start is day 1-7, middle is day 8-21, end is day 22
/// onwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarFeatures {
    /// Month number (1-12)
    pub month: u32,
    /// Day of the month (1-31)
    pub day: u32,
    /// Day of the week, 0 = Monday through 6 = Sunday
    pub day_of_week: u32,
    /// ISO 8601 week number
    pub week_of_year: u32,
    /// Quarter number (1-4)
    pub quarter: u32,
    /// Day of the year (1-366)
    pub day_of_year: u32,
    /// Saturday or Sunday
    pub is_weekend: bool,
    /// Monday flag
    pub is_monday: bool,
    /// Friday flag
    pub is_friday: bool,
    /// Day 1-7 of the month
    pub is_month_start: bool,
    /// Day 8-21 of the month
    pub is_month_middle: bool,
    /// Day 22 onwards
    pub is_month_end: bool,
    /// Sine of the month cycle
    pub sin_month: f64,
    /// Cosine of the month cycle
    pub cos_month: f64,
    /// Sine of the day-of-week cycle
    pub sin_day_of_week: f64,
    /// Cosine of the day-of-week cycle
    pub cos_day_of_week: f64,
    /// Sine of the day-of-year cycle
    pub sin_day_of_year: f64,
    /// Cosine of the day-of-year cycle
    pub cos_day_of_year: f64,
}

impl CalendarFeatures {
    /// Derive all calendar features from a date. Total function: every valid
    /// `NaiveDate` produces a full feature set.
    pub fn from_date(date: NaiveDate) -> Self {
        let month = date.month();
        let day = date.day();
        let day_of_week = date.weekday().num_days_from_monday();
        let day_of_year = date.ordinal();

        let (sin_month, cos_month) = cyclic::pair(month as f64, cyclic::MONTHS_PER_YEAR);
        let (sin_day_of_week, cos_day_of_week) =
            cyclic::pair(day_of_week as f64, cyclic::DAYS_PER_WEEK);
        let (sin_day_of_year, cos_day_of_year) =
            cyclic::pair(day_of_year as f64, cyclic::DAYS_PER_YEAR);

        Self {
            month,
            day,
            day_of_week,
            week_of_year: date.iso_week().week(),
            quarter: (month - 1) / 3 + 1,
            day_of_year,
            is_weekend: day_of_week >= 5,
            is_monday: day_of_week == 0,
            is_friday: day_of_week == 4,
            is_month_start: day <= 7,
            is_month_middle: (8..=21).contains(&day),
            is_month_end: day > 21,
            sin_month,
            cos_month,
            sin_day_of_week,
            cos_day_of_week,
            sin_day_of_year,
            cos_day_of_year,
        }
    }

    /// The features as `(trained name, numeric value)` pairs, flags as 0/1.
    ///
    /// These names match the columns the demand model was trained on.
    pub fn feature_pairs(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("month", self.month as f64),
            ("day", self.day as f64),
            ("day_of_week", self.day_of_week as f64),
            ("week_of_year", self.week_of_year as f64),
            ("quarter", self.quarter as f64),
            ("is_weekend", flag(self.is_weekend)),
            ("is_monday", flag(self.is_monday)),
            ("is_friday", flag(self.is_friday)),
            ("is_month_start", flag(self.is_month_start)),
            ("is_month_middle", flag(self.is_month_middle)),
            ("is_month_end", flag(self.is_month_end)),
            ("sin_month", self.sin_month),
            ("cos_month", self.cos_month),
            ("sin_day_of_week", self.sin_day_of_week),
            ("cos_day_of_week", self.cos_day_of_week),
            ("sin_day_of_year", self.sin_day_of_year),
            ("cos_day_of_year", self.cos_day_of_year),
        ]
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
