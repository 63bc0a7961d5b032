//! Cyclic sine/cosine encodings for periodic calendar values
//!
//! Calendar fields wrap around: month 12 is adjacent to month 1, Sunday to
//! Monday. Encoding a value as `sin(2π·v/p)` and `cos(2π·v/p)` gives the
//! model a continuous representation where the distance between any two
//! adjacent periods is the same.

use crate::{CalendarError, Result};
use std::f64::consts::PI;

/// Period of the month cycle
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Period of the day-of-week cycle
pub const DAYS_PER_WEEK: f64 = 7.0;

/// Period of the day-of-year cycle
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Encode a periodic value as a (sine, cosine) pair of `2π · value / period`.
///
/// Returns an error if the period is not a positive finite number.
pub fn cyclic_pair(value: f64, period: f64) -> Result<(f64, f64)> {
    if !period.is_finite() || period <= 0.0 {
        return Err(CalendarError::InvalidInput(format!(
            "Cyclic period must be positive, got {}",
            period
        )));
    }

    Ok(pair(value, period))
}

/// Unchecked encoding for the fixed, known-positive calendar periods.
pub(crate) fn pair(value: f64, period: f64) -> (f64, f64) {
    let angle = 2.0 * PI * value / period;
    (angle.sin(), angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn full_period_returns_to_origin() {
        let (sin_start, cos_start) = cyclic_pair(0.0, MONTHS_PER_YEAR).unwrap();
        let (sin_end, cos_end) = cyclic_pair(12.0, MONTHS_PER_YEAR).unwrap();

        assert_approx_eq!(sin_start, sin_end, 1e-10);
        assert_approx_eq!(cos_start, cos_end, 1e-10);
    }

    #[test]
    fn quarter_period_is_orthogonal() {
        let (sin, cos) = cyclic_pair(3.0, MONTHS_PER_YEAR).unwrap();

        assert_approx_eq!(sin, 1.0, 1e-10);
        assert_approx_eq!(cos, 0.0, 1e-10);
    }

    #[test]
    fn adjacent_values_are_equally_spaced() {
        // The whole point of the encoding: the December -> January step is as
        // small as any other adjacent-month step.
        let distance = |a: f64, b: f64| {
            let (sin_a, cos_a) = pair(a, MONTHS_PER_YEAR);
            let (sin_b, cos_b) = pair(b, MONTHS_PER_YEAR);
            ((sin_a - sin_b).powi(2) + (cos_a - cos_b).powi(2)).sqrt()
        };

        let wrap = distance(12.0, 1.0);
        let mid = distance(6.0, 7.0);

        assert_approx_eq!(wrap, mid, 1e-10);
        assert!(wrap < distance(1.0, 6.0));
    }

    #[test]
    fn rejects_non_positive_period() {
        assert!(cyclic_pair(1.0, 0.0).is_err());
        assert!(cyclic_pair(1.0, -7.0).is_err());
        assert!(cyclic_pair(1.0, f64::NAN).is_err());
    }
}
