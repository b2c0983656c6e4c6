//! Boundary validation for scoring inputs.
//!
//! The scoring functions themselves have no failure modes; everything that can
//! go wrong is rejected here before a record reaches them. Bounds mirror the
//! intake form: age 0-120, handicap 0-4, temperature 10-40°C, rainfall 0-50mm.

use crate::core::errors::{Error, Result};
use crate::core::types::PatientProfile;

pub const MAX_AGE: u8 = 120;
pub const MAX_HANDICAP: u8 = 4;
pub const TEMPERATURE_RANGE_C: (f64, f64) = (10.0, 40.0);
pub const RAINFALL_RANGE_MM: (f64, f64) = (0.0, 50.0);

// Pure function: check an integer field against an inclusive upper bound
fn check_max(value: u8, max: u8, name: &str) -> Result<()> {
    if value <= max {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "{name} must be at most {max}, got {value}"
        )))
    }
}

// Pure function: check a float field against an inclusive range
fn check_range(value: f64, range: (f64, f64), name: &str, unit: &str) -> Result<()> {
    let (min, max) = range;
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "{name} must be between {min}{unit} and {max}{unit}, got {value}{unit}"
        )))
    }
}

/// Validate a patient record before scoring.
///
/// Returns the first violation found; a record that passes is safe to score.
pub fn validate_profile(profile: &PatientProfile) -> Result<()> {
    check_max(profile.age, MAX_AGE, "age")?;
    check_max(profile.handicap, MAX_HANDICAP, "handicap level")?;
    check_range(
        profile.forecast_temperature_c,
        TEMPERATURE_RANGE_C,
        "forecast temperature",
        "°C",
    )?;
    check_range(
        profile.forecast_rain_mm,
        RAINFALL_RANGE_MM,
        "forecast rainfall",
        "mm",
    )?;
    Ok(())
}
