//! Daily appointment demand forecasting.
//!
//! A day-of-week base volume, scaled by the selected specialty's share of
//! total volume and by an attendance multiplier for the expected weather,
//! rounded and wrapped in a fixed-width uncertainty band.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ForecastConfig;
use crate::core::types::{ForecastRequest, SpecialtyFilter};

/// Volume classification for a forecast day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeCategory {
    Low,    // estimate <= 300
    Normal, // 300 < estimate <= 450
    High,   // estimate > 450
}

impl fmt::Display for VolumeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeCategory::Low => write!(f, "Low"),
            VolumeCategory::Normal => write!(f, "Normal"),
            VolumeCategory::High => write!(f, "High"),
        }
    }
}

/// Forecast reliability, driven by how stable the day's history is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Medium => write!(f, "Medium"),
            Confidence::High => write!(f, "High"),
        }
    }
}

/// Clinician staffing derived from the forecast band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingPlan {
    /// Clinicians needed for the point estimate
    pub recommended: u32,
    /// Clinicians needed if volume lands on the lower bound
    pub minimum: u32,
    /// Clinicians needed if volume lands on the upper bound
    pub maximum: u32,
}

/// Result of one demand forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandForecast {
    pub day: Weekday,
    pub weekend: bool,
    /// Point estimate, appointments
    pub estimate: u32,
    /// Lower edge of the uncertainty band, never negative
    pub lower: u32,
    /// Upper edge of the uncertainty band
    pub upper: u32,
    pub category: VolumeCategory,
    pub confidence: Confidence,
    pub staffing: StaffingPlan,
}

/// Rule-based demand forecaster.
pub struct DemandForecaster {
    config: ForecastConfig,
}

impl Default for DemandForecaster {
    fn default() -> Self {
        Self {
            config: ForecastConfig::default(),
        }
    }
}

impl DemandForecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Forecast appointment volume for a request. Deterministic, no failure modes.
    pub fn forecast(&self, request: &ForecastRequest) -> DemandForecast {
        let mut volume = self.config.day_volumes.volume(request.weekday());

        if let SpecialtyFilter::Only(specialty) = request.specialty {
            volume *= self.config.specialty_shares.share(specialty);
        }
        volume *= self.config.weather_multipliers.multiplier(request.weather);

        self.from_estimate(request, volume)
    }

    /// Assemble a full forecast from an externally produced raw estimate.
    ///
    /// Used by the model-backed path so both engines report the same shape:
    /// estimate rounded half-to-even and floored at zero, fixed ±band,
    /// category, confidence, staffing.
    pub fn from_estimate(&self, request: &ForecastRequest, raw: f64) -> DemandForecast {
        let estimate = raw.round_ties_even().max(0.0) as u32;
        let lower = estimate.saturating_sub(self.config.band_width);
        let upper = estimate + self.config.band_width;

        DemandForecast {
            day: request.weekday(),
            weekend: request.is_weekend(),
            estimate,
            lower,
            upper,
            category: self.categorize(estimate),
            confidence: confidence_for(request.weekday()),
            staffing: self.staffing(estimate, lower, upper),
        }
    }

    /// Average volume per weekday, for report context tables.
    pub fn weekly_pattern(&self) -> [(Weekday, u32); 7] {
        const WEEK: [Weekday; 7] = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        WEEK.map(|day| (day, self.config.day_volumes.volume(day).round_ties_even() as u32))
    }

    fn categorize(&self, estimate: u32) -> VolumeCategory {
        if estimate > self.config.high_threshold {
            VolumeCategory::High
        } else if estimate > self.config.normal_threshold {
            VolumeCategory::Normal
        } else {
            VolumeCategory::Low
        }
    }

    fn staffing(&self, estimate: u32, lower: u32, upper: u32) -> StaffingPlan {
        let per = self.config.patients_per_clinician;
        StaffingPlan {
            recommended: clinicians_for(estimate, per),
            minimum: clinicians_for(lower, per),
            maximum: upper.div_ceil(per),
        }
    }
}

// Pure function: ceil division with a floor of one clinician
fn clinicians_for(volume: u32, per_clinician: u32) -> u32 {
    volume.div_ceil(per_clinician).max(1)
}

// Weekday history is stable Mon-Thu; Friday and weekends vary more
fn confidence_for(day: Weekday) -> Confidence {
    match day {
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu => Confidence::High,
        Weekday::Fri | Weekday::Sat | Weekday::Sun => Confidence::Medium,
    }
}
