//! No-show risk scoring.
//!
//! The scorer is a deterministic weighted-multiplier formula: a historical
//! base rate selected by clinic location, adjusted by a fixed sequence of
//! multiplicative factors (reminder status, weather, age band, chronic
//! conditions, shift, disability) and clamped to [0, 1]. All factors commute,
//! so the application order never changes the result.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::RiskConfig;
use crate::core::errors::Result;
use crate::core::types::{Disability, Location, PatientProfile, Shift};
use crate::core::validation::validate_profile;

/// Risk classification for a scored appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,    // p <= 0.35
    Medium, // 0.35 < p <= 0.6
    High,   // p > 0.6
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskCategory::Low => write!(f, "Low"),
            RiskCategory::Medium => write!(f, "Medium"),
            RiskCategory::High => write!(f, "High"),
        }
    }
}

/// Intervention protocol tier recommended for a scored appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionTier {
    /// Single standard reminder, no follow-up
    Minimal,
    /// Reminder plus confirmation monitoring and one standby patient
    Standard,
    /// Immediate reminder, personal call, explicit confirmation and standbys
    Intensive,
}

impl fmt::Display for InterventionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterventionTier::Minimal => write!(f, "minimal"),
            InterventionTier::Standard => write!(f, "standard"),
            InterventionTier::Intensive => write!(f, "intensive"),
        }
    }
}

/// A condition on the input record that pushed the score up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RiskFactor {
    HighRiskLocation { location: Location },
    NoSmsReminder,
    RainExpected,
    ExtremeHeat,
    YouthPatient,
    Disability { disability: Disability },
    AfternoonSlot,
}

impl RiskFactor {
    pub fn summary(&self) -> String {
        match self {
            RiskFactor::HighRiskLocation { location } => {
                format!("High-risk location: {}", location.display_name())
            }
            RiskFactor::NoSmsReminder => "No SMS reminder sent".to_string(),
            RiskFactor::RainExpected => "Rainy weather expected".to_string(),
            RiskFactor::ExtremeHeat => "Very hot weather expected".to_string(),
            RiskFactor::YouthPatient => "Patient under 18".to_string(),
            RiskFactor::Disability { disability } => {
                format!("Recorded {disability} disability")
            }
            RiskFactor::AfternoonSlot => "Afternoon appointment".to_string(),
        }
    }

    pub fn impact(&self) -> &'static str {
        match self {
            RiskFactor::HighRiskLocation { .. } => {
                "Historical data shows elevated no-show rates in this area"
            }
            RiskFactor::NoSmsReminder => {
                "Patients without reminders are 10% more likely to miss appointments"
            }
            RiskFactor::RainExpected => "Rain increases no-show probability by 15%",
            RiskFactor::ExtremeHeat => "Extreme heat correlates with 8% higher no-show rates",
            RiskFactor::YouthPatient => "Younger patients show slightly higher no-show tendency",
            RiskFactor::Disability { .. } => {
                "Mobility or accessibility challenges may impact attendance"
            }
            RiskFactor::AfternoonSlot => {
                "Afternoon slots have 5% higher no-show rates than morning"
            }
        }
    }
}

/// Result of scoring one appointment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Modeled no-show probability, in [0, 1]
    pub probability: f64,
    /// Complement of the no-show probability
    pub show_probability: f64,
    pub category: RiskCategory,
    pub recommendation: InterventionTier,
    /// Conditions on the record that pushed the score up
    pub factors: Vec<RiskFactor>,
    /// Expected revenue lost if this appointment is missed
    pub revenue_at_risk: f64,
}

/// Rule-based no-show scorer.
pub struct NoShowScorer {
    config: RiskConfig,
}

impl Default for NoShowScorer {
    fn default() -> Self {
        Self {
            config: RiskConfig::default(),
        }
    }
}

impl NoShowScorer {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Score a patient record.
    ///
    /// Rejects out-of-range records before scoring; a valid record always
    /// produces a probability in [0, 1].
    pub fn score(&self, profile: &PatientProfile) -> Result<RiskAssessment> {
        validate_profile(profile)?;
        let probability = self.raw_probability(profile);
        Ok(self.assessment(profile, probability))
    }

    /// Assemble a full assessment from an externally produced probability.
    ///
    /// Used by the model-backed path so both engines report the same shape.
    /// The probability is clamped to [0, 1].
    pub fn assessment(&self, profile: &PatientProfile, probability: f64) -> RiskAssessment {
        let probability = probability.clamp(0.0, 1.0);
        RiskAssessment {
            probability,
            show_probability: 1.0 - probability,
            category: self.categorize(probability),
            recommendation: self.recommend(probability),
            factors: self.identify_factors(profile),
            revenue_at_risk: self.config.appointment_value * probability,
        }
    }

    fn raw_probability(&self, profile: &PatientProfile) -> f64 {
        let mut risk = self.config.base_rates.rate(profile.location);
        let factors = &self.config.factors;

        if profile.sms_sent {
            risk *= factors.sms_reminder;
        }
        if profile.is_rainy() {
            risk *= factors.rain;
        }
        if profile.is_hot() {
            risk *= factors.heat;
        }
        if profile.age < 18 {
            risk *= factors.youth;
        } else if profile.age > 60 {
            risk *= factors.senior;
        }
        if profile.chronic_condition_count() >= 2 {
            risk *= factors.chronic_conditions;
        }
        if profile.shift == Shift::Afternoon {
            risk *= factors.afternoon;
        }
        if profile.disability != Disability::None {
            risk *= factors.disability;
        }

        risk.clamp(0.0, 1.0)
    }

    fn categorize(&self, probability: f64) -> RiskCategory {
        if probability > self.config.high_threshold {
            RiskCategory::High
        } else if probability > self.config.medium_threshold {
            RiskCategory::Medium
        } else {
            RiskCategory::Low
        }
    }

    fn recommend(&self, probability: f64) -> InterventionTier {
        if probability > self.config.intensive_threshold {
            InterventionTier::Intensive
        } else if probability > self.config.medium_threshold {
            InterventionTier::Standard
        } else {
            InterventionTier::Minimal
        }
    }

    fn identify_factors(&self, profile: &PatientProfile) -> Vec<RiskFactor> {
        let mut factors = Vec::new();

        // Locations with base rates above the network average
        if matches!(
            profile.location,
            Location::Penha | Location::Itajai | Location::Camboriu
        ) {
            factors.push(RiskFactor::HighRiskLocation {
                location: profile.location,
            });
        }
        if !profile.sms_sent {
            factors.push(RiskFactor::NoSmsReminder);
        }
        if profile.is_rainy() {
            factors.push(RiskFactor::RainExpected);
        }
        if profile.is_hot() {
            factors.push(RiskFactor::ExtremeHeat);
        }
        if profile.age < 18 {
            factors.push(RiskFactor::YouthPatient);
        }
        if profile.disability != Disability::None {
            factors.push(RiskFactor::Disability {
                disability: profile.disability,
            });
        }
        if profile.shift == Shift::Afternoon {
            factors.push(RiskFactor::AfternoonSlot);
        }

        factors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Gender, Specialty};

    fn baseline_profile() -> PatientProfile {
        PatientProfile {
            age: 35,
            gender: Gender::F,
            scholarship: false,
            disability: Disability::None,
            hypertension: false,
            diabetes: false,
            alcoholism: false,
            handicap: 0,
            specialty: Specialty::Physiotherapy,
            location: Location::Penha,
            shift: Shift::Morning,
            sms_sent: false,
            forecast_temperature_c: 22.0,
            forecast_rain_mm: 0.0,
        }
    }

    #[test]
    fn penha_rainy_baseline_case() {
        // 0.38 base rate × 1.15 rain adjustment
        let mut profile = baseline_profile();
        profile.forecast_rain_mm = 10.0;
        let assessment = NoShowScorer::default().score(&profile).unwrap();
        assert!((assessment.probability - 0.437).abs() < 0.001);
        assert_eq!(assessment.category, RiskCategory::Medium);
        assert_eq!(assessment.recommendation, InterventionTier::Standard);
    }

    #[test]
    fn show_probability_is_complement() {
        let assessment = NoShowScorer::default()
            .score(&baseline_profile())
            .unwrap();
        assert!((assessment.probability + assessment.show_probability - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sms_reminder_lowers_risk() {
        let scorer = NoShowScorer::default();
        let without = scorer.score(&baseline_profile()).unwrap();
        let mut reminded = baseline_profile();
        reminded.sms_sent = true;
        let with = scorer.score(&reminded).unwrap();
        assert!(with.probability < without.probability);
        assert!((with.probability - 0.38 * 0.90).abs() < 1e-9);
    }

    #[test]
    fn age_bands_adjust_in_opposite_directions() {
        let scorer = NoShowScorer::default();
        let adult = scorer.score(&baseline_profile()).unwrap();

        let mut minor = baseline_profile();
        minor.age = 12;
        let mut senior = baseline_profile();
        senior.age = 75;

        assert!(scorer.score(&minor).unwrap().probability > adult.probability);
        assert!(scorer.score(&senior).unwrap().probability < adult.probability);
    }

    #[test]
    fn two_chronic_conditions_lower_risk() {
        let scorer = NoShowScorer::default();
        let mut one = baseline_profile();
        one.hypertension = true;
        let mut two = baseline_profile();
        two.hypertension = true;
        two.handicap = 1;

        let single = scorer.score(&one).unwrap().probability;
        let double = scorer.score(&two).unwrap().probability;
        assert!((single - 0.38).abs() < 1e-9);
        assert!((double - 0.38 * 0.92).abs() < 1e-9);
    }

    #[test]
    fn all_escalating_factors_stay_clamped() {
        let mut profile = baseline_profile();
        profile.age = 10;
        profile.shift = Shift::Afternoon;
        profile.disability = Disability::Motor;
        profile.forecast_rain_mm = 30.0;
        profile.forecast_temperature_c = 35.0;
        let assessment = NoShowScorer::default().score(&profile).unwrap();
        assert!(assessment.probability <= 1.0);
        assert!(assessment.probability > 0.38);
    }

    #[test]
    fn category_thresholds() {
        let scorer = NoShowScorer::default();
        assert_eq!(scorer.categorize(0.35), RiskCategory::Low);
        assert_eq!(scorer.categorize(0.351), RiskCategory::Medium);
        assert_eq!(scorer.categorize(0.60), RiskCategory::Medium);
        assert_eq!(scorer.categorize(0.601), RiskCategory::High);
    }

    #[test]
    fn factors_reported_for_contributing_conditions() {
        let mut profile = baseline_profile();
        profile.forecast_rain_mm = 12.0;
        profile.shift = Shift::Afternoon;
        let assessment = NoShowScorer::default().score(&profile).unwrap();
        assert!(assessment.factors.contains(&RiskFactor::HighRiskLocation {
            location: Location::Penha
        }));
        assert!(assessment.factors.contains(&RiskFactor::NoSmsReminder));
        assert!(assessment.factors.contains(&RiskFactor::RainExpected));
        assert!(assessment.factors.contains(&RiskFactor::AfternoonSlot));
        assert!(!assessment.factors.contains(&RiskFactor::ExtremeHeat));
    }

    #[test]
    fn low_risk_location_reports_no_location_factor() {
        let mut profile = baseline_profile();
        profile.location = Location::Bombinhas;
        profile.sms_sent = true;
        let assessment = NoShowScorer::default().score(&profile).unwrap();
        assert!(assessment
            .factors
            .iter()
            .all(|f| !matches!(f, RiskFactor::HighRiskLocation { .. })));
        assert_eq!(assessment.category, RiskCategory::Low);
        assert_eq!(assessment.recommendation, InterventionTier::Minimal);
    }

    #[test]
    fn revenue_at_risk_scales_with_probability() {
        let assessment = NoShowScorer::default()
            .score(&baseline_profile())
            .unwrap();
        assert!((assessment.revenue_at_risk - 50.0 * assessment.probability).abs() < 1e-9);
    }

    #[test]
    fn invalid_profile_is_rejected() {
        let mut profile = baseline_profile();
        profile.forecast_rain_mm = 80.0;
        assert!(NoShowScorer::default().score(&profile).is_err());
    }

    #[test]
    fn external_probability_is_clamped() {
        let scorer = NoShowScorer::default();
        let assessment = scorer.assessment(&baseline_profile(), 1.7);
        assert_eq!(assessment.probability, 1.0);
        assert_eq!(assessment.category, RiskCategory::High);
    }
}
