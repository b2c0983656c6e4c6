//! Configuration for scoring tables and report output.
//!
//! Every table the scorers use can be overridden from `.clinicast.toml`; any
//! field left out falls back to the rates fitted from the historical
//! appointment data. `validate()` runs after deserialization so a bad override
//! is reported before it can skew a score.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::core::types::{Location, Specialty, WeatherCondition};
use crate::io::output::OutputFormat;

/// Historical no-show base rates per clinic location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationBaseRates {
    #[serde(default = "default_rate_itajai")]
    pub itajai: f64,
    #[serde(default = "default_rate_balneario_camboriu")]
    pub balneario_camboriu: f64,
    #[serde(default = "default_rate_camboriu")]
    pub camboriu: f64,
    #[serde(default = "default_rate_navegantes")]
    pub navegantes: f64,
    #[serde(default = "default_rate_penha")]
    pub penha: f64,
    #[serde(default = "default_rate_bombinhas")]
    pub bombinhas: f64,
}

fn default_rate_itajai() -> f64 {
    0.35
}
fn default_rate_balneario_camboriu() -> f64 {
    0.28
}
fn default_rate_camboriu() -> f64 {
    0.33
}
fn default_rate_navegantes() -> f64 {
    0.30
}
fn default_rate_penha() -> f64 {
    0.38
}
fn default_rate_bombinhas() -> f64 {
    0.25
}

impl Default for LocationBaseRates {
    fn default() -> Self {
        Self {
            itajai: default_rate_itajai(),
            balneario_camboriu: default_rate_balneario_camboriu(),
            camboriu: default_rate_camboriu(),
            navegantes: default_rate_navegantes(),
            penha: default_rate_penha(),
            bombinhas: default_rate_bombinhas(),
        }
    }
}

impl LocationBaseRates {
    pub fn rate(&self, location: Location) -> f64 {
        match location {
            Location::Itajai => self.itajai,
            Location::BalnearioCamboriu => self.balneario_camboriu,
            Location::Camboriu => self.camboriu,
            Location::Navegantes => self.navegantes,
            Location::Penha => self.penha,
            Location::Bombinhas => self.bombinhas,
        }
    }
}

/// Multiplicative adjustment factors applied on top of the location base rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactors {
    /// Applied when an SMS reminder was sent
    #[serde(default = "default_sms_factor")]
    pub sms_reminder: f64,
    /// Applied when rainfall exceeds the rainy-day threshold
    #[serde(default = "default_rain_factor")]
    pub rain: f64,
    /// Applied when temperature exceeds the heat threshold
    #[serde(default = "default_heat_factor")]
    pub heat: f64,
    /// Applied for patients under 18
    #[serde(default = "default_youth_factor")]
    pub youth: f64,
    /// Applied for patients over 60
    #[serde(default = "default_senior_factor")]
    pub senior: f64,
    /// Applied when two or more chronic conditions are recorded
    #[serde(default = "default_chronic_factor")]
    pub chronic_conditions: f64,
    /// Applied for afternoon appointments
    #[serde(default = "default_afternoon_factor")]
    pub afternoon: f64,
    /// Applied when any disability is recorded
    #[serde(default = "default_disability_factor")]
    pub disability: f64,
}

fn default_sms_factor() -> f64 {
    0.90
}
fn default_rain_factor() -> f64 {
    1.15
}
fn default_heat_factor() -> f64 {
    1.08
}
fn default_youth_factor() -> f64 {
    1.05
}
fn default_senior_factor() -> f64 {
    0.95
}
fn default_chronic_factor() -> f64 {
    0.92
}
fn default_afternoon_factor() -> f64 {
    1.05
}
fn default_disability_factor() -> f64 {
    1.08
}

impl Default for RiskFactors {
    fn default() -> Self {
        Self {
            sms_reminder: default_sms_factor(),
            rain: default_rain_factor(),
            heat: default_heat_factor(),
            youth: default_youth_factor(),
            senior: default_senior_factor(),
            chronic_conditions: default_chronic_factor(),
            afternoon: default_afternoon_factor(),
            disability: default_disability_factor(),
        }
    }
}

/// No-show scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    #[serde(default)]
    pub base_rates: LocationBaseRates,
    #[serde(default)]
    pub factors: RiskFactors,
    /// Probability above which a patient is classified High risk
    #[serde(default = "default_high_risk_threshold")]
    pub high_threshold: f64,
    /// Probability above which a patient is classified Medium risk
    #[serde(default = "default_medium_risk_threshold")]
    pub medium_threshold: f64,
    /// Probability above which the intensive intervention protocol applies
    #[serde(default = "default_intensive_threshold")]
    pub intensive_threshold: f64,
    /// Average revenue of one appointment, used for the revenue-at-risk figure
    #[serde(default = "default_appointment_value")]
    pub appointment_value: f64,
}

fn default_high_risk_threshold() -> f64 {
    0.60
}
fn default_medium_risk_threshold() -> f64 {
    0.35
}
fn default_intensive_threshold() -> f64 {
    0.50
}
fn default_appointment_value() -> f64 {
    50.0
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            base_rates: LocationBaseRates::default(),
            factors: RiskFactors::default(),
            high_threshold: default_high_risk_threshold(),
            medium_threshold: default_medium_risk_threshold(),
            intensive_threshold: default_intensive_threshold(),
            appointment_value: default_appointment_value(),
        }
    }
}

/// Average appointment volume per day of week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayVolumes {
    #[serde(default = "default_volume_monday")]
    pub monday: f64,
    #[serde(default = "default_volume_tuesday")]
    pub tuesday: f64,
    #[serde(default = "default_volume_wednesday")]
    pub wednesday: f64,
    #[serde(default = "default_volume_thursday")]
    pub thursday: f64,
    #[serde(default = "default_volume_friday")]
    pub friday: f64,
    #[serde(default = "default_volume_saturday")]
    pub saturday: f64,
    #[serde(default = "default_volume_sunday")]
    pub sunday: f64,
}

fn default_volume_monday() -> f64 {
    450.0
}
fn default_volume_tuesday() -> f64 {
    480.0
}
fn default_volume_wednesday() -> f64 {
    470.0
}
fn default_volume_thursday() -> f64 {
    460.0
}
fn default_volume_friday() -> f64 {
    420.0
}
fn default_volume_saturday() -> f64 {
    280.0
}
fn default_volume_sunday() -> f64 {
    180.0
}

impl Default for DayVolumes {
    fn default() -> Self {
        Self {
            monday: default_volume_monday(),
            tuesday: default_volume_tuesday(),
            wednesday: default_volume_wednesday(),
            thursday: default_volume_thursday(),
            friday: default_volume_friday(),
            saturday: default_volume_saturday(),
            sunday: default_volume_sunday(),
        }
    }
}

impl DayVolumes {
    pub fn volume(&self, day: Weekday) -> f64 {
        match day {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }
}

/// Share of total volume attributable to each specialty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialtyShares {
    #[serde(default = "default_share_physiotherapy")]
    pub physiotherapy: f64,
    #[serde(default = "default_share_psychotherapy")]
    pub psychotherapy: f64,
    #[serde(default = "default_share_speech_therapy")]
    pub speech_therapy: f64,
    #[serde(default = "default_share_occupational_therapy")]
    pub occupational_therapy: f64,
    #[serde(default = "default_share_pedagogy")]
    pub pedagogy: f64,
    #[serde(default = "default_share_social_assistance")]
    pub social_assistance: f64,
}

fn default_share_physiotherapy() -> f64 {
    0.35
}
fn default_share_psychotherapy() -> f64 {
    0.25
}
fn default_share_speech_therapy() -> f64 {
    0.15
}
fn default_share_occupational_therapy() -> f64 {
    0.12
}
fn default_share_pedagogy() -> f64 {
    0.08
}
fn default_share_social_assistance() -> f64 {
    0.05
}

impl Default for SpecialtyShares {
    fn default() -> Self {
        Self {
            physiotherapy: default_share_physiotherapy(),
            psychotherapy: default_share_psychotherapy(),
            speech_therapy: default_share_speech_therapy(),
            occupational_therapy: default_share_occupational_therapy(),
            pedagogy: default_share_pedagogy(),
            social_assistance: default_share_social_assistance(),
        }
    }
}

impl SpecialtyShares {
    pub fn share(&self, specialty: Specialty) -> f64 {
        match specialty {
            Specialty::Physiotherapy => self.physiotherapy,
            Specialty::Psychotherapy => self.psychotherapy,
            Specialty::SpeechTherapy => self.speech_therapy,
            Specialty::OccupationalTherapy => self.occupational_therapy,
            Specialty::Pedagogy => self.pedagogy,
            Specialty::SocialAssistance => self.social_assistance,
        }
    }
}

/// Attendance multipliers per expected weather condition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherMultipliers {
    #[serde(default = "default_weather_clear")]
    pub clear: f64,
    #[serde(default = "default_weather_rainy")]
    pub rainy: f64,
    #[serde(default = "default_weather_very_hot")]
    pub very_hot: f64,
    #[serde(default = "default_weather_cold")]
    pub cold: f64,
}

fn default_weather_clear() -> f64 {
    1.0
}
fn default_weather_rainy() -> f64 {
    0.88
}
fn default_weather_very_hot() -> f64 {
    0.92
}
fn default_weather_cold() -> f64 {
    0.95
}

impl Default for WeatherMultipliers {
    fn default() -> Self {
        Self {
            clear: default_weather_clear(),
            rainy: default_weather_rainy(),
            very_hot: default_weather_very_hot(),
            cold: default_weather_cold(),
        }
    }
}

impl WeatherMultipliers {
    pub fn multiplier(&self, weather: WeatherCondition) -> f64 {
        match weather {
            WeatherCondition::Clear => self.clear,
            WeatherCondition::Rainy => self.rainy,
            WeatherCondition::VeryHot => self.very_hot,
            WeatherCondition::Cold => self.cold,
        }
    }
}

/// Demand forecasting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default)]
    pub day_volumes: DayVolumes,
    #[serde(default)]
    pub specialty_shares: SpecialtyShares,
    #[serde(default)]
    pub weather_multipliers: WeatherMultipliers,
    /// Half-width of the uncertainty band, in appointments (model MAE)
    #[serde(default = "default_band_width")]
    pub band_width: u32,
    /// Estimate above which a day is classified High volume
    #[serde(default = "default_high_volume_threshold")]
    pub high_threshold: u32,
    /// Estimate above which a day is classified Normal volume
    #[serde(default = "default_normal_volume_threshold")]
    pub normal_threshold: u32,
    /// Appointments one clinician can cover in a day, for staffing plans
    #[serde(default = "default_patients_per_clinician")]
    pub patients_per_clinician: u32,
}

fn default_band_width() -> u32 {
    80
}
fn default_high_volume_threshold() -> u32 {
    450
}
fn default_normal_volume_threshold() -> u32 {
    300
}
fn default_patients_per_clinician() -> u32 {
    40
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            day_volumes: DayVolumes::default(),
            specialty_shares: SpecialtyShares::default(),
            weather_multipliers: WeatherMultipliers::default(),
            band_width: default_band_width(),
            high_threshold: default_high_volume_threshold(),
            normal_threshold: default_normal_volume_threshold(),
            patients_per_clinician: default_patients_per_clinician(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_format")]
    pub default_format: String,
}

fn default_output_format() -> String {
    "terminal".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: default_output_format(),
        }
    }
}

/// Top-level configuration loaded from `.clinicast.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClinicastConfig {
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl RiskConfig {
    // Pure function: check a probability-like value is in (0, 1]
    fn is_valid_probability(value: f64) -> bool {
        value.is_finite() && value > 0.0 && value <= 1.0
    }

    // Pure function: check a multiplier is positive and finite
    fn is_valid_factor(value: f64) -> bool {
        value.is_finite() && value > 0.0
    }

    /// Validate base rates, factors and thresholds
    pub fn validate(&self) -> Result<(), String> {
        let rates = [
            ("itajai", self.base_rates.itajai),
            ("balneario_camboriu", self.base_rates.balneario_camboriu),
            ("camboriu", self.base_rates.camboriu),
            ("navegantes", self.base_rates.navegantes),
            ("penha", self.base_rates.penha),
            ("bombinhas", self.base_rates.bombinhas),
        ];
        for (name, rate) in rates {
            if !Self::is_valid_probability(rate) {
                return Err(format!(
                    "base rate for {name} must be in (0, 1], got {rate}"
                ));
            }
        }

        let factors = [
            ("sms_reminder", self.factors.sms_reminder),
            ("rain", self.factors.rain),
            ("heat", self.factors.heat),
            ("youth", self.factors.youth),
            ("senior", self.factors.senior),
            ("chronic_conditions", self.factors.chronic_conditions),
            ("afternoon", self.factors.afternoon),
            ("disability", self.factors.disability),
        ];
        for (name, factor) in factors {
            if !Self::is_valid_factor(factor) {
                return Err(format!(
                    "risk factor {name} must be a positive number, got {factor}"
                ));
            }
        }

        if !Self::is_valid_probability(self.high_threshold)
            || !Self::is_valid_probability(self.medium_threshold)
            || !Self::is_valid_probability(self.intensive_threshold)
        {
            return Err("risk thresholds must be in (0, 1]".to_string());
        }
        if self.medium_threshold >= self.high_threshold {
            return Err(format!(
                "medium threshold ({}) must be below high threshold ({})",
                self.medium_threshold, self.high_threshold
            ));
        }
        if !self.appointment_value.is_finite() || self.appointment_value < 0.0 {
            return Err("appointment value must be non-negative".to_string());
        }
        Ok(())
    }
}

impl ForecastConfig {
    /// Validate volumes, shares, multipliers and thresholds
    pub fn validate(&self) -> Result<(), String> {
        let volumes = [
            ("monday", self.day_volumes.monday),
            ("tuesday", self.day_volumes.tuesday),
            ("wednesday", self.day_volumes.wednesday),
            ("thursday", self.day_volumes.thursday),
            ("friday", self.day_volumes.friday),
            ("saturday", self.day_volumes.saturday),
            ("sunday", self.day_volumes.sunday),
        ];
        for (name, volume) in volumes {
            if !volume.is_finite() || volume < 0.0 {
                return Err(format!(
                    "day volume for {name} must be non-negative, got {volume}"
                ));
            }
        }

        let shares = [
            ("physiotherapy", self.specialty_shares.physiotherapy),
            ("psychotherapy", self.specialty_shares.psychotherapy),
            ("speech_therapy", self.specialty_shares.speech_therapy),
            (
                "occupational_therapy",
                self.specialty_shares.occupational_therapy,
            ),
            ("pedagogy", self.specialty_shares.pedagogy),
            ("social_assistance", self.specialty_shares.social_assistance),
        ];
        for (name, share) in shares {
            if !share.is_finite() || share <= 0.0 || share > 1.0 {
                return Err(format!(
                    "specialty share for {name} must be in (0, 1], got {share}"
                ));
            }
        }

        let multipliers = [
            ("clear", self.weather_multipliers.clear),
            ("rainy", self.weather_multipliers.rainy),
            ("very_hot", self.weather_multipliers.very_hot),
            ("cold", self.weather_multipliers.cold),
        ];
        for (name, mult) in multipliers {
            if !mult.is_finite() || mult <= 0.0 {
                return Err(format!(
                    "weather multiplier for {name} must be positive, got {mult}"
                ));
            }
        }

        if self.normal_threshold >= self.high_threshold {
            return Err(format!(
                "normal volume threshold ({}) must be below high threshold ({})",
                self.normal_threshold, self.high_threshold
            ));
        }
        if self.patients_per_clinician == 0 {
            return Err("patients per clinician must be at least 1".to_string());
        }
        Ok(())
    }
}

impl OutputConfig {
    /// Validate the default report format names a known writer
    pub fn validate(&self) -> Result<(), String> {
        self.default_format
            .parse::<OutputFormat>()
            .map(|_| ())
            .map_err(|e| format!("output default_format: {e}"))
    }
}

impl ClinicastConfig {
    /// Validate the whole configuration
    pub fn validate(&self) -> Result<(), String> {
        self.risk.validate()?;
        self.forecast.validate()?;
        self.output.validate()?;
        Ok(())
    }

    /// Parse and validate a configuration file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ClinicastConfig = toml::from_str(&content)?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid configuration in {}: {e}", path.display()))?;
        Ok(config)
    }
}

pub const CONFIG_FILE_NAME: &str = ".clinicast.toml";

/// Search for `.clinicast.toml` from the current directory upward
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

fn load_config() -> ClinicastConfig {
    match find_config_file() {
        Some(path) => match ClinicastConfig::load_from(&path) {
            Ok(config) => {
                log::debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!(
                    "Failed to load config from {}: {e}. Using defaults.",
                    path.display()
                );
                ClinicastConfig::default()
            }
        },
        None => ClinicastConfig::default(),
    }
}

static CONFIG: OnceLock<ClinicastConfig> = OnceLock::new();

/// Global configuration, loaded once per process
pub fn get_config() -> &'static ClinicastConfig {
    CONFIG.get_or_init(load_config)
}
