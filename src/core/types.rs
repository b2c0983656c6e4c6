//! Domain value objects for risk scoring and demand forecasting.
//!
//! Every input is a bounded enum or a range-checked numeric field. Records are
//! transient: one scoring or forecasting call consumes one record, nothing is
//! persisted and nothing carries identity.

use chrono::{Datelike, NaiveDate, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clinic locations served by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Itajai,
    BalnearioCamboriu,
    Camboriu,
    Navegantes,
    Penha,
    Bombinhas,
}

impl Location {
    pub const ALL: [Location; 6] = [
        Location::Itajai,
        Location::BalnearioCamboriu,
        Location::Camboriu,
        Location::Navegantes,
        Location::Penha,
        Location::Bombinhas,
    ];

    /// Human-readable place name as it appears on clinic records.
    pub fn display_name(&self) -> &'static str {
        match self {
            Location::Itajai => "ITAJAÍ",
            Location::BalnearioCamboriu => "BALNEÁRIO CAMBORIÚ",
            Location::Camboriu => "CAMBORIÚ",
            Location::Navegantes => "NAVEGANTES",
            Location::Penha => "PENHA",
            Location::Bombinhas => "BOMBINHAS",
        }
    }

    /// Stable snake_case key, used in feature names and config tables.
    pub fn key(&self) -> &'static str {
        match self {
            Location::Itajai => "itajai",
            Location::BalnearioCamboriu => "balneario_camboriu",
            Location::Camboriu => "camboriu",
            Location::Navegantes => "navegantes",
            Location::Penha => "penha",
            Location::Bombinhas => "bombinhas",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Medical specialties offered across the clinics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Specialty {
    Physiotherapy,
    Psychotherapy,
    SpeechTherapy,
    OccupationalTherapy,
    Pedagogy,
    SocialAssistance,
}

impl Specialty {
    pub const ALL: [Specialty; 6] = [
        Specialty::Physiotherapy,
        Specialty::Psychotherapy,
        Specialty::SpeechTherapy,
        Specialty::OccupationalTherapy,
        Specialty::Pedagogy,
        Specialty::SocialAssistance,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Specialty::Physiotherapy => "physiotherapy",
            Specialty::Psychotherapy => "psychotherapy",
            Specialty::SpeechTherapy => "speech therapy",
            Specialty::OccupationalTherapy => "occupational therapy",
            Specialty::Pedagogy => "pedagogy",
            Specialty::SocialAssistance => "social assistance",
        }
    }

    /// Stable snake_case key, used in feature names and config tables.
    pub fn key(&self) -> &'static str {
        match self {
            Specialty::Physiotherapy => "physiotherapy",
            Specialty::Psychotherapy => "psychotherapy",
            Specialty::SpeechTherapy => "speech_therapy",
            Specialty::OccupationalTherapy => "occupational_therapy",
            Specialty::Pedagogy => "pedagogy",
            Specialty::SocialAssistance => "social_assistance",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Forecast scope: the whole network or a single specialty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialtyFilter {
    All,
    Only(Specialty),
}

impl SpecialtyFilter {
    pub fn from_option(specialty: Option<Specialty>) -> Self {
        match specialty {
            Some(s) => SpecialtyFilter::Only(s),
            None => SpecialtyFilter::All,
        }
    }
}

impl fmt::Display for SpecialtyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialtyFilter::All => write!(f, "all specialties"),
            SpecialtyFilter::Only(s) => write!(f, "{}", s.display_name()),
        }
    }
}

/// Appointment shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Morning,
    Afternoon,
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shift::Morning => write!(f, "morning"),
            Shift::Afternoon => write!(f, "afternoon"),
        }
    }
}

/// Patient gender as recorded on the appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    M,
    F,
}

/// Disability recorded for the patient, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Disability {
    None,
    Motor,
    Intellectual,
}

impl fmt::Display for Disability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disability::None => write!(f, "none"),
            Disability::Motor => write!(f, "motor"),
            Disability::Intellectual => write!(f, "intellectual"),
        }
    }
}

/// Expected weather on the appointment day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    Rainy,
    VeryHot,
    Cold,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 4] = [
        WeatherCondition::Clear,
        WeatherCondition::Rainy,
        WeatherCondition::VeryHot,
        WeatherCondition::Cold,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "normal/clear",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::VeryHot => "very hot (>30°C)",
            WeatherCondition::Cold => "cold (<15°C)",
        }
    }

    /// Stable snake_case key, used in feature names and config tables.
    pub fn key(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "clear",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::VeryHot => "very_hot",
            WeatherCondition::Cold => "cold",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single appointment record submitted for no-show scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub age: u8,
    pub gender: Gender,
    pub scholarship: bool,
    pub disability: Disability,
    pub hypertension: bool,
    pub diabetes: bool,
    pub alcoholism: bool,
    pub handicap: u8,
    pub specialty: Specialty,
    pub location: Location,
    pub shift: Shift,
    pub sms_sent: bool,
    /// Forecast temperature on the appointment day, °C
    pub forecast_temperature_c: f64,
    /// Forecast rainfall on the appointment day, mm
    pub forecast_rain_mm: f64,
}

impl PatientProfile {
    /// Rain above 5mm counts as a rainy day.
    pub fn is_rainy(&self) -> bool {
        self.forecast_rain_mm > 5.0
    }

    /// Temperatures above 30°C count as extreme heat.
    pub fn is_hot(&self) -> bool {
        self.forecast_temperature_c > 30.0
    }

    /// Number of recorded chronic conditions, counting any handicap level as one.
    pub fn chronic_condition_count(&self) -> usize {
        [
            self.hypertension,
            self.diabetes,
            self.alcoholism,
            self.handicap > 0,
        ]
        .iter()
        .filter(|&&c| c)
        .count()
    }
}

/// A single demand forecast request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub date: NaiveDate,
    pub specialty: SpecialtyFilter,
    pub weather: WeatherCondition,
}

impl ForecastRequest {
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}
