// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod forecast;
pub mod io;
pub mod models;
pub mod risk;

// Re-export commonly used types
pub use crate::core::{
    Disability, Error, ForecastRequest, Gender, Location, PatientProfile, Result, Shift,
    Specialty, SpecialtyFilter, WeatherCondition,
};

pub use crate::risk::{
    InterventionTier, NoShowScorer, RiskAssessment, RiskCategory, RiskFactor,
};

pub use crate::forecast::{
    Confidence, DemandForecast, DemandForecaster, StaffingPlan, VolumeCategory,
};

pub use crate::models::{ClassifierArtifact, ModelMetadata, ModelStore, RegressorArtifact};

pub use crate::config::{ClinicastConfig, ForecastConfig, RiskConfig};

pub use crate::io::output::{
    create_writer, Engine, ForecastReport, OutputFormat, ReportWriter, RiskReport,
};
