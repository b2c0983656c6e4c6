//! Loading and running persisted model artifacts.
//!
//! `ModelStore` mirrors the on-disk layout the training pipeline exports:
//! a binary weight artifact, a binary feature-name list and a JSON metadata
//! file per model. A load either fully succeeds or leaves the handle unloaded;
//! calling predict/forecast before a successful load is an error, not a
//! silent fallback. The rule-based scorers remain the documented default;
//! callers opt into this path explicitly.

pub mod artifacts;

pub use artifacts::{ClassifierArtifact, ModelMetadata, RegressorArtifact};

use chrono::{Datelike, Weekday};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::{Error, Result};
use crate::core::types::{
    Disability, ForecastRequest, Gender, PatientProfile, Shift, SpecialtyFilter,
};

pub const CLASSIFIER_FILE: &str = "noshow_classifier.bin";
pub const CLASSIFIER_FEATURES_FILE: &str = "noshow_features.bin";
pub const CLASSIFIER_METADATA_FILE: &str = "noshow_metadata.json";
pub const FORECASTER_FILE: &str = "demand_forecaster.bin";
pub const FORECASTER_FEATURES_FILE: &str = "demand_features.bin";
pub const FORECASTER_METADATA_FILE: &str = "demand_metadata.json";

/// A model artifact together with its feature names and provenance.
#[derive(Debug, Clone)]
pub struct LoadedModel<M> {
    pub model: M,
    pub features: Vec<String>,
    pub metadata: ModelMetadata,
}

/// Artifact store rooted at a models directory.
pub struct ModelStore {
    dir: PathBuf,
    classifier: Option<LoadedModel<ClassifierArtifact>>,
    forecaster: Option<LoadedModel<RegressorArtifact>>,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            classifier: None,
            forecaster: None,
        }
    }

    /// Load the no-show classifier artifacts.
    ///
    /// Fails if any of the three files is missing or malformed, or if the
    /// feature list does not match the weight vector; the handle stays
    /// unloaded on failure.
    pub fn load_classifier(&mut self) -> Result<()> {
        let model: ClassifierArtifact = read_binary(&self.dir.join(CLASSIFIER_FILE))?;
        let features: Vec<String> = read_binary(&self.dir.join(CLASSIFIER_FEATURES_FILE))?;
        let metadata = read_metadata(&self.dir.join(CLASSIFIER_METADATA_FILE))?;
        check_arity(
            model.weights.len(),
            features.len(),
            &self.dir.join(CLASSIFIER_FILE),
        )?;
        log::debug!(
            "Loaded classifier ({}, {} features)",
            metadata.algorithm,
            features.len()
        );
        self.classifier = Some(LoadedModel {
            model,
            features,
            metadata,
        });
        Ok(())
    }

    /// Load the demand forecaster artifacts. Same failure semantics as
    /// [`load_classifier`](Self::load_classifier).
    pub fn load_forecaster(&mut self) -> Result<()> {
        let model: RegressorArtifact = read_binary(&self.dir.join(FORECASTER_FILE))?;
        let features: Vec<String> = read_binary(&self.dir.join(FORECASTER_FEATURES_FILE))?;
        let metadata = read_metadata(&self.dir.join(FORECASTER_METADATA_FILE))?;
        check_arity(
            model.weights.len(),
            features.len(),
            &self.dir.join(FORECASTER_FILE),
        )?;
        log::debug!(
            "Loaded forecaster ({}, {} features)",
            metadata.algorithm,
            features.len()
        );
        self.forecaster = Some(LoadedModel {
            model,
            features,
            metadata,
        });
        Ok(())
    }

    pub fn classifier_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn forecaster_loaded(&self) -> bool {
        self.forecaster.is_some()
    }

    pub fn classifier_metadata(&self) -> Option<&ModelMetadata> {
        self.classifier.as_ref().map(|m| &m.metadata)
    }

    pub fn forecaster_metadata(&self) -> Option<&ModelMetadata> {
        self.forecaster.as_ref().map(|m| &m.metadata)
    }

    /// No-show probability for a patient record from the loaded classifier.
    pub fn predict_noshow(&self, profile: &PatientProfile) -> Result<f64> {
        let loaded = self
            .classifier
            .as_ref()
            .ok_or(Error::ModelUnavailable("classifier"))?;
        let features = featurize_profile(profile, &loaded.features)?;
        loaded.model.predict_probability(&features)
    }

    /// Raw appointment-count prediction from the loaded forecaster.
    pub fn forecast_demand(&self, request: &ForecastRequest) -> Result<f64> {
        let loaded = self
            .forecaster
            .as_ref()
            .ok_or(Error::ModelUnavailable("forecaster"))?;
        let features = featurize_request(request, &loaded.features)?;
        loaded.model.predict(&features)
    }
}

fn read_binary<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|e| Error::model_io(path, e))?;
    postcard::from_bytes(&bytes)
        .map_err(|e| Error::model_load(path, format!("malformed artifact: {e}")))
}

fn read_metadata(path: &Path) -> Result<ModelMetadata> {
    let content = fs::read_to_string(path).map_err(|e| Error::model_io(path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::model_load(path, format!("malformed metadata: {e}")))
}

fn check_arity(weights: usize, features: usize, path: &Path) -> Result<()> {
    if weights == features {
        Ok(())
    } else {
        Err(Error::model_load(
            path,
            format!("{weights} weights but {features} feature names"),
        ))
    }
}

/// Build the classifier feature vector in the order the artifact names it.
fn featurize_profile(profile: &PatientProfile, names: &[String]) -> Result<Vec<f64>> {
    names
        .iter()
        .map(|name| profile_feature(profile, name))
        .collect()
}

fn profile_feature(profile: &PatientProfile, name: &str) -> Result<f64> {
    if let Some(location) = name.strip_prefix("location_") {
        return Ok(indicator(profile.location.key() == location));
    }
    if let Some(specialty) = name.strip_prefix("specialty_") {
        return Ok(indicator(profile.specialty.key() == specialty));
    }
    match name {
        "age" => Ok(f64::from(profile.age)),
        "gender_m" => Ok(indicator(profile.gender == Gender::M)),
        "scholarship" => Ok(indicator(profile.scholarship)),
        "hypertension" => Ok(indicator(profile.hypertension)),
        "diabetes" => Ok(indicator(profile.diabetes)),
        "alcoholism" => Ok(indicator(profile.alcoholism)),
        "handicap" => Ok(f64::from(profile.handicap)),
        "has_disability" => Ok(indicator(profile.disability != Disability::None)),
        "sms_sent" => Ok(indicator(profile.sms_sent)),
        "afternoon_shift" => Ok(indicator(profile.shift == Shift::Afternoon)),
        "temperature_c" => Ok(profile.forecast_temperature_c),
        "rain_mm" => Ok(profile.forecast_rain_mm),
        _ => Err(Error::Feature(format!("unknown classifier feature: {name}"))),
    }
}

/// Build the forecaster feature vector in the order the artifact names it.
fn featurize_request(request: &ForecastRequest, names: &[String]) -> Result<Vec<f64>> {
    names
        .iter()
        .map(|name| request_feature(request, name))
        .collect()
}

fn request_feature(request: &ForecastRequest, name: &str) -> Result<f64> {
    if let Some(day) = name.strip_prefix("day_") {
        return Ok(indicator(weekday_key(request.weekday()) == day));
    }
    if let Some(weather) = name.strip_prefix("weather_") {
        return Ok(indicator(request.weather.key() == weather));
    }
    if name == "specialty_all" {
        return Ok(indicator(request.specialty == SpecialtyFilter::All));
    }
    if let Some(specialty) = name.strip_prefix("specialty_") {
        return Ok(indicator(matches!(
            request.specialty,
            SpecialtyFilter::Only(s) if s.key() == specialty
        )));
    }
    match name {
        "month" => Ok(f64::from(request.date.month())),
        "day_of_month" => Ok(f64::from(request.date.day())),
        "is_weekend" => Ok(indicator(request.is_weekend())),
        _ => Err(Error::Feature(format!("unknown forecaster feature: {name}"))),
    }
}

fn weekday_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

fn indicator(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}
