use chrono::NaiveDate;
use clinicast::models::{
    CLASSIFIER_FEATURES_FILE, CLASSIFIER_FILE, CLASSIFIER_METADATA_FILE, FORECASTER_FEATURES_FILE,
    FORECASTER_FILE, FORECASTER_METADATA_FILE,
};
use clinicast::{
    ClassifierArtifact, Disability, Error, ForecastRequest, Gender, Location, ModelStore,
    PatientProfile, RegressorArtifact, Shift, Specialty, SpecialtyFilter, WeatherCondition,
};
use indoc::indoc;
use std::fs;
use tempfile::TempDir;

fn profile() -> PatientProfile {
    PatientProfile {
        age: 40,
        gender: Gender::F,
        scholarship: false,
        disability: Disability::None,
        hypertension: false,
        diabetes: false,
        alcoholism: false,
        handicap: 0,
        specialty: Specialty::Physiotherapy,
        location: Location::Penha,
        shift: Shift::Afternoon,
        sms_sent: true,
        forecast_temperature_c: 25.0,
        forecast_rain_mm: 12.0,
    }
}

fn write_classifier_artifacts(dir: &TempDir, weights: Vec<f64>, features: Vec<&str>) {
    let model = ClassifierArtifact {
        weights,
        intercept: -1.0,
    };
    let names: Vec<String> = features.iter().map(|s| s.to_string()).collect();
    fs::write(
        dir.path().join(CLASSIFIER_FILE),
        postcard::to_allocvec(&model).unwrap(),
    )
    .unwrap();
    fs::write(
        dir.path().join(CLASSIFIER_FEATURES_FILE),
        postcard::to_allocvec(&names).unwrap(),
    )
    .unwrap();
    fs::write(
        dir.path().join(CLASSIFIER_METADATA_FILE),
        indoc! {r#"
            {
                "algorithm": "logistic_regression",
                "trained_at": "2026-07-02",
                "metrics": { "f1": 0.7261, "roc_auc": 0.8795 }
            }
        "#},
    )
    .unwrap();
}

#[test]
fn classifier_round_trips_through_artifacts() {
    let dir = TempDir::new().unwrap();
    write_classifier_artifacts(
        &dir,
        vec![0.02, -0.5, 0.3],
        vec!["age", "sms_sent", "rain_mm"],
    );

    let mut store = ModelStore::new(dir.path());
    store.load_classifier().unwrap();
    assert!(store.classifier_loaded());
    assert_eq!(
        store.classifier_metadata().unwrap().algorithm,
        "logistic_regression"
    );

    // z = -1.0 + 0.02*40 - 0.5*1 + 0.3*12 = 2.9
    let probability = store.predict_noshow(&profile()).unwrap();
    let expected = 1.0 / (1.0 + (-2.9f64).exp());
    assert!((probability - expected).abs() < 1e-9);
}

#[test]
fn missing_artifact_fails_and_keeps_handle_unloaded() {
    let dir = TempDir::new().unwrap();
    // weight file only; feature list and metadata are absent
    let model = ClassifierArtifact {
        weights: vec![0.1],
        intercept: 0.0,
    };
    fs::write(
        dir.path().join(CLASSIFIER_FILE),
        postcard::to_allocvec(&model).unwrap(),
    )
    .unwrap();

    let mut store = ModelStore::new(dir.path());
    assert!(store.load_classifier().is_err());
    assert!(!store.classifier_loaded());
    assert!(matches!(
        store.predict_noshow(&profile()).unwrap_err(),
        Error::ModelUnavailable(_)
    ));
}

#[test]
fn corrupt_weight_artifact_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    write_classifier_artifacts(&dir, vec![0.02], vec!["age"]);
    fs::write(dir.path().join(CLASSIFIER_FILE), b"not a postcard payload").unwrap();

    let mut store = ModelStore::new(dir.path());
    let err = store.load_classifier().unwrap_err();
    assert!(matches!(err, Error::ModelLoad { .. }), "{err}");
}

#[test]
fn feature_name_count_must_match_weights() {
    let dir = TempDir::new().unwrap();
    write_classifier_artifacts(&dir, vec![0.02, 0.4], vec!["age"]);

    let mut store = ModelStore::new(dir.path());
    assert!(store.load_classifier().is_err());
}

#[test]
fn forecaster_round_trips_through_artifacts() {
    let dir = TempDir::new().unwrap();
    let model = RegressorArtifact {
        weights: vec![-170.0, -40.0],
        intercept: 450.0,
    };
    let names = vec!["day_saturday".to_string(), "weather_rainy".to_string()];
    fs::write(
        dir.path().join(FORECASTER_FILE),
        postcard::to_allocvec(&model).unwrap(),
    )
    .unwrap();
    fs::write(
        dir.path().join(FORECASTER_FEATURES_FILE),
        postcard::to_allocvec(&names).unwrap(),
    )
    .unwrap();
    fs::write(
        dir.path().join(FORECASTER_METADATA_FILE),
        indoc! {r#"
            {
                "algorithm": "gradient_boosting",
                "metrics": { "r2": 0.7534, "mae": 80.0 }
            }
        "#},
    )
    .unwrap();

    let mut store = ModelStore::new(dir.path());
    store.load_forecaster().unwrap();
    assert!(store.forecaster_loaded());

    let request = ForecastRequest {
        date: NaiveDate::from_ymd_opt(2026, 8, 29).unwrap(),
        specialty: SpecialtyFilter::All,
        weather: WeatherCondition::Rainy,
    };
    let raw = store.forecast_demand(&request).unwrap();
    assert!((raw - 240.0).abs() < 1e-9);
}

#[test]
fn forecast_before_load_is_unavailable() {
    let store = ModelStore::new("does-not-exist");
    let request = ForecastRequest {
        date: NaiveDate::from_ymd_opt(2026, 8, 29).unwrap(),
        specialty: SpecialtyFilter::All,
        weather: WeatherCondition::Clear,
    };
    assert!(matches!(
        store.forecast_demand(&request).unwrap_err(),
        Error::ModelUnavailable("forecaster")
    ));
}
