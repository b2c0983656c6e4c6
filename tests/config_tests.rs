use clinicast::ClinicastConfig;
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn empty_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".clinicast.toml");
    fs::write(&path, "").unwrap();

    let config = ClinicastConfig::load_from(&path).unwrap();
    assert_eq!(config.risk.base_rates.penha, 0.38);
    assert_eq!(config.forecast.band_width, 80);
    assert_eq!(config.output.default_format, "terminal");
}

#[test]
fn partial_override_keeps_remaining_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".clinicast.toml");
    fs::write(
        &path,
        indoc! {r#"
            [risk.base_rates]
            penha = 0.41

            [forecast]
            band_width = 60

            [output]
            default_format = "json"
        "#},
    )
    .unwrap();

    let config = ClinicastConfig::load_from(&path).unwrap();
    assert_eq!(config.risk.base_rates.penha, 0.41);
    assert_eq!(config.risk.base_rates.bombinhas, 0.25);
    assert_eq!(config.forecast.band_width, 60);
    assert_eq!(config.forecast.day_volumes.tuesday, 480.0);
    assert_eq!(config.output.default_format, "json");
}

#[test]
fn out_of_range_override_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".clinicast.toml");
    fs::write(
        &path,
        indoc! {r#"
            [risk.base_rates]
            penha = 1.9
        "#},
    )
    .unwrap();

    let err = ClinicastConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("penha"));
}

#[test]
fn negative_factor_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".clinicast.toml");
    fs::write(
        &path,
        indoc! {r#"
            [risk.factors]
            rain = -1.15
        "#},
    )
    .unwrap();

    assert!(ClinicastConfig::load_from(&path).is_err());
}

#[test]
fn misspelled_output_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".clinicast.toml");
    fs::write(
        &path,
        indoc! {r#"
            [output]
            default_format = "jsonn"
        "#},
    )
    .unwrap();

    let err = ClinicastConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("default_format"), "{err}");
}

#[test]
fn malformed_toml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".clinicast.toml");
    fs::write(&path, "[risk\npenha =").unwrap();

    assert!(ClinicastConfig::load_from(&path).is_err());
}
