use assert_cmd::Command;
use tempfile::TempDir;

fn clinicast() -> Command {
    Command::cargo_bin("clinicast").unwrap()
}

#[test]
fn risk_terminal_report_happy_path() {
    let output = clinicast()
        .args([
            "risk",
            "--location",
            "penha",
            "--specialty",
            "physiotherapy",
            "--rain",
            "10",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("43.7%"), "{text}");
    assert!(text.contains("Rainy weather expected"), "{text}");
}

#[test]
fn risk_json_report_carries_probability() {
    let output = clinicast()
        .args([
            "risk",
            "--location",
            "penha",
            "--specialty",
            "physiotherapy",
            "--rain",
            "10",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["engine"], "rules");
    assert!((report["assessment"]["probability"].as_f64().unwrap() - 0.437).abs() < 0.001);
    assert_eq!(report["assessment"]["category"], "medium");
}

#[test]
fn risk_rejects_out_of_range_rainfall() {
    let output = clinicast()
        .args([
            "risk",
            "--location",
            "penha",
            "--specialty",
            "physiotherapy",
            "--rain",
            "99",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("rainfall"), "{stderr}");
}

#[test]
fn demand_json_report_for_a_saturday() {
    let output = clinicast()
        .args(["demand", "--date", "2026-08-29", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["forecast"]["estimate"], 280);
    assert_eq!(report["forecast"]["lower"], 200);
    assert_eq!(report["forecast"]["upper"], 360);
    assert_eq!(report["forecast"]["weekend"], true);
}

#[test]
fn demand_specialty_filter_scales_estimate() {
    let output = clinicast()
        .args([
            "demand",
            "--date",
            "2026-08-25",
            "--specialty",
            "physiotherapy",
            "--weather",
            "rainy",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // 480 × 0.35 × 0.88 = 147.84 -> 148
    assert_eq!(report["forecast"]["estimate"], 148);
}

#[test]
fn demand_markdown_report_writes_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("forecast.md");
    clinicast()
        .args([
            "demand",
            "--date",
            "2026-08-29",
            "--format",
            "markdown",
            "--output",
        ])
        .arg(&out)
        .assert()
        .success();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("# Appointment Demand Forecast"));
    assert!(text.contains("| Predicted volume | 280 |"));
}

#[test]
fn init_writes_config_once() {
    let dir = TempDir::new().unwrap();
    clinicast()
        .current_dir(dir.path())
        .args(["init"])
        .assert()
        .success();
    assert!(dir.path().join(".clinicast.toml").exists());

    // a second run without --force must refuse
    clinicast()
        .current_dir(dir.path())
        .args(["init"])
        .assert()
        .failure();

    clinicast()
        .current_dir(dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn missing_models_dir_falls_back_to_rules() {
    let output = clinicast()
        .args([
            "risk",
            "--location",
            "bombinhas",
            "--specialty",
            "psychotherapy",
            "--sms-sent",
            "--models-dir",
            "no-such-directory",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["engine"], "rules");
    // 0.25 × 0.90
    assert!((report["assessment"]["probability"].as_f64().unwrap() - 0.225).abs() < 0.001);
}
