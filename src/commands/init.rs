use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Clinicast Configuration
# All values are optional; anything omitted falls back to the rates fitted
# from the historical appointment data.

[risk]
high_threshold = 0.60
medium_threshold = 0.35
intensive_threshold = 0.50
appointment_value = 50.0

# Historical no-show base rate per clinic location
[risk.base_rates]
itajai = 0.35
balneario_camboriu = 0.28
camboriu = 0.33
navegantes = 0.30
penha = 0.38
bombinhas = 0.25

# Multiplicative adjustments applied on top of the base rate
[risk.factors]
sms_reminder = 0.90
rain = 1.15
heat = 1.08
youth = 1.05
senior = 0.95
chronic_conditions = 0.92
afternoon = 1.05
disability = 1.08

[forecast]
band_width = 80
high_threshold = 450
normal_threshold = 300
patients_per_clinician = 40

# Average appointment volume per day of week
[forecast.day_volumes]
monday = 450
tuesday = 480
wednesday = 470
thursday = 460
friday = 420
saturday = 280
sunday = 180

# Share of total volume per specialty
[forecast.specialty_shares]
physiotherapy = 0.35
psychotherapy = 0.25
speech_therapy = 0.15
occupational_therapy = 0.12
pedagogy = 0.08
social_assistance = 0.05

# Attendance multiplier per expected weather condition
[forecast.weather_multipliers]
clear = 1.0
rainy = 0.88
very_hot = 0.92
cold = 0.95

[output]
default_format = "terminal"
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");

    Ok(())
}
