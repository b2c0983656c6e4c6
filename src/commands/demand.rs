//! The `demand` subcommand: forecast one day and render the report.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::commands::risk::resolve_format;
use crate::config;
use crate::core::types::ForecastRequest;
use crate::forecast::{DemandForecast, DemandForecaster};
use crate::io::output::{create_writer, Engine, ForecastReport, OutputFormat};
use crate::models::ModelStore;

pub struct DemandCommand {
    pub request: ForecastRequest,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub models_dir: Option<PathBuf>,
}

pub fn handle_demand(command: DemandCommand) -> Result<()> {
    let config = config::get_config();
    let forecaster = DemandForecaster::new(config.forecast.clone());

    let (forecast, engine) =
        resolve_forecast(&forecaster, &command.request, command.models_dir.as_deref())?;

    let report = ForecastReport {
        generated_at: Utc::now(),
        engine,
        request: command.request,
        forecast,
        weekly_pattern: forecaster.weekly_pattern().to_vec(),
    };

    let format = resolve_format(command.format, &config.output.default_format);
    match command.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            create_writer(file, format).write_forecast(&report)?;
        }
        None => create_writer(std::io::stdout(), format).write_forecast(&report)?,
    }
    Ok(())
}

/// Prefer the persisted regressor when a models directory is given and
/// loads cleanly; otherwise forecast with the rule tables.
fn resolve_forecast(
    forecaster: &DemandForecaster,
    request: &ForecastRequest,
    models_dir: Option<&Path>,
) -> Result<(DemandForecast, Engine)> {
    if let Some(dir) = models_dir {
        let mut store = ModelStore::new(dir);
        match store.load_forecaster() {
            Ok(()) => {
                let raw = store.forecast_demand(request)?;
                let algorithm = store
                    .forecaster_metadata()
                    .map(|m| m.algorithm.clone())
                    .unwrap_or_else(|| "unknown".to_string());
                return Ok((
                    forecaster.from_estimate(request, raw),
                    Engine::Model { algorithm },
                ));
            }
            Err(e) => {
                log::warn!("Forecaster unavailable ({e}); using rule-based forecaster");
            }
        }
    }
    Ok((forecaster.forecast(request), Engine::Rules))
}
