//! The `risk` subcommand: score one appointment and render the report.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config;
use crate::core::types::PatientProfile;
use crate::core::validation::validate_profile;
use crate::io::output::{create_writer, Engine, OutputFormat, RiskReport};
use crate::models::ModelStore;
use crate::risk::{NoShowScorer, RiskAssessment};

pub struct RiskCommand {
    pub profile: PatientProfile,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub models_dir: Option<PathBuf>,
}

pub fn handle_risk(command: RiskCommand) -> Result<()> {
    let config = config::get_config();
    validate_profile(&command.profile)?;

    let scorer = NoShowScorer::new(config.risk.clone());
    let (assessment, engine) =
        resolve_assessment(&scorer, &command.profile, command.models_dir.as_deref())?;

    let report = RiskReport {
        generated_at: Utc::now(),
        engine,
        profile: command.profile,
        assessment,
    };

    let format = resolve_format(command.format, &config.output.default_format);
    match command.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            create_writer(file, format).write_risk(&report)?;
        }
        None => create_writer(std::io::stdout(), format).write_risk(&report)?,
    }
    Ok(())
}

/// Prefer the persisted classifier when a models directory is given and
/// loads cleanly; otherwise score with the rule tables.
fn resolve_assessment(
    scorer: &NoShowScorer,
    profile: &PatientProfile,
    models_dir: Option<&Path>,
) -> Result<(RiskAssessment, Engine)> {
    if let Some(dir) = models_dir {
        let mut store = ModelStore::new(dir);
        match store.load_classifier() {
            Ok(()) => {
                let probability = store.predict_noshow(profile)?;
                let algorithm = store
                    .classifier_metadata()
                    .map(|m| m.algorithm.clone())
                    .unwrap_or_else(|| "unknown".to_string());
                return Ok((scorer.assessment(profile, probability), Engine::Model { algorithm }));
            }
            Err(e) => {
                log::warn!("Classifier unavailable ({e}); using rule-based scorer");
            }
        }
    }
    Ok((scorer.score(profile)?, Engine::Rules))
}

pub(crate) fn resolve_format(flag: Option<OutputFormat>, configured: &str) -> OutputFormat {
    flag.unwrap_or_else(|| configured.parse().unwrap_or(OutputFormat::Terminal))
}
