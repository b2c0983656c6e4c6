use anyhow::Result;
use chrono::Local;
use clap::Parser;
use clinicast::cli::{Cli, Commands};
use clinicast::commands::demand::{handle_demand, DemandCommand};
use clinicast::commands::init::init_config;
use clinicast::commands::risk::{handle_risk, RiskCommand};
use clinicast::core::types::{ForecastRequest, PatientProfile, SpecialtyFilter};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Risk {
            age,
            gender,
            scholarship,
            disability,
            hypertension,
            diabetes,
            alcoholism,
            handicap,
            specialty,
            location,
            shift,
            sms_sent,
            temperature,
            rain,
            format,
            output,
            models_dir,
        } => {
            let profile = PatientProfile {
                age,
                gender,
                scholarship,
                disability,
                hypertension,
                diabetes,
                alcoholism,
                handicap,
                specialty,
                location,
                shift,
                sms_sent,
                forecast_temperature_c: temperature,
                forecast_rain_mm: rain,
            };
            handle_risk(RiskCommand {
                profile,
                format,
                output,
                models_dir,
            })
        }
        Commands::Demand {
            date,
            specialty,
            weather,
            format,
            output,
            models_dir,
        } => {
            let request = ForecastRequest {
                date: date.unwrap_or_else(|| Local::now().date_naive()),
                specialty: SpecialtyFilter::from_option(specialty),
                weather,
            };
            handle_demand(DemandCommand {
                request,
                format,
                output,
                models_dir,
            })
        }
        Commands::Init { force } => init_config(force),
    }
}
