use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::{Disability, Gender, Location, Shift, Specialty, WeatherCondition};
use crate::io::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "clinicast")]
#[command(about = "No-show risk scoring and appointment demand forecasting", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score no-show risk for a single appointment
    Risk {
        /// Patient age in years (0-120)
        #[arg(long, default_value = "35")]
        age: u8,

        /// Patient gender
        #[arg(long, value_enum, default_value = "f")]
        gender: Gender,

        /// Patient has insurance or scholarship coverage
        #[arg(long)]
        scholarship: bool,

        /// Recorded disability, if any
        #[arg(long, value_enum, default_value = "none")]
        disability: Disability,

        /// Patient has hypertension
        #[arg(long)]
        hypertension: bool,

        /// Patient has diabetes
        #[arg(long)]
        diabetes: bool,

        /// Patient has alcoholism
        #[arg(long)]
        alcoholism: bool,

        /// Handicap level (0-4)
        #[arg(long, default_value = "0")]
        handicap: u8,

        /// Medical specialty of the appointment
        #[arg(long, value_enum)]
        specialty: Specialty,

        /// Clinic location
        #[arg(long, value_enum)]
        location: Location,

        /// Appointment shift
        #[arg(long, value_enum, default_value = "morning")]
        shift: Shift,

        /// An SMS reminder has been sent
        #[arg(long)]
        sms_sent: bool,

        /// Forecast temperature on the appointment day, °C (10-40)
        #[arg(long, default_value = "22")]
        temperature: f64,

        /// Forecast rainfall on the appointment day, mm (0-50)
        #[arg(long, default_value = "0")]
        rain: f64,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory with trained model artifacts; when given and loadable,
        /// the persisted classifier is used instead of the rule tables
        #[arg(long = "models-dir", env = "CLINICAST_MODELS_DIR")]
        models_dir: Option<PathBuf>,
    },

    /// Forecast appointment volume for a day
    Demand {
        /// Target date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Restrict the forecast to one specialty (defaults to all)
        #[arg(long, value_enum)]
        specialty: Option<Specialty>,

        /// Expected weather conditions
        #[arg(long, value_enum, default_value = "clear")]
        weather: WeatherCondition,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory with trained model artifacts; when given and loadable,
        /// the persisted regressor is used instead of the rule tables
        #[arg(long = "models-dir", env = "CLINICAST_MODELS_DIR")]
        models_dir: Option<PathBuf>,
    },

    /// Create a default .clinicast.toml configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}
