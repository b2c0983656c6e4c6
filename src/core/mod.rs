pub mod errors;
pub mod types;
pub mod validation;

pub use errors::{Error, Result};
pub use types::{
    Disability, ForecastRequest, Gender, Location, PatientProfile, Shift, Specialty,
    SpecialtyFilter, WeatherCondition,
};
