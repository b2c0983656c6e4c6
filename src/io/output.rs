//! Report rendering: terminal, markdown and JSON writers.

use chrono::{DateTime, Utc, Weekday};
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::core::types::{ForecastRequest, PatientProfile};
use crate::forecast::{DemandForecast, VolumeCategory};
use crate::risk::{InterventionTier, RiskAssessment, RiskCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Markdown,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "terminal" => Ok(OutputFormat::Terminal),
            "markdown" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{other}' (expected terminal, markdown or json)"
            )),
        }
    }
}

/// Which engine produced a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "engine")]
pub enum Engine {
    Rules,
    Model { algorithm: String },
}

impl Engine {
    fn label(&self) -> String {
        match self {
            Engine::Rules => "rule-based".to_string(),
            Engine::Model { algorithm } => format!("model ({algorithm})"),
        }
    }
}

/// Full no-show risk report for one appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub engine: Engine,
    pub profile: PatientProfile,
    pub assessment: RiskAssessment,
}

/// Full demand forecast report for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub engine: Engine,
    pub request: ForecastRequest,
    pub forecast: DemandForecast,
    /// Average volume per weekday, for context
    pub weekly_pattern: Vec<(Weekday, u32)>,
}

pub trait ReportWriter {
    fn write_risk(&mut self, report: &RiskReport) -> anyhow::Result<()>;
    fn write_forecast(&mut self, report: &ForecastReport) -> anyhow::Result<()>;
}

pub fn create_writer<W: Write + 'static>(writer: W, format: OutputFormat) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_risk(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }

    fn write_forecast(&mut self, report: &ForecastReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_risk(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let a = &report.assessment;
        writeln!(self.writer, "# No-Show Risk Assessment")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {} | Engine: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.engine.label()
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| No-show probability | {:.1}% |",
            a.probability * 100.0
        )?;
        writeln!(
            self.writer,
            "| Show probability | {:.1}% |",
            a.show_probability * 100.0
        )?;
        writeln!(self.writer, "| Risk category | {} |", a.category)?;
        writeln!(self.writer, "| Recommended protocol | {} |", a.recommendation)?;
        writeln!(
            self.writer,
            "| Revenue at risk | ${:.2} |",
            a.revenue_at_risk
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "## Contributing Factors")?;
        writeln!(self.writer)?;
        if a.factors.is_empty() {
            writeln!(self.writer, "No significant risk factors identified.")?;
        } else {
            writeln!(self.writer, "| Factor | Impact |")?;
            writeln!(self.writer, "|--------|--------|")?;
            for factor in &a.factors {
                writeln!(
                    self.writer,
                    "| {} | {} |",
                    factor.summary(),
                    factor.impact()
                )?;
            }
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "## Recommended Actions")?;
        writeln!(self.writer)?;
        for action in protocol_actions(a.recommendation) {
            writeln!(self.writer, "- {action}")?;
        }
        Ok(())
    }

    fn write_forecast(&mut self, report: &ForecastReport) -> anyhow::Result<()> {
        let f = &report.forecast;
        writeln!(self.writer, "# Appointment Demand Forecast")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {} | Engine: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.engine.label()
        )?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Target: {} ({}) | Scope: {} | Weather: {}",
            report.request.date,
            weekday_name(f.day),
            report.request.specialty,
            report.request.weather
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "## Forecast")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Predicted volume | {} |", f.estimate)?;
        writeln!(self.writer, "| Lower bound | {} |", f.lower)?;
        writeln!(self.writer, "| Upper bound | {} |", f.upper)?;
        writeln!(self.writer, "| Volume category | {} |", f.category)?;
        writeln!(self.writer, "| Confidence | {} |", f.confidence)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "## Staffing Plan")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Scenario | Clinicians |")?;
        writeln!(self.writer, "|----------|------------|")?;
        writeln!(self.writer, "| Expected | {} |", f.staffing.recommended)?;
        writeln!(self.writer, "| Light day | {} |", f.staffing.minimum)?;
        writeln!(self.writer, "| Heavy day | {} |", f.staffing.maximum)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "## Weekly Pattern")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Day | Average volume |")?;
        writeln!(self.writer, "|-----|----------------|")?;
        for (day, volume) in &report.weekly_pattern {
            writeln!(self.writer, "| {} | {} |", weekday_name(*day), volume)?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_risk(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let a = &report.assessment;
        let headline = format!(
            "{} RISK: {:.1}% no-show probability",
            a.category.to_string().to_uppercase(),
            a.probability * 100.0
        );
        let headline = match a.category {
            RiskCategory::High => headline.red().bold(),
            RiskCategory::Medium => headline.yellow().bold(),
            RiskCategory::Low => headline.green().bold(),
        };
        writeln!(self.writer, "{headline}")?;
        writeln!(
            self.writer,
            "{}",
            format!(
                "engine: {} | generated {}",
                report.engine.label(),
                report.generated_at.format("%Y-%m-%d %H:%M UTC")
            )
            .dimmed()
        )?;
        writeln!(self.writer)?;

        let mut summary = Table::new();
        summary.load_preset(UTF8_FULL);
        summary.set_header(vec!["Metric", "Value"]);
        summary.add_row(vec![
            "Show probability".to_string(),
            format!("{:.1}%", a.show_probability * 100.0),
        ]);
        summary.add_row(vec![
            "No-show probability".to_string(),
            format!("{:.1}%", a.probability * 100.0),
        ]);
        summary.add_row(vec![
            "Recommended protocol".to_string(),
            a.recommendation.to_string(),
        ]);
        summary.add_row(vec![
            "Revenue at risk".to_string(),
            format!("${:.2}", a.revenue_at_risk),
        ]);
        writeln!(self.writer, "{summary}")?;

        if a.factors.is_empty() {
            writeln!(
                self.writer,
                "{}",
                "No significant risk factors identified.".green()
            )?;
        } else {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Contributing factors".bold())?;
            let mut factors = Table::new();
            factors.load_preset(UTF8_FULL);
            factors.set_header(vec!["Factor", "Impact"]);
            for factor in &a.factors {
                factors.add_row(vec![factor.summary(), factor.impact().to_string()]);
            }
            writeln!(self.writer, "{factors}")?;
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "Recommended actions".bold())?;
        for action in protocol_actions(a.recommendation) {
            writeln!(self.writer, "  - {action}")?;
        }
        Ok(())
    }

    fn write_forecast(&mut self, report: &ForecastReport) -> anyhow::Result<()> {
        let f = &report.forecast;
        let headline = format!(
            "{} volume: {} appointments expected ({}-{})",
            f.category, f.estimate, f.lower, f.upper
        );
        let headline = match f.category {
            VolumeCategory::High => headline.red().bold(),
            VolumeCategory::Normal => headline.cyan().bold(),
            VolumeCategory::Low => headline.green().bold(),
        };
        writeln!(self.writer, "{headline}")?;
        writeln!(
            self.writer,
            "{}",
            format!(
                "{} ({}) | {} | {} | confidence: {} | engine: {}",
                report.request.date,
                weekday_name(f.day),
                report.request.specialty,
                report.request.weather,
                f.confidence,
                report.engine.label()
            )
            .dimmed()
        )?;
        if f.weekend {
            writeln!(
                self.writer,
                "{}",
                "Weekend selected: expect significantly lower volumes".yellow()
            )?;
        }
        writeln!(self.writer)?;

        let mut staffing = Table::new();
        staffing.load_preset(UTF8_FULL);
        staffing.set_header(vec!["Scenario", "Volume", "Clinicians"]);
        staffing.add_row(vec![
            "Light day".to_string(),
            f.lower.to_string(),
            f.staffing.minimum.to_string(),
        ]);
        staffing.add_row(vec![
            "Expected".to_string(),
            f.estimate.to_string(),
            f.staffing.recommended.to_string(),
        ]);
        staffing.add_row(vec![
            "Heavy day".to_string(),
            f.upper.to_string(),
            f.staffing.maximum.to_string(),
        ]);
        writeln!(self.writer, "{staffing}")?;

        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "Typical weekly pattern".bold())?;
        let mut pattern = Table::new();
        pattern.load_preset(UTF8_FULL);
        pattern.set_header(vec!["Day", "Average volume"]);
        for (day, volume) in &report.weekly_pattern {
            let name = if *day == f.day {
                format!("{} <", weekday_name(*day))
            } else {
                weekday_name(*day).to_string()
            };
            pattern.add_row(vec![name, volume.to_string()]);
        }
        writeln!(self.writer, "{pattern}")?;
        Ok(())
    }
}

fn protocol_actions(tier: InterventionTier) -> &'static [&'static str] {
    match tier {
        InterventionTier::Intensive => &[
            "Send SMS reminder within 2 hours",
            "Personal call 24 hours before the appointment",
            "Require explicit patient confirmation",
            "Keep 2-3 standby patients for this slot",
            "Offer telehealth as alternative if weather is poor",
        ],
        InterventionTier::Standard => &[
            "Send SMS reminder 24-48 hours before the appointment",
            "Monitor for a confirmation response",
            "Identify one standby patient",
        ],
        InterventionTier::Minimal => &[
            "Single standard reminder 24 hours before the appointment",
            "No additional follow-up required",
        ],
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{
        Disability, Gender, Location, Shift, Specialty, SpecialtyFilter, WeatherCondition,
    };
    use crate::forecast::DemandForecaster;
    use crate::risk::NoShowScorer;
    use chrono::NaiveDate;

    fn risk_report() -> RiskReport {
        let profile = PatientProfile {
            age: 35,
            gender: Gender::F,
            scholarship: false,
            disability: Disability::None,
            hypertension: false,
            diabetes: false,
            alcoholism: false,
            handicap: 0,
            specialty: Specialty::Physiotherapy,
            location: Location::Penha,
            shift: Shift::Morning,
            sms_sent: false,
            forecast_temperature_c: 22.0,
            forecast_rain_mm: 10.0,
        };
        let assessment = NoShowScorer::default().score(&profile).unwrap();
        RiskReport {
            generated_at: Utc::now(),
            engine: Engine::Rules,
            profile,
            assessment,
        }
    }

    fn forecast_report() -> ForecastReport {
        let request = ForecastRequest {
            date: NaiveDate::from_ymd_opt(2026, 8, 29).unwrap(),
            specialty: SpecialtyFilter::All,
            weather: WeatherCondition::Clear,
        };
        let forecaster = DemandForecaster::default();
        ForecastReport {
            generated_at: Utc::now(),
            engine: Engine::Rules,
            request,
            forecast: forecaster.forecast(&request),
            weekly_pattern: forecaster.weekly_pattern().to_vec(),
        }
    }

    #[test]
    fn json_risk_report_round_trips() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_risk(&risk_report())
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed["engine"], "rules");
        assert!((parsed["assessment"]["probability"].as_f64().unwrap() - 0.437).abs() < 0.001);
    }

    #[test]
    fn markdown_risk_report_lists_factors() {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_risk(&risk_report())
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("# No-Show Risk Assessment"));
        assert!(text.contains("High-risk location: PENHA"));
        assert!(text.contains("Rainy weather expected"));
    }

    #[test]
    fn markdown_forecast_report_has_band_and_staffing() {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_forecast(&forecast_report())
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("| Predicted volume | 280 |"));
        assert!(text.contains("| Lower bound | 200 |"));
        assert!(text.contains("| Upper bound | 360 |"));
        assert!(text.contains("| Expected | 7 |"));
    }

    #[test]
    fn terminal_forecast_report_renders() {
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_forecast(&forecast_report())
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("280"));
        assert!(text.contains("Saturday"));
    }

    #[test]
    fn output_format_parses_config_strings() {
        assert_eq!(
            "terminal".parse::<OutputFormat>().unwrap(),
            OutputFormat::Terminal
        );
        assert!("csv".parse::<OutputFormat>().is_err());
    }
}
