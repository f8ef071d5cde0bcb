// crates/arbiter-cli/src/output.rs
//
// Output formatting utilities for the arbiter CLI.
// Supports table and JSON output modes.

use std::str::FromStr;

use serde::Serialize;
use tabled::{Table, Tabled};

use arbiter_core::MetricResult;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format '{}' (expected table or json)", other)),
        }
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Render a metric result for a table cell.
///
/// Per-device results list every device, e.g. `raspberry_pi=0.9850`.
pub fn format_result(result: &MetricResult) -> String {
    match result {
        MetricResult::Scalar(v) => format!("{:.4}", v),
        MetricResult::PerDevice(devices) => devices
            .iter()
            .map(|(device, score)| format!("{}={:.4}", device.as_str(), score))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbiter_core::DeviceScores;

    #[test]
    fn parses_formats_case_insensitively() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(" table ".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn scalar_and_device_results_render() {
        assert_eq!(format_result(&MetricResult::Scalar(0.5)), "0.5000");
        let rendered = format_result(&MetricResult::PerDevice(DeviceScores::uniform(1.0)));
        assert!(rendered.starts_with("raspberry_pi=1.0000"));
        assert_eq!(rendered.matches('=').count(), 4);
    }
}
