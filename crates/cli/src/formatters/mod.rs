//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide table, JSON and YAML renderings of command results.
//! - Write results to stdout or to a file.
//!
//! Does NOT handle:
//! - Logging or status messages (those go to stderr through `tracing`).
//!
//! Invariants:
//! - JSON and YAML carry every field of the output structs; tables are a
//!   human summary.
//! - Secrets only appear in `api-key show` output.

mod common;
mod json;
mod table;
mod yaml;

use anyhow::Result;
use cim_setup::{ChangePlan, FeatureGate, InvalidChange, RowView, SaveReport};
use serde::Serialize;

pub use common::output_result;

use json::JsonFormatter;
use table::TableFormatter;
use yaml::YamlFormatter;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: table, json, yaml", s),
        }
    }
}

/// Result of `check`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    pub capability: String,
    pub permitted: bool,
}

/// Result of `show`.
#[derive(Debug, Clone, Serialize)]
pub struct FormOutput {
    pub version: Option<String>,
    pub features: FeatureGate,
    pub rows: Vec<RowView>,
    pub indexes: Vec<String>,
    pub tags: Vec<String>,
    /// Render every field of every row, not just the summary.
    #[serde(skip)]
    pub detailed: bool,
}

/// Result of `apply`.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyOutput {
    pub dry_run: bool,
    /// Validation problems seen while applying the edit file.
    pub edit_errors: Vec<InvalidChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<ChangePlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SaveReport>,
}

/// Result of an `api-key` subcommand.
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyOutput {
    pub operation: String,
    pub name: String,
    pub realm: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Formatter trait for the different output types.
pub trait Formatter {
    fn format_check(&self, check: &CheckOutput) -> Result<String>;
    fn format_form(&self, form: &FormOutput) -> Result<String>;
    fn format_apply(&self, apply: &ApplyOutput) -> Result<String>;
    fn format_api_key(&self, key: &ApiKeyOutput) -> Result<String>;
}

/// Get a formatter for the specified format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Yaml => Box::new(YamlFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("yml").unwrap(), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert!(OutputFormat::from_str("csv").is_err());
    }
}
