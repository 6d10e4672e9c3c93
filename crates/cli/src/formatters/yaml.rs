//! YAML formatter implementation.

use anyhow::Result;

use crate::formatters::{ApiKeyOutput, ApplyOutput, CheckOutput, FormOutput, Formatter};

/// YAML formatter.
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn format_check(&self, check: &CheckOutput) -> Result<String> {
        Ok(serde_yaml::to_string(check)?)
    }

    fn format_form(&self, form: &FormOutput) -> Result<String> {
        Ok(serde_yaml::to_string(form)?)
    }

    fn format_apply(&self, apply: &ApplyOutput) -> Result<String> {
        Ok(serde_yaml::to_string(apply)?)
    }

    fn format_api_key(&self, key: &ApiKeyOutput) -> Result<String> {
        Ok(serde_yaml::to_string(key)?)
    }
}
