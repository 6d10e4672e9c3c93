//! JSON formatter implementation.

use anyhow::Result;

use crate::formatters::{ApiKeyOutput, ApplyOutput, CheckOutput, FormOutput, Formatter};

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_check(&self, check: &CheckOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(check)? + "\n")
    }

    fn format_form(&self, form: &FormOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(form)? + "\n")
    }

    fn format_apply(&self, apply: &ApplyOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(apply)? + "\n")
    }

    fn format_api_key(&self, key: &ApiKeyOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(key)? + "\n")
    }
}
