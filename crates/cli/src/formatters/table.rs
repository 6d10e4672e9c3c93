//! Table formatter implementation.
//!
//! Responsibilities:
//! - Render command results as fixed-width text for terminals.
//!
//! Does NOT handle:
//! - Machine-readable output (see json.rs and yaml.rs).

use anyhow::Result;
use cim_setup::{RowStatus, RowView, SaveKind, SaveOutcome, ValidationErrors};

use crate::formatters::{ApiKeyOutput, ApplyOutput, CheckOutput, FormOutput, Formatter};

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_check(&self, check: &CheckOutput) -> Result<String> {
        Ok(format!(
            "Capability {}: {}\n",
            check.capability,
            if check.permitted { "granted" } else { "missing" }
        ))
    }

    fn format_form(&self, form: &FormOutput) -> Result<String> {
        let mut output = String::new();

        if let Some(ref version) = form.version {
            output.push_str(&format!("Splunk version: {}\n\n", version));
        }

        if form.rows.is_empty() {
            output.push_str("No data models found.\n");
            return Ok(output);
        }

        output.push_str(&format!(
            "{:<2} {:<32} {:<12} {:<10} {}\n",
            "", "DATA MODEL", "ACCELERATED", "STATUS", "INDEXES"
        ));
        output.push_str(&format!(
            "{:<2} {:<32} {:<12} {:<10} {}\n",
            "", "==========", "===========", "======", "======="
        ));
        for row in &form.rows {
            let mut restriction = row.restriction.text.clone();
            if row.restriction.has_more {
                restriction.push_str("...");
            }
            output.push_str(&format!(
                "{:<2} {:<32} {:<12} {:<10} {}\n",
                if row.selected { ">" } else { "" },
                row.label,
                if row.controls_enabled { "Yes" } else { "No" },
                status_text(row),
                restriction
            ));
        }

        if form.detailed {
            for row in &form.rows {
                output.push('\n');
                output.push_str(&format_row_detail(row));
            }
        }

        Ok(output)
    }

    fn format_apply(&self, apply: &ApplyOutput) -> Result<String> {
        let mut output = String::new();

        for invalid in &apply.edit_errors {
            output.push_str(&format!("Invalid edits for {}:\n", invalid.model));
            output.push_str(&format_errors(&invalid.errors));
        }

        if let Some(ref plan) = apply.plan {
            if plan.is_empty() {
                output.push_str("No changes to save.\n");
            }
            for change in &plan.whitelists {
                output.push_str(&format!(
                    "Would update {}: {}\n",
                    change.macro_name, change.definition
                ));
            }
            for change in &plan.datamodels {
                output.push_str(&format!(
                    "Would update data model {}: {}\n",
                    change.model,
                    change.changed_keys.join(", ")
                ));
            }
            for invalid in &plan.invalid {
                output.push_str(&format!("Would reject {}:\n", invalid.model));
                output.push_str(&format_errors(&invalid.errors));
            }
        }

        if let Some(ref report) = apply.report {
            if report.is_empty() {
                output.push_str("No changes to save.\n");
                return Ok(output);
            }
            output.push_str(&format!(
                "{:<32} {:<14} {}\n",
                "DATA MODEL", "ITEM", "RESULT"
            ));
            output.push_str(&format!(
                "{:<32} {:<14} {}\n",
                "==========", "====", "======"
            ));
            for item in &report.items {
                let kind = match item.kind {
                    SaveKind::Whitelist => "whitelist",
                    SaveKind::Acceleration => "acceleration",
                };
                let result = match &item.outcome {
                    SaveOutcome::Saved => "Saved".to_string(),
                    SaveOutcome::Failed { message } => format!("Failed: {}", message),
                    SaveOutcome::Invalid { errors } => {
                        let fields: Vec<&str> = errors.fields().map(|f| f.label()).collect();
                        format!("Invalid: {}", fields.join(", "))
                    }
                };
                output.push_str(&format!("{:<32} {:<14} {}\n", item.model, kind, result));
            }
        }

        Ok(output)
    }

    fn format_api_key(&self, key: &ApiKeyOutput) -> Result<String> {
        let mut output = format!("{}\n", key.message);
        if let Some(ref secret) = key.key {
            output.push_str(&format!("{}\n", secret));
        }
        Ok(output)
    }
}

fn status_text(row: &RowView) -> &'static str {
    match row.status {
        Some(RowStatus::Saved) => "Saved",
        Some(RowStatus::SaveFailed { .. }) => "Failed",
        Some(RowStatus::Invalid { .. }) => "Invalid",
        None if row.dirty => "Modified",
        None => "",
    }
}

fn format_row_detail(row: &RowView) -> String {
    let mut output = format!("--- {} ---\n", row.label);
    output.push_str(&format!(
        "Whitelist macro: {}\n",
        row.macro_name.as_deref().unwrap_or("N/A")
    ));
    output.push_str(&format!(
        "Indexes: {}\n",
        if row.whitelist.is_empty() { "All" } else { &row.whitelist }
    ));
    for field in &row.fields {
        output.push_str(&format!(
            "{}: {}{}\n",
            field.label,
            if field.value.is_empty() { "N/A" } else { &field.value },
            if field.enabled { "" } else { " (disabled)" }
        ));
    }
    if let Some(ref tags) = row.tags_whitelist {
        output.push_str(&format!(
            "Tags whitelist: {}\n",
            if tags.is_empty() { "N/A" } else { tags }
        ));
    }
    output.push_str(&format_errors(&row.errors));
    if let Some(RowStatus::SaveFailed { ref message }) = row.status {
        output.push_str(&format!("Save failed: {}\n", message));
    }
    output
}

fn format_errors(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {}: {}\n", field.label(), message))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cim_setup::{ChangePlan, SaveItem, SaveReport, WhitelistChange};

    #[test]
    fn test_check_output() {
        let out = TableFormatter
            .format_check(&CheckOutput {
                capability: "accelerate_datamodel".to_string(),
                permitted: true,
            })
            .unwrap();
        assert_eq!(out, "Capability accelerate_datamodel: granted\n");
    }

    #[test]
    fn test_apply_plan_output() {
        let out = TableFormatter
            .format_apply(&ApplyOutput {
                dry_run: true,
                edit_errors: vec![],
                plan: Some(ChangePlan {
                    whitelists: vec![WhitelistChange {
                        model: "Web".to_string(),
                        macro_name: "cim_Web_indexes".to_string(),
                        definition: "(index=web)".to_string(),
                    }],
                    ..ChangePlan::default()
                }),
                report: None,
            })
            .unwrap();
        assert_eq!(out, "Would update cim_Web_indexes: (index=web)\n");
    }

    #[test]
    fn test_apply_report_output() {
        let out = TableFormatter
            .format_apply(&ApplyOutput {
                dry_run: false,
                edit_errors: vec![],
                plan: None,
                report: Some(SaveReport {
                    items: vec![SaveItem {
                        model: "Web".to_string(),
                        kind: SaveKind::Acceleration,
                        outcome: SaveOutcome::Failed {
                            message: "boom".to_string(),
                        },
                    }],
                }),
            })
            .unwrap();
        assert!(out.contains("Web"));
        assert!(out.contains("acceleration"));
        assert!(out.contains("Failed: boom"));
    }

    #[test]
    fn test_api_key_output() {
        let out = TableFormatter
            .format_api_key(&ApiKeyOutput {
                operation: "show".to_string(),
                name: "relay".to_string(),
                realm: "cam_queue".to_string(),
                message: "Successfully retrieved API Key!".to_string(),
                key: Some("k".to_string()),
            })
            .unwrap();
        assert_eq!(out, "Successfully retrieved API Key!\nk\n");
    }
}
