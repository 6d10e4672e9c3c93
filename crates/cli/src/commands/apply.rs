//! `apply`: apply an edit file to the setup form and save it.
//!
//! Responsibilities:
//! - Parse the edit file (data model name to edits).
//! - Apply edits through the setup session, collecting live validation errors.
//! - Save, or with `--dry-run` print the change sets instead.
//!
//! Edit file shape:
//!
//! ```json
//! {
//!   "Authentication": {
//!     "indexes": ["main", "security"],
//!     "tags_whitelist": "authentication",
//!     "enabled": true,
//!     "earliest_time": "-1mon",
//!     "max_time": 3600
//!   }
//! }
//! ```
//!
//! `indexes` may also be a comma-separated string. Any other key names an
//! acceleration field, either short (`max_time`) or wire (`acceleration.max_time`).

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use cim_config::Config;
use cim_setup::{AccelerationField, InvalidChange, LoadOptions, SetupError, SetupSession};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::SaveIncomplete;
use crate::formatters::{ApplyOutput, OutputFormat, get_formatter, output_result};

/// Index list given either as names or as the form's display string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum IndexList {
    Names(Vec<String>),
    Display(String),
}

impl IndexList {
    fn display(&self) -> String {
        match self {
            IndexList::Names(names) => names.join(","),
            IndexList::Display(s) => s.clone(),
        }
    }
}

/// Edits for one data model.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModelEdits {
    #[serde(default)]
    pub indexes: Option<IndexList>,
    #[serde(default)]
    pub tags_whitelist: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Read and parse an edit file.
pub fn read_edits(path: &Path) -> Result<BTreeMap<String, ModelEdits>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read edit file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse edit file {}", path.display()))
}

/// Apply edits to the session. Returns the live validation errors per model.
pub fn apply_edits(
    session: &mut SetupSession,
    edits: &BTreeMap<String, ModelEdits>,
) -> Result<Vec<InvalidChange>> {
    let mut invalid = Vec::new();

    for (model, edit) in edits {
        if let Some(ref indexes) = edit.indexes {
            session.set_whitelist(model, &indexes.display())?;
        }
        if let Some(ref tags) = edit.tags_whitelist {
            session.set_tags_whitelist(model, tags)?;
        }

        let mut errors = None;
        for (key, value) in &edit.fields {
            let field: AccelerationField = key
                .parse()
                .map_err(|e| SetupError::UnknownItem(format!("{model}: {e}")))?;
            errors = Some(session.set_field(model, field, value.clone())?);
        }

        if let Some(errors) = errors
            && !errors.is_empty()
        {
            warn!(model = %model, errors = errors.len(), "Edits fail validation");
            invalid.push(InvalidChange {
                model: model.clone(),
                errors,
            });
        }
    }

    Ok(invalid)
}

pub async fn run(
    config: Config,
    file: &Path,
    dry_run: bool,
    output_format: &str,
    output_file: Option<std::path::PathBuf>,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let edits = read_edits(file)?;
    let backend = super::build_backend(&config)?;

    let mut session = SetupSession::load(&backend, LoadOptions::from(&config.setup)).await?;
    let edit_errors = apply_edits(&mut session, &edits)?;

    let mut apply = ApplyOutput {
        dry_run,
        edit_errors,
        plan: None,
        report: None,
    };

    let outcome = if dry_run {
        let plan = session.plan();
        let rejected = plan.invalid.len();
        let total = rejected + plan.whitelists.len() + plan.datamodels.len();
        apply.plan = Some(plan);
        (rejected, total)
    } else {
        let report = session.save(&backend).await;
        let failed = report.failures().count();
        info!(
            saved = report.saved_count(),
            failed, "Applied setup changes"
        );
        let total = report.items.len();
        apply.report = Some(report);
        (failed, total)
    };

    let output = get_formatter(format).format_apply(&apply)?;
    output_result(&output, format, output_file.as_ref())?;

    match outcome {
        (0, _) => Ok(()),
        (failed, total) => Err(SaveIncomplete { failed, total }.into()),
    }
}
