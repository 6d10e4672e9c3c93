//! The setup session: load, edit, validate, and save.
//!
//! Responsibilities:
//! - Load every asset the form needs in one fail-fast pass.
//! - Hold one row per data model with its whitelist and acceleration bag,
//!   each next to the baseline it was loaded with.
//! - Compute change sets, persist them concurrently, and move baselines
//!   forward only for items that were saved.
//!
//! Does NOT handle:
//! - HTTP details (see [`crate::backend`]).
//! - Rendering (callers use [`RowView`]).
//!
//! Invariants:
//! - Rows are unique per data model. Rows with a whitelist macro come first,
//!   in macro order.
//! - A baseline only changes after a successful persist of that item.
//! - `save` takes `&mut self`, so two saves can never overlap.

use std::collections::HashSet;

use futures::future::{join, join_all};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use cim_client::{DataModelConfig, Macro};
use cim_config::SetupTarget;
use cim_config::constants::{DEFAULT_MAX_DISPLAY_COUNT, DEFAULT_REQUIRED_CAPABILITY};

use crate::acceleration::{
    AccelerationField, AccelerationSettings, AttributeBag, TAGS_WHITELIST_KEY, ValidationErrors,
    field_value, validate, value_text,
};
use crate::backend::SetupBackend;
use crate::boolean::{flag_value, normalize_boolean};
use crate::diff::{canonicalize_flag, changed_keys, has_changed};
use crate::error::{Result, SetupError};
use crate::version::{FeatureGate, SplunkVersion};
use crate::whitelist::{self, RestrictionSummary};

/// Session parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Capability required to open the form.
    pub capability: String,
    /// Restriction text length before truncation.
    pub max_display_count: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            capability: DEFAULT_REQUIRED_CAPABILITY.to_string(),
            max_display_count: DEFAULT_MAX_DISPLAY_COUNT,
        }
    }
}

impl From<&SetupTarget> for LoadOptions {
    fn from(target: &SetupTarget) -> Self {
        Self {
            capability: target.capability.clone(),
            max_display_count: target.max_display_count,
        }
    }
}

/// Outcome of the last save for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RowStatus {
    Saved,
    SaveFailed { message: String },
    Invalid { errors: ValidationErrors },
}

/// What a save item touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveKind {
    Whitelist,
    Acceleration,
}

/// Result of one save item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved,
    Failed { message: String },
    Invalid { errors: ValidationErrors },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveItem {
    pub model: String,
    pub kind: SaveKind,
    #[serde(flatten)]
    pub outcome: SaveOutcome,
}

/// Per-item results of a save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub items: Vec<SaveItem>,
}

impl SaveReport {
    /// True when nothing needed saving.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when every item was saved.
    pub fn is_success(&self) -> bool {
        self.items.iter().all(|i| i.outcome == SaveOutcome::Saved)
    }

    pub fn saved_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.outcome == SaveOutcome::Saved)
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SaveItem> {
        self.items
            .iter()
            .filter(|i| i.outcome != SaveOutcome::Saved)
    }
}

/// A pending whitelist macro update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhitelistChange {
    pub model: String,
    pub macro_name: String,
    pub definition: String,
}

/// A pending data model update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataModelChange {
    pub model: String,
    pub changed_keys: Vec<String>,
    pub params: Vec<(String, String)>,
}

/// A data model whose edits fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidChange {
    pub model: String,
    pub errors: ValidationErrors,
}

/// Everything a save would do, without doing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangePlan {
    pub whitelists: Vec<WhitelistChange>,
    pub datamodels: Vec<DataModelChange>,
    pub invalid: Vec<InvalidChange>,
}

impl ChangePlan {
    pub fn is_empty(&self) -> bool {
        self.whitelists.is_empty() && self.datamodels.is_empty() && self.invalid.is_empty()
    }
}

/// One acceleration control as shown on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub field: AccelerationField,
    pub label: &'static str,
    pub value: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Read-only snapshot of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub model: String,
    pub label: String,
    pub macro_name: Option<String>,
    pub whitelist: String,
    pub restriction: RestrictionSummary,
    pub selected: bool,
    pub dirty: bool,
    pub controls_enabled: bool,
    pub settings: Option<AccelerationSettings>,
    pub fields: Vec<FieldView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags_whitelist: Option<String>,
    pub errors: ValidationErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RowStatus>,
}

#[derive(Debug, Clone)]
struct Row {
    model: String,
    macro_name: Option<String>,
    saved_whitelist: String,
    whitelist: String,
    baseline: AttributeBag,
    attrs: AttributeBag,
    status: Option<RowStatus>,
}

impl Row {
    fn whitelist_changed(&self) -> bool {
        self.macro_name.is_some() && self.whitelist != self.saved_whitelist
    }

    fn acceleration_changed(&self) -> bool {
        has_changed(&self.baseline, &self.attrs)
    }

    fn controls_enabled(&self) -> bool {
        field_value(&self.attrs, AccelerationField::Enabled)
            .and_then(normalize_boolean)
            .unwrap_or(false)
    }

    /// Put the errored fields back to their baseline values.
    fn revert_fields(&mut self, errors: &ValidationErrors) {
        for field in errors.fields() {
            let key = field.wire_name();
            match self.baseline.get(key) {
                Some(value) => {
                    self.attrs.insert(key.to_string(), value.clone());
                }
                None => {
                    self.attrs.remove(key);
                }
            }
        }
    }
}

/// State of an open setup form.
#[derive(Debug, Clone)]
pub struct SetupSession {
    rows: Vec<Row>,
    selected: Option<usize>,
    index_names: Vec<String>,
    tag_names: Vec<String>,
    gate: FeatureGate,
    version: Option<SplunkVersion>,
    max_display_count: usize,
}

impl SetupSession {
    /// Check access, then fetch macros, indexes, data models and tags.
    ///
    /// Any fetch failure aborts the whole load. The first row is selected,
    /// which is the first macro that has a data model: a leading macro with
    /// no data model is dropped and never selected.
    pub async fn load<B>(backend: &B, options: LoadOptions) -> Result<Self>
    where
        B: SetupBackend + ?Sized,
    {
        let permitted = backend
            .has_capability(&options.capability)
            .await
            .map_err(|e| {
                warn!(error = %e, "Capability check failed");
                SetupError::load_failure(e)
            })?;
        if !permitted {
            warn!(capability = %options.capability, "Missing capability for setup");
            return Err(SetupError::PermissionDenied {
                capability: options.capability,
            });
        }

        let version = match backend.server_version().await {
            Ok(raw) => Some(SplunkVersion::parse(&raw)),
            Err(e) => {
                warn!(error = %e, "Could not read server version, assuming newest");
                None
            }
        };
        let gate = version
            .as_ref()
            .map(FeatureGate::for_version)
            .unwrap_or_default();

        let (macros, indexes, datamodels, tags) = futures::try_join!(
            backend.list_index_macros(),
            backend.list_indexes(),
            backend.list_datamodels(),
            backend.list_tags(),
        )
        .map_err(|e| {
            error!(error = %e, "Failed to load setup assets");
            SetupError::load_failure(e)
        })?;

        let rows = build_rows(macros, datamodels);
        debug!(rows = rows.len(), "Setup session loaded");

        Ok(Self {
            selected: if rows.is_empty() { None } else { Some(0) },
            rows,
            index_names: unique_names(indexes.into_iter().map(|i| i.name)),
            tag_names: unique_names(tags.into_iter().map(|t| t.name)),
            gate,
            version,
            max_display_count: options.max_display_count,
        })
    }

    /// Server version, when it could be read.
    pub fn version(&self) -> Option<&SplunkVersion> {
        self.version.as_ref()
    }

    pub fn feature_gate(&self) -> FeatureGate {
        self.gate
    }

    /// Index names for autocomplete.
    pub fn index_names(&self) -> &[String] {
        &self.index_names
    }

    /// Tag names for autocomplete.
    pub fn tag_names(&self) -> &[String] {
        &self.tag_names
    }

    /// Data model names, in row order.
    pub fn models(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.model.as_str()).collect()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|i| self.rows[i].model.as_str())
    }

    pub fn select(&mut self, model: &str) -> Result<()> {
        self.selected = Some(self.position(model)?);
        Ok(())
    }

    /// Snapshot of every row.
    pub fn rows(&self) -> Vec<RowView> {
        (0..self.rows.len()).map(|i| self.view(i)).collect()
    }

    pub fn row(&self, model: &str) -> Result<RowView> {
        Ok(self.view(self.position(model)?))
    }

    /// Current acceleration attributes of a data model.
    pub fn attributes(&self, model: &str) -> Result<&AttributeBag> {
        Ok(&self.rows[self.position(model)?].attrs)
    }

    /// Replace a row's index whitelist with a comma-separated list.
    pub fn set_whitelist(&mut self, model: &str, display: &str) -> Result<()> {
        let row = self.row_mut(model)?;
        if row.macro_name.is_none() {
            return Err(SetupError::UnknownItem(format!(
                "no whitelist macro for data model '{model}'"
            )));
        }
        row.whitelist = whitelist::split_display(display).join(",");
        Ok(())
    }

    /// Set one acceleration attribute and return the live validation result.
    pub fn set_field(
        &mut self,
        model: &str,
        field: AccelerationField,
        value: Value,
    ) -> Result<ValidationErrors> {
        if !self.gate.allows(field) {
            return Err(SetupError::UnknownItem(format!(
                "{} is not available on this Splunk version",
                field.label()
            )));
        }
        let row = self.row_mut(model)?;
        row.attrs.insert(field.wire_name().to_string(), value);
        Ok(validate(&row.attrs))
    }

    pub fn set_tags_whitelist(&mut self, model: &str, tags: &str) -> Result<()> {
        if !self.gate.tags_whitelist {
            return Err(SetupError::UnknownItem(
                "tags whitelist is not available on this Splunk version".to_string(),
            ));
        }
        let row = self.row_mut(model)?;
        let joined = whitelist::split_display(tags).join(",");
        row.attrs
            .insert(TAGS_WHITELIST_KEY.to_string(), Value::String(joined));
        Ok(())
    }

    /// Live validation errors for a row.
    pub fn errors(&self, model: &str) -> Result<ValidationErrors> {
        Ok(validate(&self.rows[self.position(model)?].attrs))
    }

    /// Whether the row's sub-controls are editable.
    pub fn controls_enabled(&self, model: &str) -> Result<bool> {
        Ok(self.rows[self.position(model)?].controls_enabled())
    }

    /// True when any row has unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.rows
            .iter()
            .any(|r| r.whitelist_changed() || r.acceleration_changed())
    }

    /// Drop every unsaved edit.
    pub fn discard_changes(&mut self) {
        for row in &mut self.rows {
            row.whitelist = row.saved_whitelist.clone();
            row.attrs = row.baseline.clone();
        }
    }

    /// What `save` would do right now.
    pub fn plan(&self) -> ChangePlan {
        let mut plan = ChangePlan::default();
        for row in &self.rows {
            if let (true, Some(macro_name)) = (row.whitelist_changed(), &row.macro_name) {
                plan.whitelists.push(WhitelistChange {
                    model: row.model.clone(),
                    macro_name: macro_name.clone(),
                    definition: whitelist::encode(&whitelist::split_display(&row.whitelist)),
                });
            }
            if !row.acceleration_changed() {
                continue;
            }
            let errors = validate(&row.attrs);
            if errors.is_empty() {
                plan.datamodels.push(DataModelChange {
                    model: row.model.clone(),
                    changed_keys: changed_keys(&row.baseline, &row.attrs),
                    params: persist_params(&row.attrs, self.gate),
                });
            } else {
                plan.invalid.push(InvalidChange {
                    model: row.model.clone(),
                    errors,
                });
            }
        }
        plan
    }

    /// Persist every pending change.
    ///
    /// Invalid data models are not sent; their errored fields are put back
    /// to the baseline while their other edits stay pending. All requests
    /// run concurrently and every one is awaited.
    pub async fn save<B>(&mut self, backend: &B) -> SaveReport
    where
        B: SetupBackend + ?Sized,
    {
        let plan = self.plan();
        let mut report = SaveReport::default();
        for row in &mut self.rows {
            row.status = None;
        }

        for invalid in &plan.invalid {
            warn!(model = %invalid.model, errors = invalid.errors.len(), "Data model settings invalid, not saved");
            if let Some(row) = self.rows.iter_mut().find(|r| r.model == invalid.model) {
                row.revert_fields(&invalid.errors);
            }
            report.items.push(SaveItem {
                model: invalid.model.clone(),
                kind: SaveKind::Acceleration,
                outcome: SaveOutcome::Invalid {
                    errors: invalid.errors.clone(),
                },
            });
        }

        let macro_saves = plan
            .whitelists
            .iter()
            .map(|c| backend.update_macro(&c.macro_name, &c.definition));
        let model_saves = plan
            .datamodels
            .iter()
            .map(|c| backend.update_datamodel(&c.model, &c.params));
        let (macro_results, model_results) =
            join(join_all(macro_saves), join_all(model_saves)).await;

        for (change, result) in plan.whitelists.iter().zip(macro_results) {
            let outcome = match result {
                Ok(()) => {
                    info!(macro_name = %change.macro_name, "Saved index whitelist");
                    if let Some(row) = self.rows.iter_mut().find(|r| r.model == change.model) {
                        row.saved_whitelist = row.whitelist.clone();
                    }
                    SaveOutcome::Saved
                }
                Err(e) => {
                    error!(macro_name = %change.macro_name, error = %e, "Failed to save index whitelist");
                    SaveOutcome::Failed {
                        message: e.to_string(),
                    }
                }
            };
            report.items.push(SaveItem {
                model: change.model.clone(),
                kind: SaveKind::Whitelist,
                outcome,
            });
        }

        for (change, result) in plan.datamodels.iter().zip(model_results) {
            let outcome = match result {
                Ok(()) => {
                    info!(model = %change.model, "Saved acceleration settings");
                    if let Some(row) = self.rows.iter_mut().find(|r| r.model == change.model) {
                        row.baseline = row.attrs.clone();
                    }
                    SaveOutcome::Saved
                }
                Err(e) => {
                    error!(model = %change.model, error = %e, "Failed to save acceleration settings");
                    SaveOutcome::Failed {
                        message: e.to_string(),
                    }
                }
            };
            report.items.push(SaveItem {
                model: change.model.clone(),
                kind: SaveKind::Acceleration,
                outcome,
            });
        }

        self.apply_statuses(&report);
        report
    }

    fn apply_statuses(&mut self, report: &SaveReport) {
        for row in &mut self.rows {
            let mut status = None;
            for item in report.items.iter().filter(|i| i.model == row.model) {
                status = Some(match (&item.outcome, status) {
                    (_, Some(RowStatus::SaveFailed { message })) => RowStatus::SaveFailed { message },
                    (SaveOutcome::Failed { message }, _) => RowStatus::SaveFailed {
                        message: message.clone(),
                    },
                    (_, Some(invalid @ RowStatus::Invalid { .. })) => invalid,
                    (SaveOutcome::Invalid { errors }, _) => RowStatus::Invalid {
                        errors: errors.clone(),
                    },
                    (SaveOutcome::Saved, _) => RowStatus::Saved,
                });
            }
            row.status = status;
        }
    }

    fn position(&self, model: &str) -> Result<usize> {
        self.rows
            .iter()
            .position(|r| r.model == model)
            .ok_or_else(|| SetupError::UnknownItem(format!("data model '{model}'")))
    }

    fn row_mut(&mut self, model: &str) -> Result<&mut Row> {
        let index = self.position(model)?;
        Ok(&mut self.rows[index])
    }

    fn view(&self, index: usize) -> RowView {
        let row = &self.rows[index];
        let errors = validate(&row.attrs);
        let controls_enabled = row.controls_enabled();
        let fields = self
            .gate
            .fields()
            .into_iter()
            .map(|field| FieldView {
                field,
                label: field.label(),
                value: value_text(field_value(&row.attrs, field)),
                enabled: field == AccelerationField::Enabled || controls_enabled,
                error: errors.get(field).map(str::to_string),
            })
            .collect();
        RowView {
            model: row.model.clone(),
            label: whitelist::display_label(&row.model),
            macro_name: row.macro_name.clone(),
            whitelist: row.whitelist.clone(),
            restriction: RestrictionSummary::new(&row.whitelist, self.max_display_count),
            selected: self.selected == Some(index),
            dirty: row.whitelist_changed() || row.acceleration_changed(),
            controls_enabled,
            settings: AccelerationSettings::from_bag(&row.attrs).ok(),
            fields,
            tags_whitelist: self
                .gate
                .tags_whitelist
                .then(|| value_text(row.attrs.get(TAGS_WHITELIST_KEY))),
            errors,
            status: row.status.clone(),
        }
    }
}

/// Pair whitelist macros with data models.
fn build_rows(macros: Vec<Macro>, datamodels: Vec<DataModelConfig>) -> Vec<Row> {
    let mut models: Vec<Option<DataModelConfig>> = datamodels.into_iter().map(Some).collect();
    let mut rows = Vec::with_capacity(models.len());

    for m in macros {
        let Some(model) = whitelist::model_name(&m.name).map(str::to_string) else {
            continue;
        };
        let slot = models
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|dm| dm.name == model));
        match slot.and_then(Option::take) {
            Some(dm) => {
                let display = whitelist::decode(&m.definition);
                rows.push(new_row(dm, Some(m.name), display));
            }
            None if rows.iter().any(|r: &Row| r.model == model) => {
                debug!(macro_name = %m.name, "Duplicate whitelist macro skipped");
            }
            None => {
                warn!(macro_name = %m.name, "Whitelist macro has no matching data model");
            }
        }
    }

    rows.extend(
        models
            .into_iter()
            .flatten()
            .map(|dm| new_row(dm, None, String::new())),
    );
    rows
}

fn new_row(dm: DataModelConfig, macro_name: Option<String>, display: String) -> Row {
    let mut attrs = dm.content;
    match attrs.get(AccelerationField::ManualRebuilds.wire_name()) {
        None | Some(Value::Null) => {
            attrs.insert(
                AccelerationField::ManualRebuilds.wire_name().to_string(),
                flag_value(false),
            );
        }
        Some(_) => canonicalize_flag(&mut attrs, AccelerationField::ManualRebuilds),
    }
    Row {
        model: dm.name,
        macro_name,
        saved_whitelist: display.clone(),
        whitelist: display,
        baseline: attrs.clone(),
        attrs,
        status: None,
    }
}

/// Form parameters for a data model update.
///
/// Only editable keys present in the bag are sent. Flags go out as `1`/`0`.
fn persist_params(attrs: &AttributeBag, gate: FeatureGate) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = gate
        .fields()
        .into_iter()
        .filter_map(|field| {
            let value = field_value(attrs, field)?;
            let text = match (field.is_boolean(), normalize_boolean(value)) {
                (true, Some(flag)) => String::from(if flag { "1" } else { "0" }),
                _ => value_text(Some(value)),
            };
            Some((field.wire_name().to_string(), text))
        })
        .collect();
    if gate.tags_whitelist
        && let Some(tags) = attrs.get(TAGS_WHITELIST_KEY)
    {
        params.push((TAGS_WHITELIST_KEY.to_string(), value_text(Some(tags))));
    }
    params
}

fn unique_names(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names.filter(|n| seen.insert(n.clone())).collect()
}
