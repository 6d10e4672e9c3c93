//! Data model acceleration settings: field catalogue, validation, typed view.
//!
//! Responsibilities:
//! - Name the editable acceleration attributes and map them to wire keys.
//! - Validate a raw attribute bag the way the setup form does.
//! - Derive a typed [`AccelerationSettings`] from a bag that passed validation.
//!
//! Does NOT handle:
//! - Change detection (see [`crate::diff`]).
//! - Deciding which fields a given Splunk version exposes (see [`crate::version`]).
//!
//! Invariants:
//! - Validation never fails with `Err`; problems are returned as data.
//! - `acceleration` itself is always checked. Everything else is checked only
//!   while acceleration is enabled.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::boolean::normalize_boolean;
use crate::reltime;

/// Raw data model content as returned by `data/models`.
pub type AttributeBag = Map<String, Value>;

/// Wire key of the tag whitelist attribute.
pub const TAGS_WHITELIST_KEY: &str = "tags_whitelist";

/// Provenance attributes Splunk adds to every entity.
pub const PROVENANCE_KEYS: [&str; 2] = ["eai:appName", "eai:userName"];

/// An editable acceleration attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccelerationField {
    Enabled,
    EarliestTime,
    BackfillTime,
    MaxTime,
    MaxConcurrent,
    ManualRebuilds,
    SchedulePriority,
    PollBucketsUntilMaxtime,
}

impl AccelerationField {
    /// Every field, in form order.
    pub const ALL: [AccelerationField; 8] = [
        Self::Enabled,
        Self::EarliestTime,
        Self::BackfillTime,
        Self::MaxTime,
        Self::MaxConcurrent,
        Self::ManualRebuilds,
        Self::SchedulePriority,
        Self::PollBucketsUntilMaxtime,
    ];

    /// Attribute key used on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Enabled => "acceleration",
            Self::EarliestTime => "acceleration.earliest_time",
            Self::BackfillTime => "acceleration.backfill_time",
            Self::MaxTime => "acceleration.max_time",
            Self::MaxConcurrent => "acceleration.max_concurrent",
            Self::ManualRebuilds => "acceleration.manual_rebuilds",
            Self::SchedulePriority => "acceleration.schedule_priority",
            Self::PollBucketsUntilMaxtime => "acceleration.poll_buckets_until_maxtime",
        }
    }

    /// Short snake_case name, as used in edit files.
    pub fn key(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::EarliestTime => "earliest_time",
            Self::BackfillTime => "backfill_time",
            Self::MaxTime => "max_time",
            Self::MaxConcurrent => "max_concurrent",
            Self::ManualRebuilds => "manual_rebuilds",
            Self::SchedulePriority => "schedule_priority",
            Self::PollBucketsUntilMaxtime => "poll_buckets_until_maxtime",
        }
    }

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Enabled => "Accelerate",
            Self::EarliestTime => "Summary Range",
            Self::BackfillTime => "Backfill Range",
            Self::MaxTime => "Max Summarization Search Time",
            Self::MaxConcurrent => "Max Concurrent Summarization Searches",
            Self::ManualRebuilds => "Manual rebuilds",
            Self::SchedulePriority => "Schedule priority",
            Self::PollBucketsUntilMaxtime => "Accelerate until maximum time",
        }
    }

    /// Whether the field holds a Splunk boolean.
    pub fn is_boolean(self) -> bool {
        matches!(
            self,
            Self::Enabled | Self::ManualRebuilds | Self::PollBucketsUntilMaxtime
        )
    }

    /// Look a field up by its wire key.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }
}

impl fmt::Display for AccelerationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a field name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown acceleration field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for AccelerationField {
    type Err = UnknownField;

    /// Accepts the short key (`max_time`) or the wire key (`acceleration.max_time`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .or_else(|| Self::from_wire_name(s))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Per-field validation messages. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<AccelerationField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: AccelerationField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: AccelerationField) -> bool {
        self.0.contains_key(&field)
    }

    /// Record `message` for `field`, replacing any earlier message.
    pub fn insert(&mut self, field: AccelerationField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = AccelerationField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AccelerationField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Summarization search priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulePriority {
    Default,
    Higher,
    Highest,
}

impl SchedulePriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Higher => "higher",
            Self::Highest => "highest",
        }
    }
}

impl FromStr for SchedulePriority {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "higher" => Ok(Self::Higher),
            "highest" => Ok(Self::Highest),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Read a field from the bag.
pub fn field_value(attrs: &AttributeBag, field: AccelerationField) -> Option<&Value> {
    attrs.get(field.wire_name())
}

/// Text form of an attribute value. Absent and `null` read as empty.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Parse an integer the way the form does: unset or blank counts as 0,
/// numeric text and JSON numbers are accepted when they carry no fraction.
pub fn integer_value(value: Option<&Value>) -> Option<i64> {
    let number = match value {
        None | Some(Value::Null) => return Some(0),
        Some(Value::Bool(b)) => return Some(i64::from(*b)),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            n.as_f64()?
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Some(0);
            }
            trimmed.parse::<f64>().ok()?
        }
        Some(Value::Array(_) | Value::Object(_)) => return None,
    };
    if number.is_finite() && number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        Some(number as i64)
    } else {
        None
    }
}

/// Validate the acceleration attributes of one data model.
pub fn validate(attrs: &AttributeBag) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let enabled = match field_value(attrs, AccelerationField::Enabled).and_then(normalize_boolean) {
        Some(enabled) => enabled,
        None => {
            errors.insert(AccelerationField::Enabled, "Enabled should be boolean");
            return errors;
        }
    };
    if !enabled {
        return errors;
    }

    let earliest = value_text(field_value(attrs, AccelerationField::EarliestTime));
    let mut backfill = value_text(field_value(attrs, AccelerationField::BackfillTime));
    if backfill.is_empty() {
        backfill = earliest.clone();
    }

    if !earliest.is_empty() && !reltime::is_valid(&earliest) {
        errors.insert(AccelerationField::EarliestTime, "Invalid Summary Range");
    }
    if !backfill.is_empty() && !reltime::is_valid(&backfill) {
        errors.insert(AccelerationField::BackfillTime, "Invalid Backfill Range");
    }
    // Spans only: equal spans spelled differently are not "older".
    if reltime::span_days(&backfill) > reltime::span_days(&earliest) {
        errors.insert(
            AccelerationField::BackfillTime,
            "Backfill Range should be more recent than Summary Range",
        );
    }

    if integer_value(field_value(attrs, AccelerationField::MaxTime)).is_none() {
        errors.insert(AccelerationField::MaxTime, "max_time should be an integer");
    }
    if integer_value(field_value(attrs, AccelerationField::MaxConcurrent)).is_none() {
        errors.insert(
            AccelerationField::MaxConcurrent,
            "max_concurrent should be an integer",
        );
    }

    let manual_rebuilds = field_value(attrs, AccelerationField::ManualRebuilds);
    if manual_rebuilds.is_some_and(|v| normalize_boolean(v).is_none()) {
        errors.insert(
            AccelerationField::ManualRebuilds,
            "manual_rebuilds should be boolean",
        );
    }

    let priority = value_text(field_value(attrs, AccelerationField::SchedulePriority));
    if !priority.is_empty() && priority.parse::<SchedulePriority>().is_err() {
        errors.insert(
            AccelerationField::SchedulePriority,
            "schedule_priority should be one of default, higher or highest",
        );
    }

    let poll = field_value(attrs, AccelerationField::PollBucketsUntilMaxtime);
    if poll.is_some_and(|v| !v.is_null() && normalize_boolean(v).is_none()) {
        errors.insert(
            AccelerationField::PollBucketsUntilMaxtime,
            "poll_buckets_until_maxtime should be boolean",
        );
    }

    errors
}

/// Typed view of a valid acceleration bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccelerationSettings {
    pub enabled: bool,
    pub earliest_time: String,
    pub backfill_time: String,
    pub max_time: i64,
    pub max_concurrent: i64,
    pub manual_rebuilds: bool,
    pub schedule_priority: Option<SchedulePriority>,
    pub poll_buckets_until_maxtime: Option<bool>,
}

impl AccelerationSettings {
    /// Build the typed view, or return the validation errors that prevent it.
    ///
    /// A disabled bag is not checked past `acceleration`, so unparseable
    /// sub-settings fall back to their zero values.
    pub fn from_bag(attrs: &AttributeBag) -> Result<Self, ValidationErrors> {
        let errors = validate(attrs);
        if !errors.is_empty() {
            return Err(errors);
        }
        let get = |field| field_value(attrs, field);
        Ok(Self {
            enabled: get(AccelerationField::Enabled)
                .and_then(normalize_boolean)
                .unwrap_or(false),
            earliest_time: value_text(get(AccelerationField::EarliestTime)),
            backfill_time: value_text(get(AccelerationField::BackfillTime)),
            max_time: integer_value(get(AccelerationField::MaxTime)).unwrap_or(0),
            max_concurrent: integer_value(get(AccelerationField::MaxConcurrent)).unwrap_or(0),
            manual_rebuilds: get(AccelerationField::ManualRebuilds)
                .and_then(normalize_boolean)
                .unwrap_or(false),
            schedule_priority: value_text(get(AccelerationField::SchedulePriority))
                .parse()
                .ok(),
            poll_buckets_until_maxtime: get(AccelerationField::PollBucketsUntilMaxtime)
                .and_then(normalize_boolean),
        })
    }
}
