//! Index models for `data/indexes`.

use serde::{Deserialize, Serialize};

use crate::serde_helpers::{bool_from_string_or_bool, opt_u64_from_string_or_number};

/// A Splunk index, reduced to what index pickers need.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Index {
    #[serde(default)]
    pub name: String,
    /// `event` or `metric`.
    #[serde(default)]
    pub datatype: Option<String>,
    #[serde(default, deserialize_with = "bool_from_string_or_bool")]
    pub disabled: bool,
    #[serde(
        rename = "totalEventCount",
        default,
        deserialize_with = "opt_u64_from_string_or_number"
    )]
    pub total_event_count: Option<u64>,
}
