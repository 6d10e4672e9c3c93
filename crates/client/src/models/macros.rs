//! Search macro models for `admin/macros`.
//!
//! Non-responsibilities:
//! - Does not interpret the definition (see the setup crate's whitelist codec).

use serde::{Deserialize, Serialize};

use crate::serde_helpers::bool_from_string_or_bool;

/// A search macro definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Macro {
    /// Macro name, e.g. `cim_Authentication_indexes`.
    #[serde(default)]
    pub name: String,
    /// The SPL snippet the macro expands to.
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "bool_from_string_or_bool")]
    pub disabled: bool,
}
