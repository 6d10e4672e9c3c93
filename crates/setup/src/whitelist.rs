//! Index whitelist macros.
//!
//! Each data model's index constraint lives in a search macro named
//! `cim_<DataModel>_indexes` whose definition is `(index=a OR index=b)`.
//! The setup form edits the list as a comma-separated string.
//!
//! Names that need quoting beyond `[\w\-*]` do not survive a round trip;
//! the decoder only recognizes bare or double-quoted simple names.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

static INDEX_TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"index\s*=\s*([\w\-*]+|"[\w\-*]+")"#).expect("valid index term regex")
});

const MACRO_PREFIX: &str = "cim_";
const MACRO_SUFFIX: &str = "_indexes";

/// Search filter selecting whitelist macros.
pub const MACRO_SEARCH_FILTER: &str = "name=cim_*_indexes";

/// Build a macro definition from index names. Empty names are skipped.
pub fn encode<S: AsRef<str>>(names: &[S]) -> String {
    let terms: Vec<String> = names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !name.is_empty())
        .map(|name| format!("index={name}"))
        .collect();
    format!("({})", terms.join(" OR "))
}

/// Extract the comma-joined index names from a macro definition.
pub fn decode(definition: &str) -> String {
    INDEX_TERM
        .captures_iter(definition)
        .map(|caps| {
            let name = &caps[1];
            name.strip_prefix('"')
                .and_then(|n| n.strip_suffix('"'))
                .unwrap_or(name)
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Split a display string into index names, trimming blanks.
pub fn split_display(display: &str) -> Vec<String> {
    display
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Macro name for a data model.
pub fn macro_name(model: &str) -> String {
    format!("{MACRO_PREFIX}{model}{MACRO_SUFFIX}")
}

/// Data model named by a whitelist macro, or `None` if the name is not one.
pub fn model_name(macro_name: &str) -> Option<&str> {
    let model = macro_name
        .strip_prefix(MACRO_PREFIX)?
        .strip_suffix(MACRO_SUFFIX)?;
    if model.is_empty() {
        warn!(macro_name, "Whitelist macro has no data model name");
        return None;
    }
    Some(model)
}

/// Human label for a data model name.
pub fn display_label(model: &str) -> String {
    model.replace('_', " ")
}

/// Short description of a whitelist for list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestrictionSummary {
    pub text: String,
    pub has_more: bool,
}

impl RestrictionSummary {
    /// Summarize a display string. Text longer than `max_display_count`
    /// characters is cut and flagged with `has_more`.
    pub fn new(display: &str, max_display_count: usize) -> Self {
        if display.is_empty() {
            return Self {
                text: "No restriction".to_string(),
                has_more: false,
            };
        }
        let has_more = display.chars().count() > max_display_count;
        let shown: String = display.chars().take(max_display_count).collect();
        Self {
            text: format!("Restricted to: {shown}"),
            has_more,
        }
    }
}
