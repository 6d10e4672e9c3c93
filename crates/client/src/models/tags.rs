//! Tag models for `search/tags`.

use serde::{Deserialize, Serialize};

/// A search-time tag. Only the name is used; field/value pairs are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Tag {
    #[serde(default)]
    pub name: String,
}
