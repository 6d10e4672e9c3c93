//! Entry-name merging helpers for Splunk list endpoints.
//!
//! Responsibilities:
//! - Splunk list endpoints return the resource name at `entry[].name`, not inside `entry[].content`.
//! - Copy `entry.name` into the deserialized content model.
//!
//! Invariants / assumptions:
//! - This is crate-internal glue; it is not part of the public API contract.

use crate::models::{DataModelConfig, Entry, Index, Macro, StoredPassword, Tag};

pub(crate) trait HasName {
    fn set_name(&mut self, name: String);
}

pub(crate) fn attach_entry_name<T: HasName>(entry_name: String, mut content: T) -> T {
    content.set_name(entry_name);
    content
}

/// Flatten a list response into named models.
pub(crate) fn named_entries<T: HasName>(entries: Vec<Entry<T>>) -> Vec<T> {
    entries
        .into_iter()
        .map(|e| attach_entry_name(e.name, e.content))
        .collect()
}

macro_rules! impl_has_name {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HasName for $ty {
                fn set_name(&mut self, name: String) {
                    self.name = name;
                }
            }
        )*
    };
}

impl_has_name!(Macro, DataModelConfig, Index, Tag, StoredPassword);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_entry_name_overrides_content_name() {
        let tag = Tag {
            name: "stale".to_string(),
        };
        assert_eq!(attach_entry_name("authentication".to_string(), tag).name, "authentication");
    }

    #[test]
    fn test_named_entries_preserves_order() {
        let entries = vec![
            Entry {
                name: "b".to_string(),
                content: Index::default(),
                acl: None,
            },
            Entry {
                name: "a".to_string(),
                content: Index::default(),
                acl: None,
            },
        ];
        let names: Vec<String> = named_entries(entries).into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
