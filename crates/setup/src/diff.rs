//! Change detection for data model attribute bags.

use crate::acceleration::{AccelerationField, AttributeBag, PROVENANCE_KEYS};
use crate::boolean::{flag_value, normalize_boolean};

/// Boolean attributes whose spelling varies between reads and writes.
const CANONICAL_FLAGS: [AccelerationField; 2] =
    [AccelerationField::Enabled, AccelerationField::ManualRebuilds];

/// Copy of `attrs` with provenance removed and flags canonicalized.
///
/// Flags that do not normalize are kept as they are.
pub fn comparable(attrs: &AttributeBag) -> AttributeBag {
    let mut out = attrs.clone();
    for key in PROVENANCE_KEYS {
        out.remove(key);
    }
    for field in CANONICAL_FLAGS {
        canonicalize_flag(&mut out, field);
    }
    out
}

/// Rewrite one boolean attribute to `1`/`0` when it normalizes.
pub fn canonicalize_flag(attrs: &mut AttributeBag, field: AccelerationField) {
    if let Some(value) = attrs.get_mut(field.wire_name())
        && let Some(flag) = normalize_boolean(value)
    {
        *value = flag_value(flag);
    }
}

/// True when `current` differs from `previous` in anything but provenance
/// and flag spelling.
pub fn has_changed(previous: &AttributeBag, current: &AttributeBag) -> bool {
    comparable(previous) != comparable(current)
}

/// Wire keys whose values differ between the two bags (after normalization).
pub fn changed_keys(previous: &AttributeBag, current: &AttributeBag) -> Vec<String> {
    let previous = comparable(previous);
    let current = comparable(current);
    let mut keys: Vec<String> = current
        .iter()
        .filter(|(k, v)| previous.get(k.as_str()) != Some(*v))
        .map(|(k, _)| k.clone())
        .collect();
    keys.extend(
        previous
            .keys()
            .filter(|k| !current.contains_key(k.as_str()))
            .cloned(),
    );
    keys
}
