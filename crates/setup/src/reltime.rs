//! Relative time strings used for summary and backfill ranges.
//!
//! Responsibilities:
//! - Check relative time strings against the grammar the acceleration
//!   settings accept (`-<int><unit>` or the `0` sentinel).
//! - Order two relative times by how far back they reach.
//!
//! Does NOT handle:
//! - Snapping (`@d`), absolute timestamps, or any time arithmetic.
//!
//! Invariants:
//! - `compare` is a total, antisymmetric order: equal raw strings are
//!   `Equal`, and two different strings are never `Equal`.
//! - `"0"` and `""` reach back the furthest (all time).
//! - Strings that do not parse count as "now" (magnitude zero).

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

static UNIT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-(\d+)(s|h|d|m|w|q|y)").expect("valid unit prefix regex"));

static GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(-\d+(s|seconds?|h|hours?|d|days?|mon|months?|y|yrs?|years?|w|weeks?|q|qtrs?|quarters?)|0)$",
    )
    .expect("valid relative time grammar regex")
});

/// Sentinel meaning "no lower bound".
pub const ALL_TIME: &str = "0";

/// Returns true when `raw` is `-<int><unit>` or the `0` sentinel.
///
/// The empty string is not grammatical; callers that treat it as "unset"
/// check for it first.
pub fn is_valid(raw: &str) -> bool {
    GRAMMAR.is_match(raw)
}

/// Returns true for the "all time" spellings.
pub fn is_unbounded(raw: &str) -> bool {
    raw.is_empty() || raw == ALL_TIME
}

/// Span in days covered by a single unit letter.
fn unit_weight(unit: &str) -> f64 {
    match unit {
        "s" => 1.0 / 86_400.0,
        "h" => 1.0 / 24.0,
        "d" => 1.0,
        "w" => 7.0,
        "m" => 30.0,
        "q" => 90.0,
        "y" => 365.0,
        _ => 0.0,
    }
}

/// Sort key: (span in days, unit weight).
fn sort_key(raw: &str) -> (f64, f64) {
    if is_unbounded(raw) {
        return (f64::INFINITY, f64::INFINITY);
    }
    match UNIT_PREFIX.captures(raw) {
        Some(caps) => {
            let count = caps[1].parse::<f64>().unwrap_or(0.0);
            let weight = unit_weight(&caps[2]);
            (count * weight, weight)
        }
        None => (0.0, 0.0),
    }
}

/// Approximate span of `raw` in days. Unbounded values are infinite.
pub fn span_days(raw: &str) -> f64 {
    sort_key(raw).0
}

/// Order two relative times. `Less` means `a` is more recent than `b`.
///
/// When spans tie (for example `-1d` and `-24h`), the finer unit sorts as
/// more recent; a remaining tie falls back to byte order of the raw strings.
pub fn compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let (span_a, weight_a) = sort_key(a);
    let (span_b, weight_b) = sort_key(b);
    span_a
        .total_cmp(&span_b)
        .then_with(|| weight_a.total_cmp(&weight_b))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_accepts_units() {
        for raw in [
            "0", "-1s", "-30seconds", "-2h", "-1hour", "-7d", "-3days", "-1mon", "-6months",
            "-1y", "-2yrs", "-5years", "-1w", "-2weeks", "-1q", "-3qtrs", "-2quarters",
        ] {
            assert!(is_valid(raw), "{raw} should be valid");
        }
    }

    #[test]
    fn test_grammar_rejects_garbage() {
        for raw in ["", "7d", "-d", "-1m", "-1min", "+1d", "-1d@d", "00", "-1.5d", "-1 d"] {
            assert!(!is_valid(raw), "{raw} should be invalid");
        }
    }

    #[test]
    fn test_compare_basic_ordering() {
        assert_eq!(compare("-7d", "-30d"), Ordering::Less);
        assert_eq!(compare("-1y", "-1mon"), Ordering::Greater);
        assert_eq!(compare("-1q", "-3mon"), Ordering::Greater);
        assert_eq!(compare("-2w", "-14d"), Ordering::Greater);
        assert_eq!(compare("-7d", "-7d"), Ordering::Equal);
    }

    #[test]
    fn test_equal_span_is_not_equal() {
        assert_ne!(compare("-1d", "-24h"), Ordering::Equal);
        assert_eq!(compare("-24h", "-1d"), Ordering::Less);
        assert_eq!(compare("-1d", "-24h"), Ordering::Greater);
    }

    #[test]
    fn test_unbounded_sorts_last() {
        assert_eq!(compare("0", "-100y"), Ordering::Greater);
        assert_eq!(compare("", "-100y"), Ordering::Greater);
        assert_eq!(compare("-1s", ""), Ordering::Less);
        assert_ne!(compare("", "0"), Ordering::Equal);
    }

    #[test]
    fn test_unparseable_counts_as_now() {
        assert_eq!(compare("garbage", "-1s"), Ordering::Less);
        assert_eq!(span_days("garbage"), 0.0);
    }

    #[test]
    fn test_month_spellings_share_weight() {
        assert_eq!(span_days("-2mon"), 60.0);
        assert_eq!(span_days("-2months"), 60.0);
        assert!(span_days("0").is_infinite());
    }
}
