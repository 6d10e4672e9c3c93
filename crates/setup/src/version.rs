//! Splunk version parsing and feature gating.
//!
//! Some acceleration attributes only exist on newer Splunk releases. The
//! setup flow hides them (and rejects edits to them) on older servers.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::acceleration::AccelerationField;

/// Dotted numeric version. Missing or non-numeric components count as 0.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct SplunkVersion(Vec<u64>);

impl SplunkVersion {
    pub fn new(parts: &[u64]) -> Self {
        Self(parts.to_vec())
    }

    /// Parse `9.1.2`, `6.6`, or `8.2.0-beta`. Trailing junk on a component
    /// is ignored after its leading digits.
    pub fn parse(raw: &str) -> Self {
        let parts = raw
            .trim()
            .split('.')
            .map(|part| {
                let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
                digits.parse::<u64>().unwrap_or(0)
            })
            .collect();
        Self(parts)
    }

    fn component(&self, index: usize) -> u64 {
        self.0.get(index).copied().unwrap_or(0)
    }
}

impl Ord for SplunkVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialEq for SplunkVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for SplunkVersion {}

impl PartialOrd for SplunkVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SplunkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u64::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

/// Which version-dependent settings the connected server supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureGate {
    pub schedule_priority: bool,
    pub poll_buckets_until_maxtime: bool,
    pub tags_whitelist: bool,
}

impl FeatureGate {
    /// Everything on. Used when the server version is unknown.
    pub fn newest() -> Self {
        Self {
            schedule_priority: true,
            poll_buckets_until_maxtime: true,
            tags_whitelist: true,
        }
    }

    pub fn for_version(version: &SplunkVersion) -> Self {
        Self {
            schedule_priority: *version >= SplunkVersion::new(&[6, 5]),
            poll_buckets_until_maxtime: *version >= SplunkVersion::new(&[6, 6]),
            tags_whitelist: *version >= SplunkVersion::new(&[6, 6, 4]),
        }
    }

    /// Whether `field` is configurable on this server.
    pub fn allows(&self, field: AccelerationField) -> bool {
        match field {
            AccelerationField::SchedulePriority => self.schedule_priority,
            AccelerationField::PollBucketsUntilMaxtime => self.poll_buckets_until_maxtime,
            _ => true,
        }
    }

    /// Configurable acceleration fields, in form order.
    pub fn fields(&self) -> Vec<AccelerationField> {
        AccelerationField::ALL
            .into_iter()
            .filter(|f| self.allows(*f))
            .collect()
    }
}

impl Default for FeatureGate {
    fn default() -> Self {
        Self::newest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_order() {
        assert_eq!(SplunkVersion::parse("9.1.2"), SplunkVersion::new(&[9, 1, 2]));
        assert_eq!(SplunkVersion::parse("8.2.0-beta").to_string(), "8.2.0");
        assert_eq!(SplunkVersion::parse("6.6"), SplunkVersion::parse("6.6.0"));
        assert!(SplunkVersion::parse("6.10") > SplunkVersion::parse("6.9.9"));
        assert!(SplunkVersion::parse("") < SplunkVersion::parse("0.0.1"));
    }

    #[test]
    fn test_gates_by_version() {
        let old = FeatureGate::for_version(&SplunkVersion::parse("6.4.9"));
        assert_eq!(
            old,
            FeatureGate { schedule_priority: false, poll_buckets_until_maxtime: false, tags_whitelist: false }
        );
        let mid = FeatureGate::for_version(&SplunkVersion::parse("6.6.3"));
        assert!(mid.schedule_priority && mid.poll_buckets_until_maxtime && !mid.tags_whitelist);
        assert_eq!(FeatureGate::for_version(&SplunkVersion::parse("6.6.4")), FeatureGate::newest());
    }

    #[test]
    fn test_fields_filtered() {
        let old = FeatureGate::for_version(&SplunkVersion::parse("6.0"));
        assert_eq!(old.fields().len(), 6);
        assert!(!old.allows(AccelerationField::SchedulePriority));
        assert_eq!(FeatureGate::newest().fields().len(), 8);
    }
}
