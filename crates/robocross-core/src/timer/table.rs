use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::format::format_hms;
use crate::error::BuildError;
use crate::routine::Segment;

/// Label of the sentinel entry recorded after the last segment.
pub const END_OF_WORKOUT: &str = "end of workout";

/// Absolute elapsed second -> notification name.
///
/// Keys are strictly increasing; the last entry is the end-of-workout
/// sentinel. Built once per routine and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTable {
    entries: BTreeMap<u64, String>,
}

impl NotificationTable {
    /// Walk the segments accumulating their durations: each segment is keyed
    /// by the total before it, and the grand total maps to `end_label`.
    ///
    /// A zero-length segment would give two entries the same key, which is
    /// rejected as [`BuildError::InvalidParameters`].
    pub fn from_segments(segments: &[Segment], end_label: &str) -> Result<Self, BuildError> {
        let mut entries = BTreeMap::new();
        let mut total: u64 = 0;
        let mut last_key: Option<u64> = None;

        let keyed = segments
            .iter()
            .map(|s| (s.name.as_str(), u64::from(s.duration_secs)))
            .chain(std::iter::once((end_label, 0)));

        for (name, duration) in keyed {
            if last_key.is_some_and(|last| total <= last) {
                return Err(BuildError::InvalidParameters(format!(
                    "notification at {} for '{name}' does not follow the previous one",
                    format_hms(total)
                )));
            }
            entries.insert(total, name.to_string());
            last_key = Some(total);
            total += duration;
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key_secs: u64) -> Option<&str> {
        self.entries.get(&key_secs).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key of the end-of-workout entry.
    pub fn total_secs(&self) -> u64 {
        self.entries.keys().next_back().copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}
