//! Segment clock.
//!
//! A count-up timer advanced by fixed-period ticks. After each tick the
//! elapsed time is floored to whole seconds and looked up in the
//! [`NotificationTable`]; a hit fires at most once per session, even when
//! several ticks floor to the same second.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::format::format_hms;
use super::table::NotificationTable;

/// A table entry reached by the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub key_secs: u64,
    /// `HH:MM:SS` rendering of `key_secs`.
    pub time_key: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct SegmentClock {
    period_ms: u64,
    elapsed_ms: u64,
    table: Arc<NotificationTable>,
    fired: HashSet<u64>,
}

impl SegmentClock {
    pub fn new(period: Duration, table: Arc<NotificationTable>) -> Self {
        Self {
            period_ms: (period.as_millis() as u64).max(1),
            elapsed_ms: 0,
            table,
            fired: HashSet::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Elapsed time at table granularity.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms / 1000
    }

    pub fn elapsed_display(&self) -> String {
        format_hms(self.elapsed_secs())
    }

    pub fn table(&self) -> &Arc<NotificationTable> {
        &self.table
    }

    pub fn has_fired(&self, key_secs: u64) -> bool {
        self.fired.contains(&key_secs)
    }

    pub fn fired_count(&self) -> usize {
        self.fired.len()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance by one period and fire the entry for the new second, if any.
    pub fn tick(&mut self) -> Option<Notification> {
        self.elapsed_ms += self.period_ms;
        self.poll()
    }

    /// Fire the entry for the current second if it has not fired yet.
    pub fn poll(&mut self) -> Option<Notification> {
        let key = self.elapsed_secs();
        let name = self.table.get(key)?;
        if !self.fired.insert(key) {
            return None;
        }
        Some(Notification {
            key_secs: key,
            time_key: format_hms(key),
            name: name.to_string(),
        })
    }

    /// Replace the table and start over.
    pub fn set_table(&mut self, table: Arc<NotificationTable>) {
        self.table = table;
        self.reset();
    }

    /// Clear elapsed time and the fired-key set.
    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
        self.fired.clear();
    }
}
