//! Timing records and their trace event encoding.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Category written for every event.
pub const EVENT_CATEGORY: &str = "function";

/// Phase of a complete event (start timestamp plus duration).
pub const COMPLETE_PHASE: &str = "X";

/// A single completed timing measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingRecord {
    /// Name of the measured region.
    pub label: String,
    /// Start time in microseconds.
    pub start_ticks: u64,
    /// End time in microseconds, never before `start_ticks`.
    pub end_ticks: u64,
    /// Tag of the thread that produced the record.
    pub thread_tag: u32,
}

impl TimingRecord {
    /// Create a new timing record.
    ///
    /// An `end_ticks` earlier than `start_ticks` is clamped to `start_ticks`.
    #[must_use]
    pub fn new(label: impl Into<String>, start_ticks: u64, end_ticks: u64, thread_tag: u32) -> Self {
        Self {
            label: label.into(),
            start_ticks,
            end_ticks: end_ticks.max(start_ticks),
            thread_tag,
        }
    }

    /// Duration in microseconds.
    #[must_use]
    pub const fn duration(&self) -> u64 {
        self.end_ticks.saturating_sub(self.start_ticks)
    }

    /// Build the trace event written for this record.
    #[must_use]
    pub fn to_event(&self) -> TraceEvent {
        TraceEvent {
            cat: EVENT_CATEGORY.to_owned(),
            dur: self.duration(),
            name: sanitize_label(&self.label),
            ph: COMPLETE_PHASE.to_owned(),
            pid: 0,
            tid: self.thread_tag,
            ts: self.start_ticks,
        }
    }
}

/// One Chrome trace "complete" event.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub cat: String,
    pub dur: u64,
    pub name: String,
    pub ph: String,
    pub pid: u32,
    pub tid: u32,
    pub ts: u64,
}

/// Replace double quotes with apostrophes.
#[must_use]
pub fn sanitize_label(label: &str) -> String {
    label.replace('"', "'")
}

thread_local! {
    static THREAD_TAG: u32 = hash_thread_id();
}

#[allow(clippy::cast_possible_truncation)]
fn hash_thread_id() -> u32 {
    let mut hasher = DefaultHasher::new();
    std::thread::current().id().hash(&mut hasher);
    let hash = hasher.finish();
    // Fold the high half in so the low 32 bits aren't the only input.
    (hash ^ (hash >> 32)) as u32
}

/// Tag for the calling thread, stable for the thread's lifetime.
#[inline]
#[must_use]
pub fn current_thread_tag() -> u32 {
    THREAD_TAG.with(|tag| *tag)
}
