//! Scope-bound timers.

use crate::clock;
use crate::error::Error;
use crate::events::{current_thread_tag, TimingRecord};
use crate::session::Instrumentor;

/// RAII timer that records its region on drop.
///
/// Finalizes exactly once: either through [`ScopedTimer::stop`] or when it
/// goes out of scope, whichever comes first.
pub struct ScopedTimer<'a> {
    instrumentor: &'a Instrumentor,
    label: &'a str,
    start: u64,
    stopped: bool,
}

impl<'a> ScopedTimer<'a> {
    /// Start timing a region.
    #[inline]
    #[must_use]
    pub fn start(instrumentor: &'a Instrumentor, label: &'a str) -> Self {
        Self {
            instrumentor,
            label,
            start: clock::now(),
            stopped: false,
        }
    }

    /// Stop the timer and submit its record. Later calls do nothing.
    ///
    /// Failures are logged, never returned: a missing session or a failed
    /// write must not reach the instrumented code.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        let end = clock::now();
        let record = TimingRecord::new(self.label, self.start, end, current_thread_tag());
        tracing::trace!(label = self.label, dur = record.duration(), "timer stopped");

        match self.instrumentor.record(&record) {
            Ok(()) => {}
            Err(Error::NotOpen) => {
                tracing::debug!("Timer '{}' finished with no open session", self.label);
            }
            Err(e) => {
                tracing::warn!("Failed to record timer '{}': {}", self.label, e);
            }
        }
    }

    /// Label of the measured region.
    #[must_use]
    pub const fn label(&self) -> &'a str {
        self.label
    }

    /// Check if the timer has already been finalized.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Drop for ScopedTimer<'_> {
    #[inline]
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::read_events;
    use std::time::Duration;

    #[test]
    fn stop_twice_records_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twice.json");
        let instrumentor = Instrumentor::new();
        instrumentor.begin_session_at("twice", &path).unwrap();

        let mut timer = instrumentor.timer("once");
        assert!(!timer.is_stopped());
        timer.stop();
        assert!(timer.is_stopped());
        timer.stop();
        drop(timer);

        assert_eq!(instrumentor.end_session().unwrap(), 1);
        assert_eq!(read_events(&path).len(), 1);
    }

    #[test]
    fn nested_timers_inner_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested.json");
        let instrumentor = Instrumentor::new();
        instrumentor.begin_session_at("nested", &path).unwrap();

        {
            let _outer = instrumentor.timer("outer");
            std::thread::sleep(Duration::from_millis(2));
            {
                let _inner = instrumentor.timer("inner");
                std::thread::sleep(Duration::from_millis(2));
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        instrumentor.end_session().unwrap();

        let events = read_events(&path);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["name"], "inner");
        assert_eq!(events[1]["name"], "outer");

        let inner_dur = events[0]["dur"].as_u64().unwrap();
        let outer_dur = events[1]["dur"].as_u64().unwrap();
        assert!(outer_dur >= inner_dur);
        assert!(events[1]["ts"].as_u64().unwrap() <= events[0]["ts"].as_u64().unwrap());
    }

    #[test]
    fn no_session_is_a_no_op() {
        let instrumentor = Instrumentor::new();
        let mut timer = ScopedTimer::start(&instrumentor, "nowhere");
        timer.stop();
        assert!(timer.is_stopped());
        drop(instrumentor.timer("also nowhere"));
        assert!(!instrumentor.is_active());
    }

    #[test]
    fn timer_outliving_session_is_dropped_quietly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outlived.json");
        let instrumentor = Instrumentor::new();
        instrumentor.begin_session_at("outlived", &path).unwrap();

        let timer = instrumentor.timer("late");
        instrumentor.end_session().unwrap();
        drop(timer);

        assert!(read_events(&path).is_empty());
    }

    #[test]
    fn finalizes_on_early_return() {
        fn search(instrumentor: &Instrumentor, needle: u32) -> bool {
            let _timer = instrumentor.timer("search");
            for i in 0..10 {
                if i == needle {
                    return true;
                }
            }
            false
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("early.json");
        let instrumentor = Instrumentor::new();
        instrumentor.begin_session_at("early", &path).unwrap();

        assert!(search(&instrumentor, 3));
        assert!(!search(&instrumentor, 42));
        assert_eq!(instrumentor.end_session().unwrap(), 2);
    }

    #[test]
    fn finalizes_during_unwind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panic.json");
        let instrumentor = Instrumentor::new();
        instrumentor.begin_session_at("panic", &path).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _timer = instrumentor.timer("doomed");
            panic!("boom");
        }));
        assert!(result.is_err());

        instrumentor.end_session().unwrap();
        let events = read_events(&path);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["name"], "doomed");
    }
}
