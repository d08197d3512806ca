//! Session management.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::events::TimingRecord;
use crate::timer::ScopedTimer;
use crate::writer::TraceWriter;

/// Trace file used by [`Instrumentor::begin_session`].
pub const DEFAULT_TRACE_PATH: &str = "results.json";

/// An open recording window and its output file.
struct Session {
    name: String,
    path: PathBuf,
    writer: TraceWriter,
}

/// Owns the active trace session and routes timing records into it.
///
/// Construct one at the top of the program and hand clones to whatever
/// needs instrumenting; clones share the same session. At most one session
/// is open at a time.
///
/// Every record write holds the session lock for the whole
/// comma/write/flush sequence, and begin/end take the same lock, so
/// concurrent timers can never interleave bytes or race a close.
#[derive(Clone, Default)]
pub struct Instrumentor {
    session: Arc<Mutex<Option<Session>>>,
}

impl Instrumentor {
    /// Create an instrumentor with no open session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session writing to [`DEFAULT_TRACE_PATH`].
    pub fn begin_session(&self, name: impl Into<String>) -> Result<()> {
        self.begin_session_at(name, DEFAULT_TRACE_PATH)
    }

    /// Begin a session writing to `path`, truncating any existing file.
    ///
    /// Fails with [`Error::AlreadyOpen`] if a session is active; the active
    /// session is left untouched.
    pub fn begin_session_at(&self, name: impl Into<String>, path: impl AsRef<Path>) -> Result<()> {
        let name = name.into();
        let path = path.as_ref();

        let mut guard = self.session.lock();
        if let Some(active) = guard.as_ref() {
            tracing::warn!(
                "Cannot begin session '{}': session '{}' is still open",
                name,
                active.name
            );
            return Err(Error::AlreadyOpen {
                name: active.name.clone(),
            });
        }

        let writer = TraceWriter::create(path)?;
        tracing::info!("Trace session '{}' started, writing to {}", name, path.display());

        *guard = Some(Session {
            name,
            path: path.to_path_buf(),
            writer,
        });
        Ok(())
    }

    /// Close the active session's trace file.
    ///
    /// Returns the number of records written during the session.
    pub fn end_session(&self) -> Result<u64> {
        let mut session = self.session.lock().take().ok_or(Error::NotOpen)?;

        let count = session.writer.record_count();
        session.writer.close()?;

        tracing::info!(
            "Trace session '{}' ended, {} records written to {}",
            session.name,
            count,
            session.path.display()
        );
        Ok(count)
    }

    /// Write a completed record to the active session.
    pub fn record(&self, record: &TimingRecord) -> Result<()> {
        let mut guard = self.session.lock();
        let session = guard.as_mut().ok_or(Error::NotOpen)?;
        session.writer.write_record(record)
    }

    /// Start a timer that reports to this instrumentor.
    #[inline]
    #[must_use]
    pub fn timer<'a>(&'a self, label: &'a str) -> ScopedTimer<'a> {
        ScopedTimer::start(self, label)
    }

    /// Check if a session is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.lock().is_some()
    }

    /// Name of the open session.
    #[must_use]
    pub fn session_name(&self) -> Option<String> {
        self.session.lock().as_ref().map(|s| s.name.clone())
    }

    /// Records written in the open session, zero when none is open.
    #[must_use]
    pub fn record_count(&self) -> u64 {
        self.session
            .lock()
            .as_ref()
            .map_or(0, |s| s.writer.record_count())
    }
}
