//! Scoped execution timers that stream Chrome trace files.
//!
//! Time labeled code regions and write each measurement as a "complete"
//! event into a JSON trace file that `chrome://tracing` or Perfetto can
//! open. Records are flushed as they are produced, so a crashed or hung
//! program still leaves a trace that only needs its closing `]}`.
//!
//! # Feature Flags
//!
//! - `profiling` (default): Enable the profiling macros. When disabled,
//!   `profile_scope!` and `profile_function!` expand to no-ops. The
//!   [`Instrumentor`] and [`ScopedTimer`] API is always available.
//!
//! # Usage
//!
//! Create an instrumentor and open a session at startup:
//!
//! ```no_run
//! let instrumentor = scopetrace::Instrumentor::new();
//! instrumentor.begin_session("Profile")?;
//! # Ok::<(), scopetrace::Error>(())
//! ```
//!
//! Time regions with a scoped timer or the macros:
//!
//! ```ignore
//! use scopetrace::{profile_function, profile_scope, Instrumentor};
//!
//! fn update(instrumentor: &Instrumentor) {
//!     profile_function!(instrumentor);
//!     {
//!         profile_scope!(instrumentor, "physics");
//!         // ... physics step
//!     }
//! }
//! ```
//!
//! Close the session to finish the file:
//!
//! ```ignore
//! instrumentor.end_session()?;
//! ```

pub mod clock;
mod error;
mod events;
mod macros;
mod session;
#[cfg(test)]
mod test_support;
mod timer;
mod writer;

// Re-export public API
pub use error::{Error, Result};
pub use events::{current_thread_tag, sanitize_label, TimingRecord, TraceEvent};
pub use session::{Instrumentor, DEFAULT_TRACE_PATH};
pub use timer::ScopedTimer;
pub use writer::TraceWriter;
