//! Streaming Chrome trace writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::events::TimingRecord;

/// Opening framing of the trace document.
pub const HEADER: &[u8] = br#"{"otherData": {},"traceEvents":["#;

/// Closing framing of the trace document.
pub const FOOTER: &[u8] = b"]}";

/// Writes timing records into a JSON trace document as they arrive.
///
/// The header is written on construction and every record is flushed as
/// soon as it is written, so the output stays valid up to the last record
/// (minus the footer) even if the process dies mid-session.
pub struct TraceWriter<W: Write = BufWriter<File>> {
    /// Output sink, `None` once closed.
    sink: Option<W>,
    /// Records written so far.
    record_count: u64,
}

impl TraceWriter<BufWriter<File>> {
    /// Create or truncate the file at `path` and write the document header.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> TraceWriter<W> {
    /// Start a trace document on `sink`.
    pub fn new(mut sink: W) -> Result<Self> {
        sink.write_all(HEADER)?;
        sink.flush()?;
        Ok(Self {
            sink: Some(sink),
            record_count: 0,
        })
    }

    /// Append one record and flush it.
    pub fn write_record(&mut self, record: &TimingRecord) -> Result<()> {
        let sink = self.sink.as_mut().ok_or(Error::WriterClosed)?;

        // Separator and event go out in one write so the comma never lands alone
        let mut bytes = Vec::with_capacity(128);
        if self.record_count > 0 {
            bytes.push(b',');
        }
        serde_json::to_writer(&mut bytes, &record.to_event())?;
        sink.write_all(&bytes)?;

        // Once the bytes are accepted the record is in the document, even if flushing fails
        self.record_count += 1;
        tracing::trace!(
            label = %record.label,
            dur = record.duration(),
            count = self.record_count,
            "trace event written"
        );
        sink.flush()?;
        Ok(())
    }

    /// Write the footer and hand back the sink.
    pub fn close(&mut self) -> Result<W> {
        let mut sink = self.sink.take().ok_or(Error::WriterClosed)?;
        sink.write_all(FOOTER)?;
        sink.flush()?;
        Ok(sink)
    }

    /// Number of records written so far.
    #[must_use]
    pub const fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Check if the writer still accepts records.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.sink.is_some()
    }
}

impl<W: Write> Drop for TraceWriter<W> {
    fn drop(&mut self) {
        if self.is_open() {
            tracing::warn!(
                records = self.record_count,
                "Trace writer dropped while open, writing footer"
            );
            if let Err(e) = self.close() {
                tracing::warn!("Failed to close trace writer: {}", e);
            }
        }
    }
}
