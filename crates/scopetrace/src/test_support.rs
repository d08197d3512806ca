//! Helpers shared by the unit tests.

use std::path::Path;

use serde_json::Value;

/// Parse a finished trace file and return its `traceEvents` array.
pub fn read_events(path: &Path) -> Vec<Value> {
    let doc: Value = serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
    doc["traceEvents"].as_array().unwrap().clone()
}
