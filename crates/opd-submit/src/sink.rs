//! The append-only sink contract and the JSON-Lines file sink.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use opd_schemas::SubmissionRecord;

/// Errors raised by sink implementations.
#[derive(Debug)]
pub enum SinkError {
    /// An I/O failure opening or writing the backing store.
    Io(String),
    /// A record could not be serialized for storage.
    Serialize(String),
    /// A stored line could not be parsed back into a record.
    Parse { line: usize, detail: String },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Io(msg) => write!(f, "sink io error: {msg}"),
            SinkError::Serialize(msg) => write!(f, "sink serialize error: {msg}"),
            SinkError::Parse { line, detail } => {
                write!(f, "sink parse error at line {line}: {detail}")
            }
        }
    }
}

impl std::error::Error for SinkError {}

/// Durable destination for finalized submission records.
///
/// One `append` call per record, in the order the records were built;
/// there is no batch or transactional API, so each append stands alone.
/// An implementation must leave previously appended records intact when
/// an append fails.
pub trait SubmissionSink {
    /// Human-readable name identifying this sink (e.g. `"jsonl"`).
    fn name(&self) -> &'static str;

    fn append(&mut self, record: &SubmissionRecord) -> Result<(), SinkError>;
}

/// Append-only JSON Lines file sink: one record per line, canonical key
/// order, trailing newline per line.
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create the sink and ensure parent directories exist. The file
    /// itself is created lazily on the first append.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SinkError::Io(format!("create_dir_all '{}': {e}", parent.display())))?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SubmissionSink for JsonlSink {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    fn append(&mut self, record: &SubmissionRecord) -> Result<(), SinkError> {
        let line = canonical_json_line(record)?;
        append_line(&self.path, &line)
    }
}

/// Read every record back from a JSONL sink file, skipping blank lines.
///
/// Intended for inspection and tests; the running system never reads the
/// sink.
pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<SubmissionRecord>, SinkError> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| SinkError::Io(format!("read '{}': {e}", path.as_ref().display())))?;

    let mut out = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let rec: SubmissionRecord =
            serde_json::from_str(trimmed).map_err(|e| SinkError::Parse {
                line: i + 1,
                detail: e.to_string(),
            })?;
        out.push(rec);
    }
    Ok(out)
}

/// Write a single line to the file (with trailing newline).
fn append_line(path: &Path, line: &str) -> Result<(), SinkError> {
    let mut f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| SinkError::Io(format!("open '{}': {e}", path.display())))?;
    f.write_all(line.as_bytes())
        .and_then(|()| f.write_all(b"\n"))
        .map_err(|e| SinkError::Io(format!("write '{}': {e}", path.display())))
}

/// Canonicalize by sorting keys recursively and emitting compact JSON.
/// One record == one JSON line.
fn canonical_json_line<T: Serialize>(v: &T) -> Result<String, SinkError> {
    let raw = serde_json::to_value(v).map_err(|e| SinkError::Serialize(e.to_string()))?;
    let sorted = sort_keys(&raw);
    serde_json::to_string(&sorted).map_err(|e| SinkError::Serialize(e.to_string()))
}

fn sort_keys(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().cloned().collect();
            keys.sort();
            let mut new = serde_json::Map::new();
            for k in keys {
                new.insert(k.clone(), sort_keys(&map[&k]));
            }
            Value::Object(new)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_keys).collect()),
        _ => v.clone(),
    }
}
