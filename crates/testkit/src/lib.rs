#![warn(missing_docs)]
//! Deterministic testing surfaces: command transcripts, golden snapshots and
//! a step-by-step session harness.

mod script_harness;
mod snapshot;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub use script_harness::*;
pub use snapshot::*;

/// First line of every transcript file.
#[derive(Debug, Serialize)]
pub struct TranscriptHeader<'a> {
    /// Always `"session_start"`.
    pub kind: &'a str,
    /// Wall-clock start time (RFC 3339).
    pub started_at: String,
}

impl TranscriptHeader<'_> {
    /// Header stamped with the current time.
    pub fn now() -> Self {
        Self {
            kind: "session_start",
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// One executed command and its outcome.
#[derive(Debug, Serialize)]
pub struct TranscriptRecord<'a> {
    /// Zero-based position in the command stream.
    pub step: u64,
    /// Command text as entered.
    pub command: &'a str,
    /// Whether the command succeeded.
    pub success: bool,
    /// Status message reported to the user.
    pub message: &'a str,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create transcript {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Append one serializable record as a JSON line.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonlSink {
    fn drop(&mut self) {
        if let Err(err) = self.writer.flush() {
            tracing::warn!(%err, "failed to flush transcript");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn jsonl_sink_writes_one_line_per_record() {
        let path = std::env::temp_dir().join(format!(
            "blockcraft-transcript-{}.jsonl",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        {
            let mut sink = JsonlSink::create(&path).expect("sink create");
            sink.write(&TranscriptHeader::now()).expect("header");
            sink.write(&TranscriptRecord {
                step: 0,
                command: "place 0 0 0",
                success: true,
                message: "Block placed: Wood at 0,0,0",
            })
            .expect("record");
        }
        let contents = fs::read_to_string(&path).expect("file readable");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("session_start"));
        assert_eq!(
            lines[1],
            r#"{"step":0,"command":"place 0 0 0","success":true,"message":"Block placed: Wood at 0,0,0"}"#
        );
        fs::remove_file(&path).ok();
    }
}
