//! Append-only probe log
//!
//! One JSON line per probe, regardless of outcome. Logging is pure
//! observability: a failed append is reported via `tracing` by the caller
//! and never fails a health check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// One probe, as recorded in the check log
#[derive(Debug, Clone, Serialize)]
pub struct CheckLogEntry {
    pub checked_at: DateTime<Utc>,
    pub url: String,
    pub http_code: u16,
    pub response_time_ms: f64,
    pub status: String,
}

/// Sink receiving one entry per probe
#[async_trait]
pub trait CheckLogSink: Send + Sync {
    async fn append(&self, entry: &CheckLogEntry) -> std::io::Result<()>;
}

/// File-backed JSONL sink
pub struct JsonlCheckLog {
    path: PathBuf,
}

impl JsonlCheckLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CheckLogSink for JsonlCheckLog {
    async fn append(&self, entry: &CheckLogEntry) -> std::io::Result<()> {
        let mut line = serde_json::to_string(entry).map_err(std::io::Error::other)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn appends_one_json_line_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checks.log");
        let log = JsonlCheckLog::new(path.clone());

        for code in [200u16, 0] {
            log.append(&CheckLogEntry {
                checked_at: Utc::now(),
                url: "http://example.com/live".to_string(),
                http_code: code,
                response_time_ms: 12.5,
                status: if code == 200 { "online" } else { "offline" }.to_string(),
            })
            .await
            .unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["http_code"], 200);
        assert_eq!(first["status"], "online");
    }
}
