//! Diagnostic sinks for the analyzer.
//!
//! The analyzer reports free-text lines (resolution, scale factors) and
//! per-stage timings through a [`CropLog`]. [`TracingLog`] forwards both to
//! `tracing`; [`RecordingLog`] keeps them in memory.
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::debug;

const MAX_RECORDED_ENTRIES: usize = 1000;

/// Timing entry describing a single stage of the analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
    /// Number of items processed by the stage, when meaningful
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
            count: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// Aggregated timing trace for one analysis.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, timing: StageTiming) {
        self.stages.push(timing);
    }

    pub fn stage(&self, label: &str) -> Option<&StageTiming> {
        self.stages.iter().find(|s| s.label == label)
    }
}

/// Sink for analyzer diagnostics.
pub trait CropLog: Send + Sync {
    fn line(&self, message: &str);
    fn timing(&self, timing: &StageTiming);
}

/// Forwards diagnostics to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl CropLog for TracingLog {
    fn line(&self, message: &str) {
        debug!(target: "smartcrop", "{}", message);
    }

    fn timing(&self, timing: &StageTiming) {
        match timing.count {
            Some(count) => debug!(
                target: "smartcrop",
                stage = %timing.label,
                elapsed_ms = timing.elapsed_ms,
                count,
                "Time elapsed {}: {:.3} ms ({} items)",
                timing.label,
                timing.elapsed_ms,
                count
            ),
            None => debug!(
                target: "smartcrop",
                stage = %timing.label,
                elapsed_ms = timing.elapsed_ms,
                "Time elapsed {}: {:.3} ms",
                timing.label,
                timing.elapsed_ms
            ),
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl CropLog for NullLog {
    fn line(&self, _message: &str) {}
    fn timing(&self, _timing: &StageTiming) {}
}

#[derive(Clone, Debug, PartialEq)]
pub enum LogEntry {
    Line(String),
    Timing(StageTiming),
}

/// Keeps the most recent entries in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingLog {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, entry: LogEntry) {
        if let Ok(mut buf) = self.entries.lock() {
            if buf.len() == MAX_RECORDED_ENTRIES {
                buf.pop_front();
            }
            buf.push_back(entry);
        }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|b| b.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                LogEntry::Line(l) => Some(l),
                LogEntry::Timing(_) => None,
            })
            .collect()
    }

    pub fn timings(&self) -> Vec<StageTiming> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                LogEntry::Timing(t) => Some(t),
                LogEntry::Line(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut buf) = self.entries.lock() {
            buf.clear();
        }
    }
}

impl CropLog for RecordingLog {
    fn line(&self, message: &str) {
        self.push(LogEntry::Line(message.to_string()));
    }

    fn timing(&self, timing: &StageTiming) {
        self.push(LogEntry::Timing(timing.clone()));
    }
}
