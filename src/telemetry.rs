//! Telemetry capability set with pluggable sinks (v0.1)
//!
//! The orchestrator reports through the [`Telemetry`] trait rather than a
//! concrete sink, so observability is an optional collaborator:
//!
//! - [`NoopTelemetry`]: the default, every call elided
//! - [`TracingTelemetry`]: forwards to the `tracing` macros
//! - [`RecordingTelemetry`]: thread-safe, append-only capture for tests
//!
//! Injecting the no-op implementation instead of null-checking keeps the
//! orchestrator logic unconditional.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use tracing::Span;

/// Severity of a telemetry record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryLevel {
    Info,
    Warn,
    Error,
}

/// Observability capability set consumed by the orchestrator.
///
/// The engine calls only `info` and `error`; `warn` and `start_span` are
/// part of the contract for other collaborators.
pub trait Telemetry: Send + Sync {
    fn info(&self, message: &str, attrs: Value);
    fn warn(&self, message: &str, attrs: Value);
    fn error(&self, message: &str, attrs: Value);
    fn start_span(&self, name: &str) -> Span;
}

/// Telemetry sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl Telemetry for NoopTelemetry {
    fn info(&self, _message: &str, _attrs: Value) {}
    fn warn(&self, _message: &str, _attrs: Value) {}
    fn error(&self, _message: &str, _attrs: Value) {}
    fn start_span(&self, _name: &str) -> Span {
        Span::none()
    }
}

/// Telemetry sink that forwards to the `tracing` macros
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl Telemetry for TracingTelemetry {
    fn info(&self, message: &str, attrs: Value) {
        tracing::info!(%attrs, "{}", message);
    }

    fn warn(&self, message: &str, attrs: Value) {
        tracing::warn!(%attrs, "{}", message);
    }

    fn error(&self, message: &str, attrs: Value) {
        tracing::error!(%attrs, "{}", message);
    }

    fn start_span(&self, name: &str) -> Span {
        tracing::info_span!("telemetry", span_name = %name)
    }
}

/// Single captured telemetry record
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryRecord {
    pub level: TelemetryLevel,
    pub message: String,
    pub attrs: Value,
}

/// Thread-safe, append-only telemetry capture.
///
/// Cloning shares the underlying buffer, so a test can hand one clone to
/// the orchestrator and inspect the other afterwards.
#[derive(Clone, Default)]
pub struct RecordingTelemetry {
    records: Arc<RwLock<Vec<TelemetryRecord>>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: TelemetryLevel, message: &str, attrs: Value) {
        self.records.write().push(TelemetryRecord {
            level,
            message: message.to_string(),
            attrs,
        });
    }

    /// All records captured so far, in emission order
    pub fn records(&self) -> Vec<TelemetryRecord> {
        self.records.read().clone()
    }

    /// Messages only, in emission order
    pub fn messages(&self) -> Vec<String> {
        self.records
            .read()
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    /// Records at the given level
    pub fn at_level(&self, level: TelemetryLevel) -> Vec<TelemetryRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| r.level == level)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Telemetry for RecordingTelemetry {
    fn info(&self, message: &str, attrs: Value) {
        self.push(TelemetryLevel::Info, message, attrs);
    }

    fn warn(&self, message: &str, attrs: Value) {
        self.push(TelemetryLevel::Warn, message, attrs);
    }

    fn error(&self, message: &str, attrs: Value) {
        self.push(TelemetryLevel::Error, message, attrs);
    }

    fn start_span(&self, _name: &str) -> Span {
        Span::none()
    }
}

impl std::fmt::Debug for RecordingTelemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingTelemetry")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recording_starts_empty() {
        let telemetry = RecordingTelemetry::new();
        assert!(telemetry.is_empty());
    }

    #[test]
    fn records_keep_emission_order() {
        let telemetry = RecordingTelemetry::new();
        telemetry.info("first", json!({}));
        telemetry.error("second", json!({"reason": "x"}));
        telemetry.info("third", json!({}));

        assert_eq!(telemetry.messages(), vec!["first", "second", "third"]);
    }

    #[test]
    fn at_level_filters() {
        let telemetry = RecordingTelemetry::new();
        telemetry.info("a", json!({}));
        telemetry.warn("b", json!({}));
        telemetry.error("c", json!({}));

        let errors = telemetry.at_level(TelemetryLevel::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "c");
    }

    #[test]
    fn clone_shares_the_buffer() {
        let telemetry = RecordingTelemetry::new();
        let handle = telemetry.clone();

        telemetry.info("seen by both", json!({}));
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn concurrent_emits_are_all_captured() {
        use std::thread;

        let telemetry = RecordingTelemetry::new();
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let telemetry = telemetry.clone();
                thread::spawn(move || telemetry.info(&format!("m{}", i), json!({})))
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(telemetry.len(), 10);
    }

    #[test]
    fn record_serializes_level_snake_case() {
        let telemetry = RecordingTelemetry::new();
        telemetry.warn("careful", json!({"k": 1}));

        let json = serde_json::to_value(telemetry.records()).unwrap();
        assert_eq!(json[0]["level"], "warn");
        assert_eq!(json[0]["attrs"]["k"], 1);
    }

    #[test]
    fn noop_span_is_disabled() {
        let span = NoopTelemetry.start_span("anything");
        assert!(span.is_disabled());
    }
}
