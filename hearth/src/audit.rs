//! Product audit events, emitted as structured `tracing` events on the
//! `hearth::audit` target.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of audit events the aggregation layer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEvent {
    /// A listing was computed (not served from cache).
    SearchPerformed,
    /// A computed listing came back empty.
    ZeroResults,
    /// A computed listing contains stale entries.
    StaleDataDetected,
}

impl AuditEvent {
    /// Wire name of the event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SearchPerformed => "search_performed",
            Self::ZeroResults => "zero_results",
            Self::StaleDataDetected => "stale_data_detected",
        }
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emit `event` with a JSON payload.
pub fn emit(event: AuditEvent, payload: &serde_json::Value) {
    tracing::info!(
        target: "hearth::audit",
        event = event.as_str(),
        payload = %payload,
        "audit_event"
    );
}
