//! Outcome records moving through the engine
//!
//! [`HitOutcome`] is what a probe reports for one invocation; [`HitResult`]
//! is the stamped, sequenced record the engine emits on the output stream.
//! Both are pure data.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::{self, FailureKind};

/// Per-invocation report produced by a probe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitOutcome {
    /// Bytes sent over the wire
    pub sent_bytes: u64,

    /// Bytes received over the wire
    pub recv_bytes: u64,

    /// Status code in the engine's convention space
    pub code: u16,

    /// Error text; empty means no error
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl HitOutcome {
    /// Outcome for a successful invocation with no payload accounting
    pub fn success() -> Self {
        Self {
            code: status::OK,
            ..Default::default()
        }
    }

    /// Outcome for a failed invocation, coded through the status mapping
    pub fn failure(kind: FailureKind, error: impl Into<String>) -> Self {
        Self {
            code: kind.status_code(),
            error: error.into(),
            ..Default::default()
        }
    }

    /// Attach transferred-byte counts
    pub fn with_bytes(mut self, sent: u64, recv: u64) -> Self {
        self.sent_bytes = sent;
        self.recv_bytes = recv;
        self
    }
}

/// One emitted hit record
///
/// Created exactly once per hit and immutable afterwards. Records arrive on
/// the output stream in completion order, which is not sequence order; sort
/// by [`seq`](HitResult::seq) or [`timestamp`](HitResult::timestamp) when
/// chronology matters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitResult {
    /// Dispatch sequence number, strictly increasing per attacker
    pub seq: u64,

    /// Attack name supplied by the caller, constant for a run
    pub attack: String,

    /// Wall-clock instant the hit began
    pub timestamp: DateTime<Utc>,

    /// Time from `timestamp` to probe completion
    pub latency: Duration,

    /// Bytes sent by the probe
    pub bytes_out: u64,

    /// Bytes received by the probe
    pub bytes_in: u64,

    /// Status code in the engine's convention space
    pub code: u16,

    /// Error text; empty means no error
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl HitResult {
    /// Whether this hit counts as a success (2xx/3xx code, no error text)
    pub fn is_success(&self) -> bool {
        self.error.is_empty() && (200..400).contains(&self.code)
    }
}
