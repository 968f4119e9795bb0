//! Aggregation of emitted hit results

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::outcome::HitResult;

/// Aggregated view of one or more attack runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttackSummary {
    /// Total hits recorded
    pub hits: usize,

    /// Hits classified as successful
    pub successes: usize,

    /// Hits classified as failed
    pub failures: usize,

    /// Total bytes sent across all hits
    pub bytes_out: u64,

    /// Total bytes received across all hits
    pub bytes_in: u64,

    /// Earliest hit timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest: Option<DateTime<Utc>>,

    /// Latest hit timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<DateTime<Utc>>,

    /// Minimum observed latency
    pub latency_min: Duration,

    /// Maximum observed latency
    pub latency_max: Duration,

    /// Mean latency
    pub latency_mean: Duration,

    /// Hits per status code
    pub status_codes: HashMap<u16, usize>,

    /// Distinct error texts observed, in first-seen order
    pub errors: Vec<String>,
}

impl AttackSummary {
    /// Success rate in `0.0..=1.0`
    pub fn success_rate(&self) -> f64 {
        if self.hits == 0 {
            0.0
        } else {
            self.successes as f64 / self.hits as f64
        }
    }

    /// Achieved rate in hits per second over the attacked span
    pub fn rate(&self) -> f64 {
        match (self.earliest, self.latest) {
            (Some(earliest), Some(latest)) if latest > earliest => {
                let span = (latest - earliest)
                    .to_std()
                    .unwrap_or(Duration::ZERO)
                    .as_secs_f64();
                if span > 0.0 {
                    self.hits as f64 / span
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }
}

/// Fold a slice of hit results into an [`AttackSummary`]
pub fn summarize(results: &[HitResult]) -> AttackSummary {
    let mut summary = AttackSummary::default();
    if results.is_empty() {
        return summary;
    }

    let mut latency_total = Duration::ZERO;
    summary.latency_min = Duration::MAX;

    for result in results {
        summary.hits += 1;
        if result.is_success() {
            summary.successes += 1;
        } else {
            summary.failures += 1;
        }

        summary.bytes_out += result.bytes_out;
        summary.bytes_in += result.bytes_in;

        summary.earliest = Some(match summary.earliest {
            Some(earliest) => earliest.min(result.timestamp),
            None => result.timestamp,
        });
        summary.latest = Some(match summary.latest {
            Some(latest) => latest.max(result.timestamp),
            None => result.timestamp,
        });

        summary.latency_min = summary.latency_min.min(result.latency);
        summary.latency_max = summary.latency_max.max(result.latency);
        latency_total += result.latency;

        *summary.status_codes.entry(result.code).or_default() += 1;
        if !result.error.is_empty() && !summary.errors.iter().any(|e| e == &result.error) {
            summary.errors.push(result.error.clone());
        }
    }

    summary.latency_mean = latency_total / summary.hits as u32;
    summary
}
