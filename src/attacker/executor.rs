//! Attacker façade and the per-hit execution path

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::outcome::HitResult;
use crate::probe::Probe;
use crate::rate::Rate;
use crate::status;

use super::builder::AttackerBuilder;
use super::dispatcher::Dispatcher;

/// Rate-paced attack driver
///
/// Owns the probe and the sequencing state shared by every run. One
/// instance may run several attacks, sequentially or concurrently; the
/// sequence counter and start instant persist across them, so sequence
/// numbers never reset within a campaign.
pub struct Attacker {
    core: Arc<AttackCore>,
    workers: usize,
    max_workers: Option<usize>,
}

impl Attacker {
    /// Start building an attacker
    pub fn builder() -> AttackerBuilder {
        AttackerBuilder::new()
    }

    pub(crate) fn new(probe: Arc<dyn Probe>, workers: usize, max_workers: Option<usize>) -> Self {
        Self {
            core: Arc::new(AttackCore::new(probe)),
            workers,
            max_workers,
        }
    }

    /// Run one attack and stream back its results
    ///
    /// Paces `floor(duration / rate.interval())` hits, starting hit `n` no
    /// earlier than `n * interval` after the run begins, and returns the
    /// output receiver immediately. The receiver yields results in
    /// completion order and closes once the run finishes or the token is
    /// cancelled and every in-flight hit has drained.
    ///
    /// A hit already executing when the token fires is not interrupted by
    /// the engine; probes that want to stop early must observe the token
    /// themselves.
    ///
    /// # Errors
    ///
    /// Fails fast on a rate the dispatcher cannot pace; see
    /// [`Rate::validate`].
    pub fn attack(
        &self,
        cancel: CancellationToken,
        rate: Rate,
        duration: Duration,
        attack: impl Into<String>,
    ) -> Result<mpsc::Receiver<HitResult>> {
        rate.validate()?;
        let attack: Arc<str> = Arc::from(attack.into());

        tracing::info!(
            %rate,
            ?duration,
            attack = %attack,
            workers = self.workers,
            "starting attack"
        );

        let (results_tx, results_rx) = mpsc::channel(1);
        let (ticks_tx, ticks_rx) = async_channel::bounded(1);

        let dispatcher = Dispatcher::new(
            Arc::clone(&self.core),
            attack,
            cancel,
            ticks_tx,
            ticks_rx,
            results_tx,
            self.max_workers,
        );
        tokio::spawn(dispatcher.run(rate, duration, self.workers));

        Ok(results_rx)
    }
}

impl std::fmt::Debug for Attacker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attacker")
            .field("workers", &self.workers)
            .field("max_workers", &self.max_workers)
            .finish()
    }
}

/// State shared by every concurrent unit of an attacker
pub(crate) struct AttackCore {
    probe: Arc<dyn Probe>,
    began: Instant,
    began_at: DateTime<Utc>,
    seq: Mutex<u64>,
}

impl AttackCore {
    pub(crate) fn new(probe: Arc<dyn Probe>) -> Self {
        Self {
            probe,
            began: Instant::now(),
            began_at: Utc::now(),
            seq: Mutex::new(0),
        }
    }

    /// Execute exactly one hit: stamp, probe, resolve
    pub(crate) async fn hit(&self, cancel: &CancellationToken, attack: &str) -> HitResult {
        // Minimal critical section: one clock read plus the increment, so
        // sequence order always matches timestamp order and probes never
        // serialize on the lock.
        let (seq, elapsed) = {
            let mut seq = self.seq.lock();
            let current = *seq;
            *seq += 1;
            (current, self.began.elapsed())
        };
        // Deriving the wall-clock stamp from the monotonic clock keeps
        // timestamps immune to wall-clock jumps mid-campaign.
        let timestamp = self.began_at + chrono::Duration::from_std(elapsed).unwrap_or_default();
        let started = self.began + elapsed;

        let probed = self.probe.hit(cancel.clone()).await;
        let latency = started.elapsed();

        let (bytes_out, bytes_in, code, error) = match probed {
            Ok(Some(outcome)) => (
                outcome.sent_bytes,
                outcome.recv_bytes,
                outcome.code,
                outcome.error,
            ),
            Ok(None) => (0, 0, status::OK, String::new()),
            Err(err) => match err.into_parts() {
                // outcome data always wins; the error value is discarded
                (_, Some(outcome)) => (
                    outcome.sent_bytes,
                    outcome.recv_bytes,
                    outcome.code,
                    outcome.error,
                ),
                (message, None) => (0, 0, status::SERVER_ERROR, message),
            },
        };

        HitResult {
            seq,
            attack: attack.to_string(),
            timestamp,
            latency,
            bytes_out,
            bytes_in,
            code,
            error,
        }
    }
}
