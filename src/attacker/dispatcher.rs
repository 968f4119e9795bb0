//! Rate pacer and elastic worker pool lifecycle

use std::sync::Arc;
use std::time::Duration;

use async_channel::TrySendError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::outcome::HitResult;
use crate::rate::Rate;

use super::executor::AttackCore;
use super::worker::Worker;

/// Why a dispatch loop exited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunEnd {
    Completed,
    Cancelled,
}

/// Paces tick emission and owns every worker of one run
///
/// The dispatcher is the single producer on the work channel and the sole
/// owner of the worker join handles. Its shutdown order is fixed on every
/// exit path: close the work channel, join every worker, then let the
/// output channel close, so no worker can ever write to a closed output
/// stream.
pub(crate) struct Dispatcher {
    core: Arc<AttackCore>,
    attack: Arc<str>,
    cancel: CancellationToken,
    ticks_tx: async_channel::Sender<u64>,
    ticks_rx: async_channel::Receiver<u64>,
    results_tx: mpsc::Sender<HitResult>,
    max_workers: Option<usize>,
    handles: Vec<JoinHandle<()>>,
}

impl Dispatcher {
    pub(crate) fn new(
        core: Arc<AttackCore>,
        attack: Arc<str>,
        cancel: CancellationToken,
        ticks_tx: async_channel::Sender<u64>,
        ticks_rx: async_channel::Receiver<u64>,
        results_tx: mpsc::Sender<HitResult>,
        max_workers: Option<usize>,
    ) -> Self {
        Self {
            core,
            attack,
            cancel,
            ticks_tx,
            ticks_rx,
            results_tx,
            max_workers,
            handles: Vec::new(),
        }
    }

    fn spawn_worker(&mut self) {
        let worker = Worker {
            id: self.handles.len(),
            core: Arc::clone(&self.core),
            attack: Arc::clone(&self.attack),
            cancel: self.cancel.clone(),
            ticks: self.ticks_rx.clone(),
            results: self.results_tx.clone(),
        };
        self.handles.push(tokio::spawn(worker.run()));
    }

    fn at_capacity(&self) -> bool {
        self.max_workers
            .is_some_and(|max| self.handles.len() >= max)
    }

    /// Drive one attack to completion or cancellation
    pub(crate) async fn run(mut self, rate: Rate, duration: Duration, initial_workers: usize) {
        for _ in 0..initial_workers {
            self.spawn_worker();
        }

        let interval = rate.interval();
        let interval_ns = interval.as_nanos() as u64;
        // Integer division truncates; the realized hit count may fall
        // slightly short of rate × duration.
        let total = (duration.as_nanos() / interval.as_nanos()) as u64;

        let began = tokio::time::Instant::now();
        let mut tick: u64 = 0;

        let end = 'pace: loop {
            if tick == total {
                break RunEnd::Completed;
            }

            // Release hit `tick` no earlier than began + tick * interval.
            let next = began + Duration::from_nanos(interval_ns.saturating_mul(tick));
            tokio::time::sleep_until(next).await;

            loop {
                if self.cancel.is_cancelled() {
                    break 'pace RunEnd::Cancelled;
                }
                match self.ticks_tx.try_send(tick) {
                    Ok(()) => {
                        tick += 1;
                        continue 'pace;
                    }
                    Err(TrySendError::Full(_)) if !self.at_capacity() => {
                        // Every worker is mid-hit: grow the pool and retry
                        // the handoff without re-sleeping.
                        self.spawn_worker();
                        tracing::debug!(
                            attack = %self.attack,
                            workers = self.handles.len(),
                            tick,
                            "worker pool grown under backpressure"
                        );
                        tokio::task::yield_now().await;
                    }
                    Err(TrySendError::Full(_)) => {
                        // Pool is capped: fall back to a blocking handoff
                        // racing the cancellation signal.
                        tokio::select! {
                            sent = self.ticks_tx.send(tick) => match sent {
                                Ok(()) => {
                                    tick += 1;
                                    continue 'pace;
                                }
                                Err(_) => break 'pace RunEnd::Cancelled,
                            },
                            _ = self.cancel.cancelled() => break 'pace RunEnd::Cancelled,
                        }
                    }
                    Err(TrySendError::Closed(_)) => break 'pace RunEnd::Cancelled,
                }
            }
        };

        // Closing the work channel tells workers to drain and stop; they
        // must all be joined before results_tx drops, because closing the
        // output stream is how consumers learn the run finished.
        drop(self.ticks_tx);
        drop(self.ticks_rx);

        let workers = self.handles.len();
        for (id, handle) in self.handles.into_iter().enumerate() {
            if let Err(e) = handle.await {
                tracing::error!(worker_id = id, error = %e, "worker task panicked");
            }
        }

        tracing::info!(
            attack = %self.attack,
            dispatched = tick,
            workers,
            end = ?end,
            "attack finished"
        );
    }
}
