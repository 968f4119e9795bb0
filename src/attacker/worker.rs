//! Worker loop: pull a tick, execute a hit, forward the result

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::outcome::HitResult;

use super::executor::AttackCore;

/// One hit-executing member of the pool
///
/// Workers coordinate through the shared channels only. A worker never
/// polls the cancellation token: it exits when the work channel is closed
/// and drained, which is the dispatcher's only stop signal to the pool.
/// The blocking send on the output channel is what carries consumer
/// backpressure through to the dispatcher.
pub(crate) struct Worker {
    pub(crate) id: usize,
    pub(crate) core: Arc<AttackCore>,
    pub(crate) attack: Arc<str>,
    pub(crate) cancel: CancellationToken,
    pub(crate) ticks: async_channel::Receiver<u64>,
    pub(crate) results: mpsc::Sender<HitResult>,
}

impl Worker {
    pub(crate) async fn run(self) {
        tracing::debug!(worker_id = self.id, "worker started");

        while let Ok(tick) = self.ticks.recv().await {
            let result = self.core.hit(&self.cancel, &self.attack).await;
            tracing::trace!(
                worker_id = self.id,
                tick,
                seq = result.seq,
                code = result.code,
                "hit completed"
            );
            if self.results.send(result).await.is_err() {
                tracing::debug!(worker_id = self.id, "output stream dropped, worker stopping");
                break;
            }
        }

        tracing::debug!(worker_id = self.id, "worker finished");
    }
}
