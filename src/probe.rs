//! Probe contract
//!
//! A probe performs one protocol-level operation (an HTTP call, an RPC, a
//! query) and reports what happened. The engine is agnostic to the protocol:
//! it only needs the uniform [`HitOutcome`] shape, and it imposes no
//! timeout or retry behavior of its own.

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::outcome::HitOutcome;

/// What a single probe invocation yields
///
/// The four possible shapes, and how the hit executor resolves them:
///
/// - `Ok(Some(outcome))`: outcome fields are copied verbatim.
/// - `Ok(None)`: implicit success, code 200, zero bytes, no error text.
/// - `Err(e)` with no attached outcome: code 500, error text from `e`.
/// - `Err(e)` with an attached outcome: the outcome wins and the error
///   value is discarded; encode failure in the outcome's `code`/`error`.
pub type ProbeResult = Result<Option<HitOutcome>, ProbeError>;

/// Error reported by a probe invocation
///
/// Probe errors are data, not faults: they are folded into the emitted
/// [`HitResult`](crate::HitResult) and never abort the run.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProbeError {
    message: String,
    outcome: Option<HitOutcome>,
}

impl ProbeError {
    /// Probe error with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            outcome: None,
        }
    }

    /// Attach an outcome; its fields take precedence over this error
    pub fn with_outcome(mut self, outcome: HitOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// The attached outcome, if any
    pub fn outcome(&self) -> Option<&HitOutcome> {
        self.outcome.as_ref()
    }

    pub(crate) fn into_parts(self) -> (String, Option<HitOutcome>) {
        (self.message, self.outcome)
    }
}

impl From<String> for ProbeError {
    fn from(message: String) -> Self {
        ProbeError::new(message)
    }
}

impl From<&str> for ProbeError {
    fn from(message: &str) -> Self {
        ProbeError::new(message)
    }
}

/// User-supplied probe operation
///
/// Shared across all workers via `Arc`, so implementations hold their own
/// clients and state. The token is the run's cancellation signal; a probe
/// may observe it to abort early, but the engine never interrupts an
/// in-flight hit itself.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Perform one protocol-level operation
    async fn hit(&self, cancel: CancellationToken) -> ProbeResult;
}

/// Adapt an async closure into a [`Probe`]
///
/// ```
/// use volley::{probe_fn, HitOutcome};
///
/// let probe = probe_fn(|_cancel| async {
///     Ok(Some(HitOutcome::success().with_bytes(456, 123)))
/// });
/// ```
pub fn probe_fn<F, Fut>(f: F) -> FnProbe<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = ProbeResult> + Send + 'static,
{
    FnProbe(f)
}

/// [`Probe`] implementation wrapping an async closure
pub struct FnProbe<F>(F);

#[async_trait]
impl<F, Fut> Probe for FnProbe<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = ProbeResult> + Send + 'static,
{
    async fn hit(&self, cancel: CancellationToken) -> ProbeResult {
        (self.0)(cancel).await
    }
}
