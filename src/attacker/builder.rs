//! Builder pattern for Attacker construction

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::probe::Probe;

use super::executor::Attacker;

/// Initial worker pool size when none is configured
pub const DEFAULT_WORKERS: usize = 10;

/// Builder for creating [`Attacker`] instances
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use volley::{probe_fn, Attacker};
///
/// let probe = Arc::new(probe_fn(|_cancel| async { Ok(None) }));
/// let attacker = Attacker::builder().probe(probe).workers(2).build()?;
/// # Ok::<(), volley::Error>(())
/// ```
pub struct AttackerBuilder {
    probe: Option<Arc<dyn Probe>>,
    workers: usize,
    max_workers: Option<usize>,
}

impl AttackerBuilder {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self {
            probe: None,
            workers: DEFAULT_WORKERS,
            max_workers: None,
        }
    }

    /// Set the probe executed for every hit
    pub fn probe(mut self, probe: Arc<dyn Probe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Set the initial worker pool size
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Cap elastic pool growth
    ///
    /// The pool is unbounded by default: sustained probe latency beyond the
    /// pacing interval grows it without limit. With a cap, a dispatcher
    /// that cannot grow falls back to waiting for a free worker.
    pub fn max_workers(mut self, max: usize) -> Self {
        self.max_workers = Some(max);
        self
    }

    /// Build the attacker
    ///
    /// # Errors
    /// Fails if no probe was supplied, the worker count is zero, or the
    /// growth cap is below the initial pool size.
    pub fn build(self) -> Result<Attacker> {
        let probe = self.probe.ok_or_else(|| Error::missing_config("probe"))?;

        if self.workers == 0 {
            return Err(Error::config("worker count must be at least 1"));
        }
        if let Some(max) = self.max_workers {
            if max < self.workers {
                return Err(Error::config(format!(
                    "max_workers ({max}) is below the initial pool size ({})",
                    self.workers
                )));
            }
        }

        Ok(Attacker::new(probe, self.workers, self.max_workers))
    }
}

impl Default for AttackerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
