//! volley: a probe-agnostic, rate-paced load-generation engine
//!
//! You supply a probe (any async operation that reports how one
//! invocation went) and volley issues it at a configured frequency for a
//! configured duration, streaming back one [`HitResult`] per hit with
//! latency, transferred-byte counts, a status code, and error text.
//! Whether the probe speaks HTTP, gRPC, or a bespoke wire protocol is
//! invisible to the engine.
//!
//! # Architecture
//!
//! - [`Probe`]: the user-supplied operation, invoked once per hit with the
//!   run's cancellation token.
//! - [`Rate`]: hits per period; parses from `"N"` / `"N/duration"`
//!   expressions.
//! - [`Attacker`]: the façade. Construct one per campaign via
//!   [`Attacker::builder`], then call [`Attacker::attack`] for each run;
//!   sequence numbers keep increasing across runs.
//! - [`attacker`]: the dispatcher/worker internals: tick pacing, elastic
//!   pool growth under backpressure, and the drain-then-close shutdown
//!   protocol.
//! - [`summarize`]: fold collected results into an [`AttackSummary`].
//!
//! Results arrive in completion order, not dispatch order; sort by
//! [`HitResult::seq`] when chronology matters.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use volley::{probe_fn, Attacker, HitOutcome, Rate};
//!
//! # async fn demo() -> volley::Result<()> {
//! let probe = Arc::new(probe_fn(|_cancel| async {
//!     // issue the real request here
//!     Ok(Some(HitOutcome::success().with_bytes(456, 123)))
//! }));
//!
//! let attacker = Attacker::builder().probe(probe).workers(10).build()?;
//! let mut results = attacker.attack(
//!     CancellationToken::new(),
//!     "50/1s".parse::<Rate>().expect("valid rate expression"),
//!     Duration::from_secs(5),
//!     "smoke",
//! )?;
//!
//! let mut hits = Vec::new();
//! while let Some(hit) = results.recv().await {
//!     hits.push(hit);
//! }
//! println!("{:#?}", volley::summarize(&hits));
//! # Ok(())
//! # }
//! ```
//!
//! # Semantics worth knowing
//!
//! - Per-hit probe failures are data on the result, never engine errors;
//!   the only fail-fast errors are configuration mistakes caught before a
//!   run starts.
//! - The worker pool grows without bound (unless capped via
//!   [`AttackerBuilder::max_workers`]) whenever probes run slower than the
//!   pacing interval; the engine never retries a hit.
//! - Cancellation is cooperative: the dispatcher stops dispatching,
//!   in-flight hits run to completion, and the output stream closes only
//!   after every worker has drained.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attacker;
pub mod error;
pub mod outcome;
pub mod probe;
pub mod rate;
pub mod status;
pub mod summary;

pub use attacker::{Attacker, AttackerBuilder, DEFAULT_WORKERS};
pub use error::{Error, Result};
pub use outcome::{HitOutcome, HitResult};
pub use probe::{probe_fn, FnProbe, Probe, ProbeError, ProbeResult};
pub use rate::{ParseRateError, Rate};
pub use status::FailureKind;
pub use summary::{summarize, AttackSummary};
