//! Attack lifecycle: pacing, elastic workers, sequencing, shutdown
//!
//! The [`Attacker`] is the façade over three cooperating pieces:
//!
//! - the **dispatcher**, one task per run, which paces work-signal emission
//!   against the target rate and grows the worker pool when a handoff
//!   would block;
//! - the **workers**, tasks that each pull a tick, execute one hit, and
//!   push the result downstream;
//! - the **hit executor**, the per-hit path that stamps a sequence number
//!   and timestamp under the attacker's single mutex, invokes the probe,
//!   and resolves its report into a [`HitResult`](crate::HitResult).
//!
//! Both channels are minimally bounded, so channel operations themselves
//! are the synchronization: a slow result consumer throttles workers,
//! starved workers stall the dispatcher's handoff, and a stalled handoff
//! is what triggers pool growth.
//!
//! # Example
//!
//! ```ignore
//! let attacker = Attacker::builder().probe(probe).workers(10).build()?;
//! let mut results = attacker.attack(cancel, "50/1s".parse()?, duration, "login-surge")?;
//! while let Some(hit) = results.recv().await {
//!     println!("#{}: {}", hit.seq, hit.code);
//! }
//! ```

mod builder;
mod dispatcher;
mod executor;
mod worker;

pub use builder::{AttackerBuilder, DEFAULT_WORKERS};
pub use executor::Attacker;
