//! The feedwatch monitoring engine
//!
//! [`Monitor`] runs one cycle over the tracked sources: resolve each
//! reference, fetch its newest item, compare it with the ledger and announce
//! anything new. [`Scheduler`] repeats cycles on a fixed interval until it is
//! cancelled.

pub mod cycle;
pub mod scheduler;

pub use cycle::Monitor;
pub use scheduler::Scheduler;
