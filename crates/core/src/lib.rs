//! Core domain types, errors, and collaborator traits for `feedwatch`.
//!
//! Everything the monitoring engine shares across crates lives here so that
//! the cache, the HTTP adapters and the orchestrator agree on one vocabulary.
//!
//! ## Key Components
//!
//! - **`errors`**: the primary `Error` enum, `NotifyError`, and the `Result`
//!   alias. Every failure mode a cycle can meet is one of these variants.
//! - **`types`**: platforms, tracked source configuration, fetched items and
//!   the per-cycle report.
//! - **`traits`**: the narrow contracts of the external collaborators (feed
//!   fetcher, notifier, handle resolver, registry, target provider).
//! - **`constants`**: environment variable names, file names and defaults.

pub mod constants;
pub mod errors;
pub mod traits;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, NotifyError, Result},
    traits::*,
    types::*,
};
