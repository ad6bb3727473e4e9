//! Persistent state for feedwatch
//!
//! This crate owns everything the monitor keeps between runs:
//! - `store`: a corruption-tolerant JSON key-value file with atomic replace
//! - `resolution`: the reference-to-channel-id cache in front of the resolver
//! - `ledger`: last-seen items per platform and source, plus the
//!   change-detection policy
//! - `reference`: parsing of channel URLs into direct ids and handles

pub mod ledger;
pub mod reference;
pub mod resolution;
pub mod store;

pub use ledger::{decide, Decision, Ledger};
pub use reference::SourceReference;
pub use resolution::ResolutionCache;
pub use store::{JsonStore, Mapping};
