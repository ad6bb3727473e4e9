//! Shared utilities for feedwatch
//!
//! Atomic file replacement, XDG directory discovery and tracing setup used
//! by every other crate in the workspace.

pub mod atomic_file;
pub mod tracing;
pub mod xdg;

pub use atomic_file::*;
pub use xdg::*;
