//! Core domain types for feedwatch.
//!
//! - **`platform`**: which content platform a ledger record belongs to
//! - **`source`**: tracked source configuration, fetched items, outbound
//!   notifications
//! - **`report`**: per-source terminal states and the cycle report
//! - **`cancel`**: cooperative cancellation between sources

pub mod cancel;
pub mod platform;
pub mod report;
pub mod source;

pub use cancel::*;
pub use platform::*;
pub use report::*;
pub use source::*;
