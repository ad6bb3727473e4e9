//! Error types for feedwatch operations

mod builders;
mod types;

pub use types::{Error, NotifyError, Result};
