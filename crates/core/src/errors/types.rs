//! Core error type definitions

use std::path::PathBuf;
use std::time::Duration;

/// Result type alias for feedwatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for feedwatch operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source reference carries neither a channel id nor a handle
    #[error("invalid source reference '{input}': no channel id or @handle found")]
    InvalidSourceReference { input: String },

    /// Resolver credentials or configuration are missing
    #[error("identifier resolver unavailable: {message}")]
    ResolverUnavailable { message: String },

    /// Every lookup strategy ran and none produced an identifier
    #[error("could not resolve '{input}': {message}")]
    NotResolvable { input: String, message: String },

    /// The feed for a resolved identifier could not be fetched
    #[error("feed unavailable for '{source_id}': {message}")]
    FetchUnavailable { source_id: String, message: String },

    /// Outbound notification failed
    #[error(transparent)]
    Notify(#[from] NotifyError),

    /// Channel registry errors (duplicates, unknown names)
    #[error("registry error: {message}")]
    Registry { message: String },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Network-related errors
    #[error("network error for '{endpoint}': {message}")]
    Network { endpoint: String, message: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Delivery failures reported by a notifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    /// The webhook answered 429; the caller decides when to try again
    #[error("rate limited by webhook{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<Duration> },

    /// Any other non-success HTTP status
    #[error("webhook returned HTTP {status}: {body}")]
    Delivery { status: u16, body: String },

    /// The request never produced a response (timeout, DNS, TLS...)
    #[error("webhook request failed: {message}")]
    Transport { message: String },
}

fn retry_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(delay) => format!(" (retry after {delay:?})"),
        None => String::new(),
    }
}

impl Error {
    /// Resolution failed in a way that skips the source for this cycle
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Error::InvalidSourceReference { .. }
                | Error::ResolverUnavailable { .. }
                | Error::NotResolvable { .. }
        )
    }

    /// The feed could not be read this cycle
    pub fn is_fetch_unavailable(&self) -> bool {
        matches!(self, Error::FetchUnavailable { .. })
    }
}
