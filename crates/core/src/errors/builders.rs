//! Builder methods for creating errors with context

use super::types::{Error, NotifyError};
use std::path::PathBuf;

impl Error {
    /// Create an invalid source reference error
    #[must_use]
    pub fn invalid_source_reference(input: impl Into<String>) -> Self {
        Error::InvalidSourceReference {
            input: input.into(),
        }
    }

    /// Create a resolver unavailable error
    #[must_use]
    pub fn resolver_unavailable(message: impl Into<String>) -> Self {
        Error::ResolverUnavailable {
            message: message.into(),
        }
    }

    /// Create a not resolvable error
    #[must_use]
    pub fn not_resolvable(input: impl Into<String>, message: impl Into<String>) -> Self {
        Error::NotResolvable {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a fetch unavailable error
    #[must_use]
    pub fn fetch_unavailable(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Error::FetchUnavailable {
            source_id: source_id.into(),
            message: message.into(),
        }
    }

    /// Create a registry error
    #[must_use]
    pub fn registry(message: impl Into<String>) -> Self {
        Error::Registry {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a network error
    #[must_use]
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Network {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a file system error
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a JSON error with a message
    #[must_use]
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Json {
            message: message.into(),
            source,
        }
    }
}

impl NotifyError {
    /// Create a transport error
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        NotifyError::Transport {
            message: message.into(),
        }
    }
}
