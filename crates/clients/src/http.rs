//! Shared HTTP client

use feedwatch_core::{constants::USER_AGENT, Error, Result};
use std::time::Duration;

/// Build the client used by every adapter. Each request is bounded by `timeout`.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::network("client", format!("failed to create HTTP client: {e}")))
}

/// Join a base URL and a path segment without doubling the slash
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        assert_eq!(endpoint("http://a/v3/", "/channels"), "http://a/v3/channels");
        assert_eq!(endpoint("http://a", "feeds/videos.xml"), "http://a/feeds/videos.xml");
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(Duration::from_secs(1)).is_ok());
    }
}
