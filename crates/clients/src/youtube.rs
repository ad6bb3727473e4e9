//! YouTube Data API handle resolver

use crate::http::endpoint;
use async_trait::async_trait;
use feedwatch_core::{constants::YOUTUBE_API_KEY_VAR, Error, HandleResolver, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Deserialize)]
struct ChannelsResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
struct SearchSnippet {
    #[serde(rename = "channelId")]
    channel_id: String,
}

/// Resolves `@handle`s with the `channels` endpoint and falls back to `search`
#[derive(Clone)]
pub struct YouTubeResolver {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl YouTubeResolver {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            Error::resolver_unavailable(format!("{YOUTUBE_API_KEY_VAR} is not set"))
        })?;

        // The key is part of the query string, so it must never reach an error message
        let response = self
            .client
            .get(endpoint(&self.base_url, path))
            .query(query)
            .query(&[("key", key)])
            .send()
            .await
            .map_err(|e| Error::network(path, e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::network(path, format!("HTTP {status}: {}", body.trim())));
        }

        response
            .json()
            .await
            .map_err(|e| Error::network(path, format!("invalid response: {}", e.without_url())))
    }
}

#[async_trait]
impl HandleResolver for YouTubeResolver {
    async fn lookup_handle(&self, handle: &str) -> Result<Option<String>> {
        let response: ChannelsResponse = self
            .get("channels", &[("part", "id"), ("forHandle", handle)])
            .await?;
        Ok(response.items.into_iter().next().map(|item| item.id))
    }

    async fn search_handle(&self, handle: &str) -> Result<Option<String>> {
        let response: SearchResponse = self
            .get(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "channel"),
                    ("q", handle),
                    ("maxResults", "1"),
                ],
            )
            .await?;
        Ok(response
            .items
            .into_iter()
            .next()
            .map(|item| item.snippet.channel_id))
    }
}

impl std::fmt::Debug for YouTubeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeResolver")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
