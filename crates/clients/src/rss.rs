//! Latest upload from the public channel RSS feed
//!
//! The feed lists uploads newest first, so only the first `<entry>` matters.
//! Reading the feed costs no API quota.

use crate::http::endpoint;
use async_trait::async_trait;
use feedwatch_core::{Error, FeedFetcher, LatestItem, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use url::Url;

pub const DEFAULT_FEEDS_BASE: &str = "https://www.youtube.com";

static ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<entry>(.*?)</entry>").expect("valid regex"));
static VIDEO_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<yt:videoId>\s*([^<\s]+)\s*</yt:videoId>").expect("valid regex"));
static TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<title>([^<]+)</title>").expect("valid regex"));
static THUMBNAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<media:thumbnail[^>]*\burl="([^"]+)""#).expect("valid regex"));
static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("valid regex")
});

/// Fallback thumbnail when the feed entry carries none
pub fn default_thumbnail(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/maxresdefault.jpg")
}

/// Extract the newest item from a feed document.
///
/// Returns `None` when there is no entry or the entry lacks an id or a title.
pub fn parse_latest(xml: &str) -> Option<LatestItem> {
    let entry = ENTRY.captures(xml)?.get(1)?.as_str();
    let item_id = VIDEO_ID.captures(entry)?.get(1)?.as_str().to_string();
    let title = decode_entities(TITLE.captures(entry)?.get(1)?.as_str().trim());

    let thumbnail_url = THUMBNAIL
        .captures(entry)
        .and_then(|c| c.get(1))
        .map(|m| decode_entities(m.as_str()))
        .unwrap_or_else(|| default_thumbnail(&item_id));

    Some(LatestItem {
        item_id,
        title,
        thumbnail_url: Some(thumbnail_url),
    })
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => {
                    let code = match entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => entity[1..].parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

#[derive(Debug, Clone)]
pub struct RssFeedFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl RssFeedFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_FEEDS_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn feed_url(&self, channel_id: &str) -> Result<Url> {
        let base = endpoint(&self.base_url, "feeds/videos.xml");
        Url::parse_with_params(&base, &[("channel_id", channel_id)])
            .map_err(|e| Error::configuration(format!("invalid feed base url '{base}': {e}")))
    }
}

#[async_trait]
impl FeedFetcher for RssFeedFetcher {
    async fn fetch_latest(&self, stable_id: &str) -> Result<Option<LatestItem>> {
        let url = self.feed_url(stable_id)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::fetch_unavailable(stable_id, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch_unavailable(stable_id, format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::fetch_unavailable(stable_id, e.to_string()))?;

        let latest = parse_latest(&body);
        if latest.is_none() {
            tracing::debug!(channel_id = %stable_id, "feed has no usable entry");
        }
        Ok(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_client;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns:yt="http://www.youtube.com/xml/schemas/2015" xmlns:media="http://search.yahoo.com/mrss/" xmlns="http://www.w3.org/2005/Atom">
 <title>Linus Tech Tips</title>
 <yt:channelId>UCXuqSBlHAE6Xw-yeJA0Tunw</yt:channelId>
 <entry>
  <id>yt:video:abc123XYZ_-</id>
  <yt:videoId>abc123XYZ_-</yt:videoId>
  <title>Tom &amp; Jerry&#39;s &quot;PC&quot; build</title>
  <media:group>
   <media:title>Tom &amp; Jerry&#39;s &quot;PC&quot; build</media:title>
   <media:thumbnail url="https://i4.ytimg.com/vi/abc123XYZ_-/hqdefault.jpg" width="480" height="360"/>
  </media:group>
 </entry>
 <entry>
  <yt:videoId>older000000</yt:videoId>
  <title>Older upload</title>
 </entry>
</feed>"#;

    #[test]
    fn test_parse_first_entry() {
        let item = parse_latest(FEED).unwrap();

        assert_eq!(item.item_id, "abc123XYZ_-");
        assert_eq!(item.title, "Tom & Jerry's \"PC\" build");
        assert_eq!(
            item.thumbnail_url.as_deref(),
            Some("https://i4.ytimg.com/vi/abc123XYZ_-/hqdefault.jpg")
        );
    }

    #[test]
    fn test_parse_falls_back_to_default_thumbnail() {
        let xml = "<feed><entry><yt:videoId>vid</yt:videoId><title>T</title></entry></feed>";
        let item = parse_latest(xml).unwrap();
        assert_eq!(
            item.thumbnail_url.as_deref(),
            Some("https://img.youtube.com/vi/vid/maxresdefault.jpg")
        );
    }

    #[test]
    fn test_parse_without_entries() {
        assert!(parse_latest("<feed><title>Empty</title></feed>").is_none());
        assert!(parse_latest("<feed><entry><title>no id</title></entry></feed>").is_none());
        assert!(parse_latest("not xml at all").is_none());
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt;b&gt; &#x41;&#66;"), "a <b> AB");
        assert_eq!(decode_entities("&bogus; &#xZZ;"), "&bogus; &#xZZ;");
    }

    fn fetcher(server: &MockServer) -> RssFeedFetcher {
        RssFeedFetcher::new(build_client(Duration::from_secs(5)).unwrap()).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_fetch_latest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feeds/videos.xml"))
            .and(query_param("channel_id", "UCXuqSBlHAE6Xw-yeJA0Tunw"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
            .mount(&server)
            .await;

        let item = fetcher(&server)
            .fetch_latest("UCXuqSBlHAE6Xw-yeJA0Tunw")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(item.item_id, "abc123XYZ_-");
    }

    #[tokio::test]
    async fn test_empty_feed_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<feed></feed>"))
            .mount(&server)
            .await;

        assert!(fetcher(&server).fetch_latest("UCx").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_http_error_is_fetch_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetcher(&server).fetch_latest("UCgone").await.unwrap_err();
        assert!(err.is_fetch_unavailable());
    }

    #[tokio::test]
    async fn test_timeout_is_fetch_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let fetcher = RssFeedFetcher::new(build_client(Duration::from_millis(100)).unwrap())
            .with_base_url(server.uri());

        let err = fetcher.fetch_latest("UCslow").await.unwrap_err();
        assert!(err.is_fetch_unavailable());
    }
}
