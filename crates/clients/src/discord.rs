//! Discord webhook notifier

use crate::rss::default_thumbnail;
use async_trait::async_trait;
use feedwatch_core::{Notification, Notifier, NotifyError};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

/// Embed side colour (red)
pub const EMBED_COLOR: u32 = 16_711_680;

#[derive(Debug, Serialize)]
struct WebhookPayload {
    embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    url: String,
    description: String,
    color: u32,
    image: EmbedImage,
}

#[derive(Debug, Serialize)]
struct EmbedImage {
    url: String,
}

impl From<&Notification> for WebhookPayload {
    fn from(notification: &Notification) -> Self {
        let image = notification
            .thumbnail_url
            .clone()
            .unwrap_or_else(|| default_thumbnail(&notification.item_id));

        Self {
            embeds: vec![Embed {
                title: notification.title.clone(),
                url: format!("https://youtu.be/{}", notification.item_id),
                description: format!("New video from **{}**", notification.source_name),
                color: EMBED_COLOR,
                image: EmbedImage { url: image },
            }],
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    client: reqwest::Client,
}

impl DiscordNotifier {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let payload = WebhookPayload::from(notification);

        // Webhook URLs embed their token, so they stay out of error messages
        let response = self
            .client
            .post(&notification.target_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::transport(e.without_url().to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(source = %notification.source_name, status = %status, "webhook accepted");
            return Ok(());
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(NotifyError::RateLimited {
                retry_after: parse_retry_after(response.headers()),
            });
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotifyError::Delivery {
            status: status.as_u16(),
            body: body.trim().to_string(),
        })
    }
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
        .map(Duration::from_secs_f64)
}
