//! Network adapters behind the feedwatch collaborator traits
//!
//! - [`YouTubeResolver`]: handle to channel id through the Data API
//! - [`RssFeedFetcher`]: latest upload from the public RSS feed
//! - [`DiscordNotifier`]: webhook embeds
//!
//! All adapters share one [`reqwest::Client`] built by [`build_client`].

pub mod discord;
pub mod http;
pub mod rss;
pub mod youtube;

pub use discord::DiscordNotifier;
pub use http::build_client;
pub use rss::{parse_latest, RssFeedFetcher};
pub use youtube::YouTubeResolver;
