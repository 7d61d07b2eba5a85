//! Embed resolver for the vidsrc video-embed provider.
//!
//! URL construction is deterministic and offline ([`url`]); the availability
//! probe performs one live fetch and classifies it ([`availability`]); the
//! latest-additions feed is a plain JSON passthrough.

pub mod availability;
pub mod url;

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::EmbedConfig;
use crate::error::{Error, Result};
use crate::media::MediaKind;

pub use availability::{classify, Availability, Confidence};
pub use url::{build_embed_url, EmbedRequest};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Talks to the embed provider.
pub struct EmbedResolver {
    http: Client,
    provider_base: String,
    probe_timeout: Duration,
    feed_timeout: Duration,
}

impl EmbedResolver {
    pub fn new(config: &EmbedConfig) -> Self {
        let http = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client: {}", e);
                Client::new()
            });

        Self {
            http,
            provider_base: config.provider_base(),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            feed_timeout: Duration::from_secs(config.feed_timeout_secs),
        }
    }

    pub fn embed_url(&self, kind: MediaKind, request: &EmbedRequest) -> String {
        build_embed_url(&self.provider_base, kind, request)
    }

    /// Fetch `embed_url` once and guess whether it plays.
    ///
    /// Never fails: transport problems become an unavailable result.
    pub async fn probe(&self, embed_url: &str) -> Availability {
        let result = self
            .http
            .get(embed_url)
            .timeout(self.probe_timeout)
            .header(ACCEPT, BROWSER_ACCEPT)
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(REFERER, format!("{}/", self.provider_base))
            .send()
            .await;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => return transport_failure(embed_url, &e),
        };

        let status = resp.status().as_u16();
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => return transport_failure(embed_url, &e),
        };

        let availability = classify(status, &body);
        debug!(
            url = %embed_url,
            status,
            available = availability.available,
            reason = ?availability.reason,
            "Embed probe classified"
        );
        availability
    }

    /// Proxy the provider's static "latest additions" page feed.
    pub async fn latest(&self, kind: MediaKind, page: u32) -> Result<Value> {
        let section = match kind {
            MediaKind::Movie => "movies",
            MediaKind::Tv => "tvshows",
        };
        let url = format!("{}/{section}/latest/page-{page}.json", self.provider_base);
        debug!(url = %url, "Embed latest feed");

        let resp = self
            .http
            .get(&url)
            .timeout(self.feed_timeout)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Decode(format!("{url}: {e}")))
    }
}

fn transport_failure(url: &str, error: &reqwest::Error) -> Availability {
    let reason = if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connection error"
    } else {
        "request error"
    };
    warn!(url = %url, error = %error, reason, "Embed probe failed");
    Availability::unavailable(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_url_uses_configured_domain() {
        let resolver = EmbedResolver::new(&EmbedConfig {
            domain: "vidsrc.example".into(),
            ..Default::default()
        });
        let request = EmbedRequest {
            tmdb: Some("603".into()),
            ..Default::default()
        };
        assert_eq!(
            resolver.embed_url(MediaKind::Movie, &request),
            "https://vidsrc.example/embed/movie/603"
        );
    }

    #[tokio::test]
    async fn probe_connection_refused_is_unavailable() {
        let resolver = EmbedResolver::new(&EmbedConfig {
            domain: "127.0.0.1:9".into(),
            scheme: "http".into(),
            probe_timeout_secs: 2,
            ..Default::default()
        });
        let result = resolver
            .probe("http://127.0.0.1:9/embed/movie/603")
            .await;
        assert!(!result.available);
        assert!(matches!(
            result.reason.as_deref(),
            Some("connection error") | Some("timeout")
        ));
    }
}
