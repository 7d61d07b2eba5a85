//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which runs a [`MockServer`] standing in for both
//! upstream providers and builds a router pointed at it.

#![allow(dead_code)]

use anyvod::config::Config;
use anyvod::server::{create_router, AppContext};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::MockServer;

pub const API_KEY: &str = "test-key";

pub struct TestHarness {
    pub upstream: MockServer,
    pub app: Router,
}

impl TestHarness {
    /// Harness with an API key configured.
    pub async fn new() -> Self {
        Self::with_api_key(Some(API_KEY)).await
    }

    pub async fn with_api_key(api_key: Option<&str>) -> Self {
        let upstream = MockServer::start().await;

        let mut config = Config::default();
        config.catalog.api_key = api_key.map(String::from);
        config.catalog.base_url = upstream.uri();
        config.embed.scheme = "http".to_string();
        config.embed.domain = upstream.address().to_string();
        config.embed.probe_timeout_secs = 2;

        let app = create_router(AppContext::new(config));
        Self { upstream, app }
    }

    /// Embed provider root as the router sees it.
    pub fn provider_base(&self) -> String {
        format!("http://{}", self.upstream.address())
    }

    /// Issue a GET against the router and return status plus raw body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// GET and parse the body as JSON.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        let json = serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {body}"));
        (status, json)
    }
}
