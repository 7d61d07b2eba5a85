//! Catalog gateway backed by the TMDB v3 REST API.
//!
//! Every operation is a single upstream GET (the API key is injected here)
//! followed by optional client-side filtering and sorting of the returned
//! `results` list. Responses are forwarded as raw JSON.
//!
//! - No retry and no rate limiting: one request, fixed timeout.
//! - Non-2xx upstream responses surface with the same status and raw body.

pub mod query;
pub mod results;

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::CatalogConfig;
use crate::error::{Error, Result};
use crate::media::MediaKind;

use query::{
    DiscoverParams, ExternalIdSource, MovieList, SearchKind, SearchParams, TimeWindow,
    TrendingMediaType, TvList,
};
use results::{
    filter_by_first_air_year, filter_by_genre, filter_by_rating, results_mut, sort_results,
};

/// Sub-resources bundled into a single detail request.
const DETAIL_APPEND: &str = "credits,images,videos";

type Params = Vec<(&'static str, String)>;

/// HTTP client for the catalog provider.
pub struct CatalogClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        }
    }

    /// GET `{base_url}{path}` with `params` plus the API key.
    async fn get(&self, path: &str, params: &[(&'static str, String)]) -> Result<Value> {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;

        let url = format!("{}{}", self.base_url, path);
        debug!(path = %path, params = ?params, "Catalog request");

        let resp = self
            .http
            .get(&url)
            .query(params)
            .query(&[("api_key", api_key)])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            debug!(path = %path, status = status.as_u16(), "Catalog returned error");
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Decode(format!("{path}: {e}")))
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Free-text search with optional kind, year, rating/genre filters and
    /// sort. An `exid` short-circuits into an external-id lookup.
    pub async fn search(&self, params: &SearchParams) -> Result<Value> {
        params.validate()?;

        if let Some(source) = params.exid {
            return self.find_by_external_id(&params.query, source).await;
        }

        let mut upstream: Params = vec![
            ("query", params.query.clone()),
            ("page", params.page.unwrap_or(1).to_string()),
        ];

        let path = match params.kind {
            SearchKind::Person => "/search/person",
            SearchKind::Movie => {
                if let Some(year) = params.year {
                    upstream.push(("year", year.to_string()));
                }
                "/search/movie"
            }
            // The TV search endpoint has no year parameter; filtered below.
            SearchKind::Tv => "/search/tv",
            SearchKind::All => "/search/multi",
        };

        let mut page = self.get(path, &upstream).await?;

        if let Some(results) = results_mut(&mut page) {
            if params.kind == SearchKind::Tv {
                if let Some(year) = params.year {
                    filter_by_first_air_year(results, year);
                }
            }
            if params.kind != SearchKind::Person {
                filter_by_rating(results, params.min_rating);
                filter_by_genre(results, params.genre);
            }
            sort_results(results, params.sort_by);
        }

        Ok(page)
    }

    /// Resolve `external_id` in the given namespace. Namespaces without a
    /// resolution strategy answer with an empty, explicitly-tagged result.
    pub async fn find_by_external_id(
        &self,
        external_id: &str,
        source: ExternalIdSource,
    ) -> Result<Value> {
        let Some(find_source) = source.find_source() else {
            debug!(source = source.tag(), "External id source not supported");
            return Ok(json!({
                "results": [],
                "unsupported_source": source.tag(),
            }));
        };

        let path = format!("/find/{}", encode_segment(external_id));
        self.get(&path, &[("external_source", find_source.to_string())])
            .await
    }

    // -----------------------------------------------------------------------
    // Discovery
    // -----------------------------------------------------------------------

    pub async fn discover(&self, kind: MediaKind, params: &DiscoverParams) -> Result<Value> {
        params.validate()?;

        let mut upstream: Params = vec![
            ("page", params.page.unwrap_or(1).to_string()),
            (
                "sort_by",
                params
                    .sort_by
                    .clone()
                    .unwrap_or_else(|| "popularity.desc".to_string()),
            ),
        ];

        if let Some(min) = params.min_rating {
            upstream.push(("vote_average.gte", min.to_string()));
        }
        if let Some(max) = params.max_rating {
            upstream.push(("vote_average.lte", max.to_string()));
        }
        if let Some(year) = params.year {
            upstream.push((DiscoverParams::year_param(kind), year.to_string()));
        }

        let genres = params
            .genre
            .map(|g| g.to_string())
            .or_else(|| params.genres.clone().filter(|g| !g.trim().is_empty()));
        if let Some(genres) = genres {
            upstream.push(("with_genres", genres));
        }

        self.get(&format!("/discover/{kind}"), &upstream).await
    }

    pub async fn movie_list(&self, list: MovieList, page: u32) -> Result<Value> {
        self.get(list.path(), &[("page", page.to_string())]).await
    }

    pub async fn tv_list(&self, list: TvList, page: u32) -> Result<Value> {
        self.get(list.path(), &[("page", page.to_string())]).await
    }

    pub async fn trending(
        &self,
        media_type: TrendingMediaType,
        window: TimeWindow,
        page: u32,
    ) -> Result<Value> {
        let path = format!("/trending/{}/{}", media_type.as_str(), window.as_str());
        self.get(&path, &[("page", page.to_string())]).await
    }

    // -----------------------------------------------------------------------
    // Details
    // -----------------------------------------------------------------------

    /// Movie or show details with credits, images and videos bundled in.
    pub async fn details(&self, kind: MediaKind, id: u64) -> Result<Value> {
        self.get(
            &format!("/{kind}/{id}"),
            &[("append_to_response", DETAIL_APPEND.to_string())],
        )
        .await
    }

    pub async fn season(&self, show_id: u64, season_number: u32) -> Result<Value> {
        self.get(&format!("/tv/{show_id}/season/{season_number}"), &[])
            .await
    }

    pub async fn similar(&self, kind: MediaKind, id: u64, page: u32) -> Result<Value> {
        self.get(
            &format!("/{kind}/{id}/similar"),
            &[("page", page.to_string())],
        )
        .await
    }

    pub async fn person(&self, id: u64) -> Result<Value> {
        self.get(&format!("/person/{id}"), &[]).await
    }

    pub async fn person_credits(&self, id: u64) -> Result<Value> {
        self.get(&format!("/person/{id}/combined_credits"), &[])
            .await
    }

    pub async fn genres(&self, kind: MediaKind) -> Result<Value> {
        self.get(&format!("/genre/{kind}/list"), &[]).await
    }

    /// Image base URLs and sizes.
    pub async fn configuration(&self) -> Result<Value> {
        self.get("/configuration", &[]).await
    }
}

/// Percent-encode a value used as a single path segment.
fn encode_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push('%');
                out.push(char::from(HEX[(b >> 4) as usize]));
                out.push(char::from(HEX[(b & 0x0f) as usize]));
            }
        }
    }
    out
}

const HEX: [u8; 16] = *b"0123456789ABCDEF";

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn segment_encoding() {
        assert_eq!(encode_segment("tt0133093"), "tt0133093");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
    }

    #[test]
    fn empty_api_key_is_missing() {
        let client = CatalogClient::new(&CatalogConfig {
            api_key: Some(String::new()),
            ..Default::default()
        });
        assert!(client.api_key.is_none());
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_request() {
        let client = CatalogClient::new(&CatalogConfig {
            api_key: None,
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 1,
        });
        assert_matches!(client.configuration().await, Err(Error::MissingApiKey));
    }

    #[tokio::test]
    async fn unsupported_source_needs_no_upstream() {
        let client = CatalogClient::new(&CatalogConfig::default());
        let value = client
            .find_by_external_id("123", ExternalIdSource::Wikidata)
            .await
            .unwrap();
        assert_eq!(value["unsupported_source"], "wd");
        assert_eq!(value["results"], json!([]));
    }
}
