//! Query parameter types accepted by the catalog routes.
//!
//! Unknown enum tags (except the search `type`) are rejected by the
//! `Query`/`Path` extractors with a 400 before any handler runs.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::media::MediaKind;

/// What kind of record a free-text search targets.
///
/// Any other `type` value (the front end sends `All`) is a multi search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Movie,
    Tv,
    Person,
    #[default]
    #[serde(other)]
    All,
}

/// Foreign identifier namespaces accepted by the `exid` search parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ExternalIdSource {
    #[serde(rename = "tmdb")]
    Tmdb,
    #[serde(rename = "imdb")]
    Imdb,
    #[serde(rename = "fb")]
    Facebook,
    #[serde(rename = "ig")]
    Instagram,
    #[serde(rename = "tvdb")]
    TheTvdb,
    #[serde(rename = "tt")]
    TwitterLegacy,
    #[serde(rename = "x")]
    Twitter,
    #[serde(rename = "wd")]
    Wikidata,
    #[serde(rename = "yt")]
    Youtube,
}

impl ExternalIdSource {
    /// Tag as it appears in the query string.
    pub fn tag(&self) -> &'static str {
        match self {
            ExternalIdSource::Tmdb => "tmdb",
            ExternalIdSource::Imdb => "imdb",
            ExternalIdSource::Facebook => "fb",
            ExternalIdSource::Instagram => "ig",
            ExternalIdSource::TheTvdb => "tvdb",
            ExternalIdSource::TwitterLegacy => "tt",
            ExternalIdSource::Twitter => "x",
            ExternalIdSource::Wikidata => "wd",
            ExternalIdSource::Youtube => "yt",
        }
    }

    /// `external_source` value for the find endpoint, or `None` when no
    /// resolution strategy exists for this namespace.
    pub fn find_source(&self) -> Option<&'static str> {
        match self {
            ExternalIdSource::Imdb => Some("imdb_id"),
            _ => None,
        }
    }
}

/// Client-side ordering applied to a result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Relevance,
    TitleAsc,
    TitleDesc,
    RatingDesc,
    RatingAsc,
    DateDesc,
    DateAsc,
    PopularityDesc,
}

/// `GET /tmdb/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub page: Option<u32>,
    #[serde(rename = "type", default)]
    pub kind: SearchKind,
    pub year: Option<u16>,
    pub exid: Option<ExternalIdSource>,
    #[serde(default)]
    pub sort_by: SortKey,
    pub min_rating: Option<f64>,
    pub genre: Option<u64>,
}

impl SearchParams {
    pub fn validate(&self) -> Result<()> {
        validate_page(self.page)?;
        validate_year(self.year)?;
        validate_rating("min_rating", self.min_rating)
    }
}

/// `GET /tmdb/discover/{kind}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoverParams {
    pub page: Option<u32>,
    pub sort_by: Option<String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub year: Option<u16>,
    pub genre: Option<u64>,
    /// Comma-separated genre ids, used only when `genre` is absent.
    pub genres: Option<String>,
}

impl DiscoverParams {
    pub fn validate(&self) -> Result<()> {
        validate_page(self.page)?;
        validate_year(self.year)?;
        validate_rating("min_rating", self.min_rating)?;
        validate_rating("max_rating", self.max_rating)
    }

    /// Upstream parameter name carrying the release year for `kind`.
    pub fn year_param(kind: MediaKind) -> &'static str {
        match kind {
            MediaKind::Movie => "primary_release_year",
            MediaKind::Tv => "first_air_date_year",
        }
    }
}

/// Optional `?page=` on list routes.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
}

impl PageParams {
    pub fn resolve(&self) -> Result<u32> {
        validate_page(self.page)?;
        Ok(self.page.unwrap_or(1))
    }
}

/// Curated movie lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieList {
    Popular,
    TopRated,
    Upcoming,
    NowPlaying,
}

impl MovieList {
    pub fn path(&self) -> &'static str {
        match self {
            MovieList::Popular => "/movie/popular",
            MovieList::TopRated => "/movie/top_rated",
            MovieList::Upcoming => "/movie/upcoming",
            MovieList::NowPlaying => "/movie/now_playing",
        }
    }
}

/// Curated TV lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvList {
    Popular,
    TopRated,
    OnTheAir,
    AiringToday,
}

impl TvList {
    pub fn path(&self) -> &'static str {
        match self {
            TvList::Popular => "/tv/popular",
            TvList::TopRated => "/tv/top_rated",
            TvList::OnTheAir => "/tv/on_the_air",
            TvList::AiringToday => "/tv/airing_today",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingMediaType {
    All,
    Movie,
    Tv,
    Person,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    Week,
}

impl TrendingMediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingMediaType::All => "all",
            TrendingMediaType::Movie => "movie",
            TrendingMediaType::Tv => "tv",
            TrendingMediaType::Person => "person",
        }
    }
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

fn validate_page(page: Option<u32>) -> Result<()> {
    match page {
        Some(0) => Err(Error::Validation("page must be >= 1".into())),
        _ => Ok(()),
    }
}

fn validate_year(year: Option<u16>) -> Result<()> {
    match year {
        Some(y) if !(1000..=9999).contains(&y) => Err(Error::Validation(format!(
            "year must be a 4-digit year, got {y}"
        ))),
        _ => Ok(()),
    }
}

fn validate_rating(name: &str, rating: Option<f64>) -> Result<()> {
    match rating {
        Some(r) if !(0.0..=10.0).contains(&r) => Err(Error::Validation(format!(
            "{name} must be between 0 and 10, got {r}"
        ))),
        _ => Ok(()),
    }
}
