use crate::catalog::query::PageParams;
use crate::embed::{Availability, EmbedRequest};
use crate::error::Error;
use crate::media::MediaKind;
use crate::server::AppContext;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

pub fn embed_routes() -> Router<AppContext> {
    Router::new()
        .route("/embed/movie", get(embed_movie))
        .route("/embed/tv", get(embed_tv))
        .route("/check/movie", get(check_movie))
        .route("/check/tv", get(check_tv))
        .route("/latest/movies", get(latest_movies))
        .route("/latest/tvshows", get(latest_tvshows))
}

#[derive(Serialize)]
struct EmbedResponse {
    embed_url: String,
}

#[derive(Serialize)]
struct CheckResponse {
    embed_url: String,
    kind: MediaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    tmdb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    imdb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    season: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    episode: Option<u32>,
    #[serde(flatten)]
    availability: Availability,
}

/// Movies carry no season/episode or autonext.
fn movie_request(mut request: EmbedRequest) -> EmbedRequest {
    request.season = None;
    request.episode = None;
    request.autonext = None;
    request
}

async fn embed_movie(
    State(ctx): State<AppContext>,
    Query(request): Query<EmbedRequest>,
) -> Json<EmbedResponse> {
    let request = movie_request(request);
    Json(EmbedResponse {
        embed_url: ctx.embed.embed_url(MediaKind::Movie, &request),
    })
}

async fn embed_tv(
    State(ctx): State<AppContext>,
    Query(request): Query<EmbedRequest>,
) -> Json<EmbedResponse> {
    Json(EmbedResponse {
        embed_url: ctx.embed.embed_url(MediaKind::Tv, &request),
    })
}

async fn check(
    ctx: AppContext,
    kind: MediaKind,
    request: EmbedRequest,
) -> Result<Json<CheckResponse>, Error> {
    if request.id().is_none() {
        return Err(Error::Validation(
            "either tmdb or imdb must be provided".to_string(),
        ));
    }

    let embed_url = ctx.embed.embed_url(kind, &request);
    let availability = ctx.embed.probe(&embed_url).await;

    Ok(Json(CheckResponse {
        embed_url,
        kind,
        tmdb: request.tmdb_id().map(String::from),
        imdb: request.imdb_id().map(String::from),
        season: request.season,
        episode: request.episode,
        availability,
    }))
}

async fn check_movie(
    State(ctx): State<AppContext>,
    Query(request): Query<EmbedRequest>,
) -> Result<Json<CheckResponse>, Error> {
    check(ctx, MediaKind::Movie, movie_request(request)).await
}

async fn check_tv(
    State(ctx): State<AppContext>,
    Query(request): Query<EmbedRequest>,
) -> Result<Json<CheckResponse>, Error> {
    check(ctx, MediaKind::Tv, request).await
}

async fn latest_movies(
    State(ctx): State<AppContext>,
    Query(params): Query<PageParams>,
) -> Result<Json<Value>, Error> {
    let page = params.resolve()?;
    Ok(Json(ctx.embed.latest(MediaKind::Movie, page).await?))
}

async fn latest_tvshows(
    State(ctx): State<AppContext>,
    Query(params): Query<PageParams>,
) -> Result<Json<Value>, Error> {
    let page = params.resolve()?;
    Ok(Json(ctx.embed.latest(MediaKind::Tv, page).await?))
}
