use crate::catalog::query::{
    DiscoverParams, MovieList, PageParams, SearchParams, TimeWindow, TrendingMediaType, TvList,
};
use crate::error::Error;
use crate::media::MediaKind;
use crate::server::AppContext;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

type JsonResult = Result<Json<Value>, Error>;

pub fn catalog_routes() -> Router<AppContext> {
    Router::new()
        .route("/search", get(search))
        .route("/discover/:kind", get(discover))
        .route("/popular", get(popular))
        .route("/movie/popular", get(movie_popular))
        .route("/movie/top_rated", get(movie_top_rated))
        .route("/movie/upcoming", get(movie_upcoming))
        .route("/movie/now_playing", get(movie_now_playing))
        .route("/tv/popular", get(tv_popular))
        .route("/tv/top_rated", get(tv_top_rated))
        .route("/tv/on_the_air", get(tv_on_the_air))
        .route("/tv/airing_today", get(tv_airing_today))
        .route("/trending/:media_type/:time_window", get(trending))
        .route("/movie/:id", get(movie_details))
        .route("/movie/:id/similar", get(movie_similar))
        .route("/tv/:id", get(tv_details))
        .route("/tv/:id/similar", get(tv_similar))
        .route("/tv/:id/season/:season", get(season))
        .route("/person/:id", get(person))
        .route("/person/:id/combined_credits", get(person_credits))
        .route("/genres/:kind", get(genres))
        .route("/image_base", get(image_base))
}

async fn search(State(ctx): State<AppContext>, Query(params): Query<SearchParams>) -> JsonResult {
    Ok(Json(ctx.catalog.search(&params).await?))
}

async fn discover(
    State(ctx): State<AppContext>,
    Path(kind): Path<MediaKind>,
    Query(params): Query<DiscoverParams>,
) -> JsonResult {
    Ok(Json(ctx.catalog.discover(kind, &params).await?))
}

// ---------------------------------------------------------------------------
// Curated lists
// ---------------------------------------------------------------------------

async fn movie_list(ctx: AppContext, list: MovieList, params: PageParams) -> JsonResult {
    Ok(Json(ctx.catalog.movie_list(list, params.resolve()?).await?))
}

async fn tv_list(ctx: AppContext, list: TvList, params: PageParams) -> JsonResult {
    Ok(Json(ctx.catalog.tv_list(list, params.resolve()?).await?))
}

async fn popular(State(ctx): State<AppContext>, Query(params): Query<PageParams>) -> JsonResult {
    movie_list(ctx, MovieList::Popular, params).await
}

async fn movie_popular(
    State(ctx): State<AppContext>,
    Query(params): Query<PageParams>,
) -> JsonResult {
    movie_list(ctx, MovieList::Popular, params).await
}

async fn movie_top_rated(
    State(ctx): State<AppContext>,
    Query(params): Query<PageParams>,
) -> JsonResult {
    movie_list(ctx, MovieList::TopRated, params).await
}

async fn movie_upcoming(
    State(ctx): State<AppContext>,
    Query(params): Query<PageParams>,
) -> JsonResult {
    movie_list(ctx, MovieList::Upcoming, params).await
}

async fn movie_now_playing(
    State(ctx): State<AppContext>,
    Query(params): Query<PageParams>,
) -> JsonResult {
    movie_list(ctx, MovieList::NowPlaying, params).await
}

async fn tv_popular(State(ctx): State<AppContext>, Query(params): Query<PageParams>) -> JsonResult {
    tv_list(ctx, TvList::Popular, params).await
}

async fn tv_top_rated(
    State(ctx): State<AppContext>,
    Query(params): Query<PageParams>,
) -> JsonResult {
    tv_list(ctx, TvList::TopRated, params).await
}

async fn tv_on_the_air(
    State(ctx): State<AppContext>,
    Query(params): Query<PageParams>,
) -> JsonResult {
    tv_list(ctx, TvList::OnTheAir, params).await
}

async fn tv_airing_today(
    State(ctx): State<AppContext>,
    Query(params): Query<PageParams>,
) -> JsonResult {
    tv_list(ctx, TvList::AiringToday, params).await
}

async fn trending(
    State(ctx): State<AppContext>,
    Path((media_type, window)): Path<(TrendingMediaType, TimeWindow)>,
    Query(params): Query<PageParams>,
) -> JsonResult {
    let page = params.resolve()?;
    Ok(Json(ctx.catalog.trending(media_type, window, page).await?))
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

async fn movie_details(State(ctx): State<AppContext>, Path(id): Path<u64>) -> JsonResult {
    Ok(Json(ctx.catalog.details(MediaKind::Movie, id).await?))
}

async fn tv_details(State(ctx): State<AppContext>, Path(id): Path<u64>) -> JsonResult {
    Ok(Json(ctx.catalog.details(MediaKind::Tv, id).await?))
}

async fn movie_similar(
    State(ctx): State<AppContext>,
    Path(id): Path<u64>,
    Query(params): Query<PageParams>,
) -> JsonResult {
    let page = params.resolve()?;
    Ok(Json(ctx.catalog.similar(MediaKind::Movie, id, page).await?))
}

async fn tv_similar(
    State(ctx): State<AppContext>,
    Path(id): Path<u64>,
    Query(params): Query<PageParams>,
) -> JsonResult {
    let page = params.resolve()?;
    Ok(Json(ctx.catalog.similar(MediaKind::Tv, id, page).await?))
}

async fn season(
    State(ctx): State<AppContext>,
    Path((id, season_number)): Path<(u64, u32)>,
) -> JsonResult {
    Ok(Json(ctx.catalog.season(id, season_number).await?))
}

async fn person(State(ctx): State<AppContext>, Path(id): Path<u64>) -> JsonResult {
    Ok(Json(ctx.catalog.person(id).await?))
}

async fn person_credits(State(ctx): State<AppContext>, Path(id): Path<u64>) -> JsonResult {
    Ok(Json(ctx.catalog.person_credits(id).await?))
}

async fn genres(State(ctx): State<AppContext>, Path(kind): Path<MediaKind>) -> JsonResult {
    Ok(Json(ctx.catalog.genres(kind).await?))
}

async fn image_base(State(ctx): State<AppContext>) -> JsonResult {
    Ok(Json(ctx.catalog.configuration().await?))
}
