//! Embed URL construction.

use serde::Deserialize;

use crate::media::MediaKind;

/// Identifies a work on the embed provider plus cosmetic player options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbedRequest {
    /// Catalog (TMDB) id. Wins over `imdb` when both are set.
    pub tmdb: Option<String>,
    /// External (IMDb) id.
    pub imdb: Option<String>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub ds_lang: Option<String>,
    pub sub_url: Option<String>,
    pub autoplay: Option<u8>,
    pub autonext: Option<u8>,
}

impl EmbedRequest {
    /// The id used in the path form, catalog id first.
    pub fn id(&self) -> Option<&str> {
        self.tmdb_id().or_else(|| self.imdb_id())
    }

    pub fn tmdb_id(&self) -> Option<&str> {
        non_empty(&self.tmdb)
    }

    pub fn imdb_id(&self) -> Option<&str> {
        non_empty(&self.imdb)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Build the embed URL for `request` under `provider_base`
/// (e.g. `https://vidsrc-embed.ru`).
///
/// With an id the path form `.../embed/{kind}/{id}` is used; a TV request
/// with both season and episode becomes `.../embed/tv/{id}/{season}-{episode}`.
/// Without any id the options are appended as a query string instead.
pub fn build_embed_url(provider_base: &str, kind: MediaKind, request: &EmbedRequest) -> String {
    let base = format!("{provider_base}/embed/{kind}");

    let url = match request.id() {
        Some(id) => format!("{base}/{id}"),
        None => {
            let mut params: Vec<String> = Vec::new();
            if let Some(tmdb) = request.tmdb_id() {
                params.push(format!("tmdb={tmdb}"));
            }
            if let Some(imdb) = request.imdb_id() {
                params.push(format!("imdb={imdb}"));
            }
            if let Some(ref lang) = request.ds_lang {
                params.push(format!("ds_lang={lang}"));
            }
            if let Some(ref sub_url) = request.sub_url {
                params.push(format!("sub_url={sub_url}"));
            }
            if let Some(autoplay) = request.autoplay {
                params.push(format!("autoplay={autoplay}"));
            }
            if let Some(autonext) = request.autonext {
                params.push(format!("autonext={autonext}"));
            }

            if params.is_empty() {
                base.clone()
            } else {
                format!("{base}?{}", params.join("&"))
            }
        }
    };

    match (kind, request.season, request.episode, request.id()) {
        (MediaKind::Tv, Some(season), Some(episode), Some(id)) => {
            format!("{base}/{id}/{season}-{episode}")
        }
        _ => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://vidsrc-embed.ru";

    #[test]
    fn movie_by_catalog_id() {
        let request = EmbedRequest {
            tmdb: Some("603".into()),
            ..Default::default()
        };
        assert_eq!(
            build_embed_url(BASE, MediaKind::Movie, &request),
            "https://vidsrc-embed.ru/embed/movie/603"
        );
    }

    #[test]
    fn catalog_id_wins_over_external_id() {
        let request = EmbedRequest {
            tmdb: Some("603".into()),
            imdb: Some("tt0133093".into()),
            ..Default::default()
        };
        assert_eq!(
            build_embed_url(BASE, MediaKind::Movie, &request),
            "https://vidsrc-embed.ru/embed/movie/603"
        );
    }

    #[test]
    fn movie_by_external_id() {
        let request = EmbedRequest {
            imdb: Some("tt0133093".into()),
            ds_lang: Some("de".into()),
            ..Default::default()
        };
        assert_eq!(
            build_embed_url(BASE, MediaKind::Movie, &request),
            "https://vidsrc-embed.ru/embed/movie/tt0133093"
        );
    }

    #[test]
    fn tv_episode_suffix_overrides_options() {
        let request = EmbedRequest {
            tmdb: Some("1399".into()),
            season: Some(1),
            episode: Some(5),
            ds_lang: Some("en".into()),
            sub_url: Some("https://subs.example/e5.vtt".into()),
            autoplay: Some(1),
            autonext: Some(0),
            ..Default::default()
        };
        assert_eq!(
            build_embed_url(BASE, MediaKind::Tv, &request),
            "https://vidsrc-embed.ru/embed/tv/1399/1-5"
        );
    }

    #[test]
    fn tv_without_episode_is_show_url() {
        let request = EmbedRequest {
            tmdb: Some("1399".into()),
            season: Some(1),
            ..Default::default()
        };
        assert_eq!(
            build_embed_url(BASE, MediaKind::Tv, &request),
            "https://vidsrc-embed.ru/embed/tv/1399"
        );
    }

    #[test]
    fn season_episode_ignored_for_movies() {
        let request = EmbedRequest {
            tmdb: Some("603".into()),
            season: Some(1),
            episode: Some(2),
            ..Default::default()
        };
        assert_eq!(
            build_embed_url(BASE, MediaKind::Movie, &request),
            "https://vidsrc-embed.ru/embed/movie/603"
        );
    }

    #[test]
    fn bare_base_without_id_or_options() {
        assert_eq!(
            build_embed_url(BASE, MediaKind::Movie, &EmbedRequest::default()),
            "https://vidsrc-embed.ru/embed/movie"
        );
    }

    // Season and episode never reach the query form.
    #[test]
    fn options_become_query_string_without_id() {
        let request = EmbedRequest {
            ds_lang: Some("en".into()),
            autoplay: Some(1),
            autonext: Some(0),
            season: Some(2),
            episode: Some(3),
            ..Default::default()
        };
        assert_eq!(
            build_embed_url(BASE, MediaKind::Tv, &request),
            "https://vidsrc-embed.ru/embed/tv?ds_lang=en&autoplay=1&autonext=0"
        );
    }

    #[test]
    fn empty_ids_count_as_missing() {
        let request = EmbedRequest {
            tmdb: Some(String::new()),
            imdb: Some("tt0944947".into()),
            ..Default::default()
        };
        assert_eq!(request.id(), Some("tt0944947"));
    }
}
