//! Cross-origin policy for the front end.

use axum::http::request::Parts;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

use crate::config::ServerConfig;

/// Local dev servers allowed when running in `development`.
const DEV_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:3000",
];

/// Production front end, always allowed.
const PRODUCTION_ORIGIN: &str = "https://vod.losingsanity.com";

const RENDER_SUFFIX: &str = ".onrender.com";

/// Resolved origin policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPolicy {
    /// Nothing configured outside development: default-open.
    AnyOrigin,
    /// Explicit list, optionally widened to every `https://*.onrender.com`.
    List {
        origins: Vec<String>,
        allow_render: bool,
    },
}

impl OriginPolicy {
    pub fn from_config(config: &ServerConfig) -> Self {
        let mut origins = config.allowed_origins.clone();

        if config.is_development() {
            origins.extend(DEV_ORIGINS.iter().map(|o| o.to_string()));
        }
        if origins.is_empty() {
            return OriginPolicy::AnyOrigin;
        }
        origins.push(PRODUCTION_ORIGIN.to_string());

        origins.sort();
        origins.dedup();
        let allow_render = origins.iter().any(|o| o.contains("onrender.com"));
        OriginPolicy::List {
            origins,
            allow_render,
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        match self {
            OriginPolicy::AnyOrigin => true,
            OriginPolicy::List {
                origins,
                allow_render,
            } => {
                origins.iter().any(|o| o == origin)
                    || (*allow_render && is_render_origin(origin))
            }
        }
    }
}

fn is_render_origin(origin: &str) -> bool {
    origin
        .strip_prefix("https://")
        .and_then(|host| host.strip_suffix(RENDER_SUFFIX))
        .is_some_and(|sub| !sub.is_empty())
}

pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let policy = OriginPolicy::from_config(config);
    tracing::info!("CORS environment: {}", config.environment);
    tracing::info!("CORS policy: {:?}", policy);

    match policy {
        OriginPolicy::AnyOrigin => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        policy @ OriginPolicy::List { .. } => CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(
                move |origin: &HeaderValue, _parts: &Parts| {
                    origin.to_str().is_ok_and(|o| policy.allows(o))
                },
            ))
            .allow_methods(AllowMethods::list([Method::GET, Method::OPTIONS]))
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true),
    }
}
