use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub embed: EmbedConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Front-end origins allowed for cross-origin requests
    /// (empty = allow any origin unless dev/production defaults add some)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Deployment environment; `development` adds the local dev origins
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_environment() -> String {
    "development".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            environment: default_environment(),
        }
    }
}

impl ServerConfig {
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// TMDB v3 API key. Missing keys only fail on the first catalog call.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,

    #[serde(default = "default_catalog_timeout")]
    pub timeout_secs: u64,
}

fn default_catalog_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}
fn default_catalog_timeout() -> u64 {
    10
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_catalog_base_url(),
            timeout_secs: default_catalog_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbedConfig {
    /// Embed provider hostname (optionally with port)
    #[serde(default = "default_embed_domain")]
    pub domain: String,

    #[serde(default = "default_embed_scheme")]
    pub scheme: String,

    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    #[serde(default = "default_feed_timeout")]
    pub feed_timeout_secs: u64,
}

fn default_embed_domain() -> String {
    "vidsrc-embed.ru".to_string()
}
fn default_embed_scheme() -> String {
    "https".to_string()
}
fn default_probe_timeout() -> u64 {
    15
}
fn default_feed_timeout() -> u64 {
    10
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            domain: default_embed_domain(),
            scheme: default_embed_scheme(),
            probe_timeout_secs: default_probe_timeout(),
            feed_timeout_secs: default_feed_timeout(),
        }
    }
}

impl EmbedConfig {
    /// Provider root without a trailing slash, e.g. `https://vidsrc-embed.ru`.
    pub fn provider_base(&self) -> String {
        format!(
            "{}://{}",
            self.scheme,
            self.domain.trim_end_matches('/')
        )
    }
}
