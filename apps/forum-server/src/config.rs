//! Application configuration loaded from environment variables.

use std::env;

use reel_infra::movies::DEFAULT_TMDB_BASE_URL;
use reel_infra::{PostgrestConfig, TmdbConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Hosted row store; `None` runs on the in-memory store.
    pub store: Option<PostgrestConfig>,
    /// Movie lookup; `None` disables search and selection.
    pub tmdb: Option<TmdbConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let store = non_empty("SUPABASE_URL").and_then(|url| {
            let Some(api_key) = non_empty("SUPABASE_KEY") else {
                tracing::warn!("SUPABASE_URL is set but SUPABASE_KEY is missing");
                return None;
            };
            Some(PostgrestConfig { url, api_key })
        });

        let tmdb = non_empty("TMDB_API_KEY").map(|api_key| TmdbConfig {
            api_key,
            base_url: non_empty("TMDB_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string()),
        });

        Self {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            store,
            tmdb,
        }
    }
}
