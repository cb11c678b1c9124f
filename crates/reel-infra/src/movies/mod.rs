//! Movie lookup implementations.

#[cfg(feature = "remote")]
mod tmdb;

#[cfg(feature = "remote")]
pub use tmdb::TmdbClient;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB API settings.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_TMDB_BASE_URL.to_string(),
        }
    }
}
