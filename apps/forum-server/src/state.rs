//! Application state - shared across all handlers.

use std::sync::Arc;

use async_trait::async_trait;
use reel_core::ReviewStore;
use reel_core::domain::{MovieDetails, MovieSummary};
use reel_core::error::LookupError;
use reel_core::ports::{MovieLookup, RowStore};
use reel_infra::InMemoryRowStore;

use crate::config::AppConfig;

#[cfg(feature = "remote")]
use reel_infra::{PostgrestStore, TmdbClient};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: ReviewStore,
    pub lookup: Arc<dyn MovieLookup>,
}

/// Movie lookup used when no API key is configured. Every call fails.
pub struct UnconfiguredMovieLookup;

#[async_trait]
impl MovieLookup for UnconfiguredMovieLookup {
    async fn search_by_title(&self, _query: &str) -> Result<Vec<MovieSummary>, LookupError> {
        tracing::warn!("Movie lookup not configured - set TMDB_API_KEY");
        Err(LookupError::NotConfigured)
    }

    async fn details(&self, _movie_id: u64) -> Result<MovieDetails, LookupError> {
        tracing::warn!("Movie lookup not configured - set TMDB_API_KEY");
        Err(LookupError::NotConfigured)
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "remote")]
        let (rows, lookup): (Arc<dyn RowStore>, Arc<dyn MovieLookup>) = {
            let rows: Arc<dyn RowStore> = match &config.store {
                Some(store) => Arc::new(PostgrestStore::new(store)),
                None => {
                    tracing::warn!(
                        "SUPABASE_URL not set. Running without hosted store (in-memory mode)."
                    );
                    Arc::new(InMemoryRowStore::new())
                }
            };
            let lookup: Arc<dyn MovieLookup> = match &config.tmdb {
                Some(tmdb) => Arc::new(TmdbClient::new(tmdb.clone())),
                None => {
                    tracing::warn!("TMDB_API_KEY not set. Movie search is disabled.");
                    Arc::new(UnconfiguredMovieLookup)
                }
            };
            (rows, lookup)
        };

        #[cfg(not(feature = "remote"))]
        let (rows, lookup): (Arc<dyn RowStore>, Arc<dyn MovieLookup>) = {
            let _ = config;
            tracing::info!("Running without remote feature - in-memory store, no movie lookup");
            (
                Arc::new(InMemoryRowStore::new()),
                Arc::new(UnconfiguredMovieLookup),
            )
        };

        tracing::info!("Application state initialized");

        Self::with_ports(rows, lookup)
    }

    pub fn with_ports(rows: Arc<dyn RowStore>, lookup: Arc<dyn MovieLookup>) -> Self {
        Self {
            store: ReviewStore::new(rows),
            lookup,
        }
    }
}
