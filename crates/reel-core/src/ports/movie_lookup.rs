use async_trait::async_trait;

use crate::domain::{MovieDetails, MovieSummary};
use crate::error::LookupError;

/// Read-only access to the third-party movie database.
///
/// Implementations neither retry nor cache; every call is one request.
#[async_trait]
pub trait MovieLookup: Send + Sync {
    /// Ranked title matches for free-text `query`.
    async fn search_by_title(&self, query: &str) -> Result<Vec<MovieSummary>, LookupError>;

    /// Genre names and poster for a single movie.
    async fn details(&self, movie_id: u64) -> Result<MovieDetails, LookupError>;
}
