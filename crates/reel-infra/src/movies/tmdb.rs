//! TMDB movie lookup client.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use reel_core::domain::{MovieDetails, MovieSummary};
use reel_core::error::LookupError;
use reel_core::ports::MovieLookup;

use super::TmdbConfig;

/// Read-only TMDB client. One request per call; no retry, no cache.
pub struct TmdbClient {
    client: Client,
    config: TmdbConfig,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    id: u64,
    #[serde(default)]
    title: String,
    release_date: Option<String>,
    poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbDetails {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    genres: Vec<TmdbGenre>,
    poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    name: String,
}

impl From<TmdbMovie> for MovieSummary {
    fn from(movie: TmdbMovie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            release_date: movie.release_date,
            poster_path: movie.poster_path,
        }
    }
}

impl From<TmdbDetails> for MovieDetails {
    fn from(details: TmdbDetails) -> Self {
        Self {
            id: details.id,
            title: details.title,
            genre_names: details.genres.into_iter().map(|g| g.name).collect(),
            poster_path: details.poster_path,
        }
    }
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let response: Response = self
            .client
            .get(self.url(path))
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path = %path, status = %status, "TMDB request failed");
            return Err(LookupError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MovieLookup for TmdbClient {
    async fn search_by_title(&self, query: &str) -> Result<Vec<MovieSummary>, LookupError> {
        let page: SearchPage = self.get("/search/movie", &[("query", query)]).await?;
        Ok(page.results.into_iter().map(Into::into).collect())
    }

    async fn details(&self, movie_id: u64) -> Result<MovieDetails, LookupError> {
        let details: TmdbDetails = self.get(&format!("/movie/{movie_id}"), &[]).await?;
        Ok(details.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_search_page() {
        let page: SearchPage = serde_json::from_value(json!({
            "page": 1,
            "results": [
                { "id": 603, "title": "The Matrix", "release_date": "1999-03-30",
                  "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg", "popularity": 80.1 },
                { "id": 624860, "title": "The Matrix Resurrections", "release_date": "",
                  "poster_path": null }
            ],
            "total_results": 2
        }))
        .unwrap();

        let movies: Vec<MovieSummary> = page.results.into_iter().map(Into::into).collect();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].label(), "The Matrix (1999)");
        assert_eq!(movies[1].label(), "The Matrix Resurrections ()");
        assert_eq!(movies[1].poster_path, None);
    }

    #[test]
    fn decodes_details_genres_in_order() {
        let details: TmdbDetails = serde_json::from_value(json!({
            "id": 603,
            "title": "The Matrix",
            "genres": [ { "id": 28, "name": "Action" }, { "id": 878, "name": "Science Fiction" } ],
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "runtime": 136
        }))
        .unwrap();

        let details: MovieDetails = details.into();
        assert_eq!(details.genre_names, vec!["Action", "Science Fiction"]);
    }

    #[test]
    fn joins_paths_onto_base_url() {
        let client = TmdbClient::new(TmdbConfig {
            api_key: "key".to_string(),
            base_url: "https://api.themoviedb.org/3/".to_string(),
        });
        assert_eq!(
            client.url("/movie/603"),
            "https://api.themoviedb.org/3/movie/603"
        );
    }
}
