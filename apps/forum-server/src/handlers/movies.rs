//! Movie picker endpoints.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use reel_core::DomainError;
use reel_core::domain::{MovieSummary, SelectedMovie};
use reel_core::flows::suggest;
use reel_shared::dto::{MovieSuggestion, SelectedMovieResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub query: String,
}

fn suggestion(movie: &MovieSummary) -> MovieSuggestion {
    MovieSuggestion {
        id: movie.id,
        title: movie.title.clone(),
        label: movie.label(),
        poster_url: movie.poster_url(),
    }
}

/// GET /api/movies/search?query=
///
/// One immediate lookup. A blank query or a failed lookup yields no suggestions.
pub async fn search(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> HttpResponse {
    let query = params.into_inner().query;
    if query.is_empty() {
        return HttpResponse::Ok().json(Vec::<MovieSuggestion>::new());
    }

    let movies = match suggest(state.lookup.as_ref(), &query).await {
        Ok(movies) => movies,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching movie suggestions");
            Vec::new()
        }
    };

    let body: Vec<MovieSuggestion> = movies.iter().map(suggestion).collect();
    HttpResponse::Ok().json(body)
}

/// GET /api/movies/{id}
pub async fn details(state: web::Data<AppState>, path: web::Path<u64>) -> AppResult<HttpResponse> {
    let movie_id = path.into_inner();

    let details = state.lookup.details(movie_id).await.map_err(|e| {
        tracing::error!(movie_id, error = %e, "Error fetching movie details");
        DomainError::from(e)
    })?;

    let selected = SelectedMovie::from_details(&details);
    Ok(HttpResponse::Ok().json(SelectedMovieResponse {
        id: selected.id,
        title: selected.title,
        genres: selected.genres,
        poster_url: selected.poster_url,
    }))
}
