//! The create-review screen: movie picker plus review form.

use std::sync::Arc;

use crate::domain::{MovieSummary, ReviewForm, SelectedMovie};
use crate::error::DomainError;
use crate::flows::{MovieSearch, Notice};
use crate::ports::MovieLookup;
use crate::store::ReviewStore;
use crate::validation::validate_review;

/// State of the create-review form.
///
/// The flow moves between searching (typing in the movie box) and selected
/// (a suggestion was picked). Any edit to the movie box drops the selection.
pub struct CreateReviewFlow {
    store: ReviewStore,
    lookup: Arc<dyn MovieLookup>,
    search: MovieSearch,
    query: String,
    selected: Option<SelectedMovie>,
    pub form: ReviewForm,
}

impl CreateReviewFlow {
    pub fn new(store: ReviewStore, lookup: Arc<dyn MovieLookup>) -> Self {
        let search = MovieSearch::new(Arc::clone(&lookup));
        Self::with_search(store, lookup, search)
    }

    /// Build with a custom search, e.g. a different debounce.
    pub fn with_search(
        store: ReviewStore,
        lookup: Arc<dyn MovieLookup>,
        search: MovieSearch,
    ) -> Self {
        Self {
            store,
            lookup,
            search,
            query: String::new(),
            selected: None,
            form: ReviewForm::default(),
        }
    }

    /// Text currently in the movie box.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> Option<&SelectedMovie> {
        self.selected.as_ref()
    }

    pub fn suggestions(&self) -> Vec<MovieSummary> {
        self.search.suggestions()
    }

    pub fn search(&self) -> &MovieSearch {
        &self.search
    }

    /// The user edited the movie box.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.selected = None;
        self.search.input(&self.query);
    }

    /// The user picked a suggestion.
    ///
    /// On lookup failure the error is logged and the form is left untouched.
    pub async fn select_movie(&mut self, movie: &MovieSummary) -> Result<(), DomainError> {
        let details = match self.lookup.details(movie.id).await {
            Ok(details) => details,
            Err(e) => {
                tracing::error!(movie_id = movie.id, error = %e, "Error fetching movie details");
                return Err(e.into());
            }
        };

        self.selected = Some(SelectedMovie::new(movie, &details));
        self.query = movie.title.clone();
        self.search.clear();
        Ok(())
    }

    /// Select a movie known only by id, e.g. from a client that ran its own
    /// search. Title and poster come from the detail record.
    pub async fn select_movie_id(&mut self, movie_id: u64) -> Result<(), DomainError> {
        let details = match self.lookup.details(movie_id).await {
            Ok(details) => details,
            Err(e) => {
                tracing::error!(movie_id, error = %e, "Error fetching movie details");
                return Err(e.into());
            }
        };

        let selected = SelectedMovie::from_details(&details);
        self.query = selected.title.clone();
        self.selected = Some(selected);
        self.search.clear();
        Ok(())
    }

    /// Validate and insert the review.
    ///
    /// Validation failures block before any write. A store failure keeps every
    /// field so the user can retry; success resets the whole form.
    pub async fn submit(&mut self) -> Result<Notice, DomainError> {
        let post = validate_review(&self.form, self.selected.as_ref())?;

        if let Err(e) = self.store.insert_post(&post).await {
            tracing::error!(error = %e, "Error inserting post");
            return Err(e.into());
        }

        tracing::info!(movie_id = %post.movie_id, "Review submitted");
        self.reset();
        Ok(Notice::PostSubmitted)
    }

    fn reset(&mut self) {
        self.form = ReviewForm::default();
        self.selected = None;
        self.query.clear();
        self.search.clear();
    }
}
