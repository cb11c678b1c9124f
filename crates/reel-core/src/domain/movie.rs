use serde::{Deserialize, Serialize};

/// Image CDN prefix for poster thumbnails.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w200";

/// One ranked hit from a title search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
}

impl MovieSummary {
    /// Four-character year prefix of the release date, if any.
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .filter(|year| !year.is_empty())
    }

    /// Suggestion label, e.g. `Alien (1979)`. The year is blank when unknown.
    pub fn label(&self) -> String {
        format!("{} ({})", self.title, self.release_year().unwrap_or_default())
    }

    pub fn poster_url(&self) -> Option<String> {
        poster_url(self.poster_path.as_deref())
    }
}

/// Detail record for a single movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub genre_names: Vec<String>,
    pub poster_path: Option<String>,
}

/// The movie attached to a review being written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedMovie {
    pub id: u64,
    pub title: String,
    /// Genre names joined with `", "`.
    pub genres: String,
    pub poster_url: Option<String>,
}

impl SelectedMovie {
    /// Selection made from a search suggestion: title and poster come from
    /// the suggestion, genres from the detail lookup.
    pub fn new(summary: &MovieSummary, details: &MovieDetails) -> Self {
        Self {
            id: summary.id,
            title: summary.title.clone(),
            genres: details.genre_names.join(", "),
            poster_url: summary.poster_url(),
        }
    }

    /// Selection made from a bare movie id.
    pub fn from_details(details: &MovieDetails) -> Self {
        Self {
            id: details.id,
            title: details.title.clone(),
            genres: details.genre_names.join(", "),
            poster_url: poster_url(details.poster_path.as_deref()),
        }
    }
}

fn poster_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{POSTER_BASE_URL}{p}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alien() -> MovieSummary {
        MovieSummary {
            id: 348,
            title: "Alien".to_string(),
            release_date: Some("1979-05-25".to_string()),
            poster_path: Some("/vfrQk5IPloGg1v9Rzbh2Eg3VGyM.jpg".to_string()),
        }
    }

    #[test]
    fn label_includes_year_when_known() {
        let mut movie = alien();
        assert_eq!(movie.label(), "Alien (1979)");

        movie.release_date = None;
        assert_eq!(movie.label(), "Alien ()");

        movie.release_date = Some(String::new());
        assert_eq!(movie.label(), "Alien ()");
    }

    #[test]
    fn selection_joins_genres_and_builds_poster() {
        let details = MovieDetails {
            id: 348,
            title: "Alien".to_string(),
            genre_names: vec!["Horror".to_string(), "Science Fiction".to_string()],
            poster_path: None,
        };

        let selected = SelectedMovie::new(&alien(), &details);
        assert_eq!(selected.genres, "Horror, Science Fiction");
        assert_eq!(
            selected.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w200/vfrQk5IPloGg1v9Rzbh2Eg3VGyM.jpg")
        );

        let bare = SelectedMovie::from_details(&details);
        assert_eq!(bare.poster_url, None);
    }
}
