use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RowId, null_as_default};

/// Length of the content preview shown on list cards.
const EXCERPT_CHARS: usize = 150;

/// Post entity - a review of one movie.
///
/// `movie_title` and `genres` are a snapshot of the movie metadata taken when
/// the post was created; they are never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: RowId,
    #[serde(deserialize_with = "movie_id_text")]
    pub movie_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub movie_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub username: String,
    /// Plaintext shared secret gating edit and delete.
    pub password: String,
    pub rating: u8,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvotes: u32,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Content preview for list cards, cut at 150 characters.
    pub fn excerpt(&self) -> String {
        let content = self.content.as_deref().unwrap_or_default();
        if content.chars().count() > EXCERPT_CHARS {
            let cut: String = content.chars().take(EXCERPT_CHARS).collect();
            format!("{cut}...")
        } else {
            content.to_string()
        }
    }

    /// Exact, case-sensitive comparison against the stored credentials.
    pub fn credentials_match(&self, username: &str, secret: &str) -> bool {
        self.username == username && self.password == secret
    }
}

fn movie_id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    RowId::deserialize(deserializer).map(|id| id.as_str().to_string())
}

/// Insert payload for a new post. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPost {
    pub movie_id: String,
    pub movie_title: String,
    pub genres: String,
    pub title: String,
    pub content: String,
    pub username: String,
    pub password: String,
    pub rating: u8,
    pub url: Option<String>,
    pub upvotes: u32,
}

/// Full-field overwrite applied by the owner's edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostEdit {
    pub title: String,
    pub content: String,
    pub rating: u8,
    pub url: Option<String>,
}
