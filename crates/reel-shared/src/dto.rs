//! Data Transfer Objects - request/response types for the API.
//!
//! Post secrets never appear in a response type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One movie suggestion under the search box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSuggestion {
    pub id: u64,
    pub title: String,
    /// `Title (YYYY)`.
    pub label: String,
    pub poster_url: Option<String>,
}

/// Movie snapshot attached to a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedMovieResponse {
    pub id: u64,
    pub title: String,
    pub genres: String,
    pub poster_url: Option<String>,
}

/// Request to publish a review. Every field may be blank; the server decides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePostRequest {
    pub movie_id: Option<u64>,
    pub title: String,
    pub content: String,
    pub username: String,
    pub secret: String,
    pub rating: String,
    pub image_url: String,
}

/// Username and shared secret of a post's author.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsRequest {
    pub username: String,
    pub secret: String,
}

/// Owner edit: credentials plus the overwritten fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePostRequest {
    pub username: String,
    pub secret: String,
    pub title: String,
    pub content: String,
    pub rating: String,
    pub url: String,
}

/// Owner delete. Nothing happens unless `confirm` is true.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeletePostRequest {
    pub username: String,
    pub secret: String,
    pub confirm: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateCommentRequest {
    pub username: String,
    pub content: String,
}

/// A review as shown on the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCardResponse {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub movie_id: String,
    pub movie_title: String,
    pub genres: String,
    pub username: String,
    pub rating: u8,
    pub url: Option<String>,
    pub upvotes: u32,
    pub comment_count: usize,
    pub created_at: DateTime<Utc>,
}

/// A review as shown on its own page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub movie_id: String,
    pub movie_title: String,
    pub genres: String,
    pub username: String,
    pub rating: u8,
    pub url: Option<String>,
    pub upvotes: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpvoteResponse {
    pub id: String,
    pub upvotes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockResponse {
    pub authorized: bool,
}
