//! Raw form input, exactly as typed by the user.

use serde::{Deserialize, Serialize};

use super::Post;

/// Fields of the create-review form, excluding the movie picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewForm {
    pub title: String,
    pub content: String,
    pub username: String,
    pub secret: String,
    /// Selected rating, empty until one is chosen.
    pub rating: String,
    pub image_url: String,
}

/// Fields of the owner's edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditForm {
    pub title: String,
    pub content: String,
    pub rating: String,
    pub url: String,
}

impl EditForm {
    /// Pre-populate from the post's current values.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone().unwrap_or_default(),
            rating: post.rating.to_string(),
            url: post.url.clone().unwrap_or_default(),
        }
    }
}

/// Pending comment input on the detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDraft {
    pub username: String,
    pub content: String,
}
