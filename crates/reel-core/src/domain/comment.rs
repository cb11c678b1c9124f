use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RowId;

/// Comment entity - a reply attached to one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: RowId,
    pub post_id: RowId,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComment {
    pub post_id: RowId,
    pub username: String,
    pub content: String,
}
