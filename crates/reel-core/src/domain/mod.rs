//! Domain entities - the core business objects.

mod comment;
mod forms;
mod id;
mod movie;
mod post;

pub use comment::{Comment, NewComment};
pub use forms::{CommentDraft, EditForm, ReviewForm};
pub use id::RowId;
pub use movie::{MovieDetails, MovieSummary, POSTER_BASE_URL, SelectedMovie};
pub use post::{NewPost, Post, PostEdit};

use serde::{Deserialize, Deserializer};

/// Treat a `null` column as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
