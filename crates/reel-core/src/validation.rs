//! Form validation. The first failing rule wins; nothing is written on failure.

use lazy_regex::{Lazy, Regex, lazy_regex};

use crate::domain::{
    CommentDraft, EditForm, NewComment, NewPost, PostEdit, ReviewForm, RowId, SelectedMovie,
};
use crate::error::ValidationError;

/// Direct-link pattern of the only accepted image host.
static IMAGE_URL_REGEX: Lazy<Regex> = lazy_regex!(r"^https://i\.imgur\.com/.+$"i);

/// Whether `url` is a direct image link on the accepted host.
pub fn is_valid_image_url(url: &str) -> bool {
    IMAGE_URL_REGEX.is_match(url)
}

/// Check the create form and build the insert payload.
///
/// Order: movie selected, required text fields and rating present, rating in
/// range, image URL (if any) on the accepted host.
pub fn validate_review(
    form: &ReviewForm,
    movie: Option<&SelectedMovie>,
) -> Result<NewPost, ValidationError> {
    let Some(movie) = movie else {
        return Err(ValidationError::MissingRequiredFields);
    };
    if [&form.title, &form.username, &form.secret, &form.rating]
        .iter()
        .any(|field| field.is_empty())
    {
        return Err(ValidationError::MissingRequiredFields);
    }
    let rating = parse_rating(&form.rating)?;
    let url = optional_image_url(&form.image_url)?;

    Ok(NewPost {
        movie_id: movie.id.to_string(),
        movie_title: movie.title.clone(),
        genres: movie.genres.clone(),
        title: form.title.clone(),
        content: form.content.clone(),
        username: form.username.clone(),
        password: form.secret.clone(),
        rating,
        url,
        upvotes: 0,
    })
}

/// Check the owner's edit form and build the overwrite patch.
pub fn validate_edit(form: &EditForm) -> Result<PostEdit, ValidationError> {
    if form.title.is_empty() || form.rating.is_empty() {
        return Err(ValidationError::MissingRequiredFields);
    }

    Ok(PostEdit {
        title: form.title.clone(),
        content: form.content.clone(),
        rating: parse_rating(&form.rating)?,
        url: optional_image_url(&form.url)?,
    })
}

pub fn validate_comment(
    post_id: &RowId,
    draft: &CommentDraft,
) -> Result<NewComment, ValidationError> {
    if draft.username.is_empty() || draft.content.is_empty() {
        return Err(ValidationError::MissingCommentFields);
    }

    Ok(NewComment {
        post_id: post_id.clone(),
        username: draft.username.clone(),
        content: draft.content.clone(),
    })
}

fn parse_rating(raw: &str) -> Result<u8, ValidationError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|rating| (1..=5).contains(rating))
        .ok_or(ValidationError::InvalidRating)
}

/// Blank means no image.
fn optional_image_url(raw: &str) -> Result<Option<String>, ValidationError> {
    if raw.is_empty() {
        Ok(None)
    } else if is_valid_image_url(raw) {
        Ok(Some(raw.to_string()))
    } else {
        Err(ValidationError::InvalidImageUrl)
    }
}
