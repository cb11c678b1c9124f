//! The detail screen: one review, its comments and owner-gated editing.

use crate::domain::{Comment, CommentDraft, EditForm, Post, RowId};
use crate::error::{DomainError, RepoError};
use crate::flows::Notice;
use crate::store::ReviewStore;
use crate::validation::{validate_comment, validate_edit};

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user backed out at the confirmation step.
    Cancelled,
    /// The post is gone; the caller returns to the list.
    Deleted,
}

/// Detail view state.
///
/// Authorization is a flag held by this view alone: it is set by a matching
/// username and secret and gates `save` and `delete` here, not in the store.
pub struct ReviewDetailFlow {
    store: ReviewStore,
    post_id: RowId,
    post: Option<Post>,
    comments: Vec<Comment>,
    unlock_form_visible: bool,
    authorized: bool,
    pub edit: EditForm,
    pub comment: CommentDraft,
}

impl ReviewDetailFlow {
    pub fn new(store: ReviewStore, post_id: RowId) -> Self {
        Self {
            store,
            post_id,
            post: None,
            comments: Vec::new(),
            unlock_form_visible: false,
            authorized: false,
            edit: EditForm::default(),
            comment: CommentDraft::default(),
        }
    }

    pub fn post_id(&self) -> &RowId {
        &self.post_id
    }

    /// The post, once loaded.
    pub fn post(&self) -> Option<&Post> {
        self.post.as_ref()
    }

    /// Comments, oldest first.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Stays true forever if the post could not be fetched.
    pub fn is_loading(&self) -> bool {
        self.post.is_none()
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    pub fn is_unlock_form_visible(&self) -> bool {
        self.unlock_form_visible && !self.authorized
    }

    /// Read the post and its comments. Failures are logged; a post that
    /// could not be read leaves the view loading.
    pub async fn load(&mut self) {
        let _ = self.try_load().await;
    }

    /// Like `load`, but reports why the post could not be read: `NotFound`
    /// for a missing row, `Store` for anything else. A failed comment read
    /// is only logged.
    pub async fn try_load(&mut self) -> Result<(), DomainError> {
        let (post, _) = tokio::join!(
            reload_post(&self.store, &self.post_id, &mut self.post, &mut self.edit),
            reload_comments(&self.store, &self.post_id, &mut self.comments),
        );

        post.map_err(|e| match e {
            RepoError::NotFound => DomainError::NotFound {
                entity_type: "Post",
                id: self.post_id.to_string(),
            },
            other => DomainError::Store(other),
        })
    }

    /// Reveal the username/secret form.
    pub fn show_unlock_form(&mut self) {
        self.unlock_form_visible = true;
    }

    /// Compare the candidate credentials with the stored ones, exactly.
    /// Only possible while the unlock form is shown.
    ///
    /// On success the edit form is filled from the current post.
    pub fn unlock(&mut self, username: &str, secret: &str) -> Result<(), DomainError> {
        if !self.unlock_form_visible {
            return Err(DomainError::Unauthorized);
        }
        let post = self.post.as_ref().ok_or_else(|| DomainError::NotFound {
            entity_type: "Post",
            id: self.post_id.to_string(),
        })?;

        if !post.credentials_match(username, secret) {
            tracing::warn!(post_id = %self.post_id, "Rejected unlock attempt");
            return Err(DomainError::Unauthorized);
        }

        self.edit = EditForm::from_post(post);
        self.authorized = true;
        Ok(())
    }

    /// Overwrite title, content, rating and url with the edit form.
    pub async fn save(&mut self) -> Result<Notice, DomainError> {
        if !self.authorized {
            return Err(DomainError::Unauthorized);
        }
        let edit = validate_edit(&self.edit)?;

        if let Err(e) = self.store.update_post(&self.post_id, &edit).await {
            tracing::error!(post_id = %self.post_id, error = %e, "Error updating post");
            return Err(e.into());
        }

        self.authorized = false;
        self.unlock_form_visible = false;
        let _ = reload_post(&self.store, &self.post_id, &mut self.post, &mut self.edit).await;
        Ok(Notice::PostUpdated)
    }

    /// Delete the post after the user confirmed. Comments are left to the
    /// store's own rules.
    pub async fn delete(&mut self, confirmed: bool) -> Result<DeleteOutcome, DomainError> {
        if !self.authorized {
            return Err(DomainError::Unauthorized);
        }
        if !confirmed {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(e) = self.store.delete_post(&self.post_id).await {
            tracing::error!(post_id = %self.post_id, error = %e, "Error deleting post");
            return Err(e.into());
        }

        tracing::info!(post_id = %self.post_id, "Post deleted");
        self.authorized = false;
        Ok(DeleteOutcome::Deleted)
    }

    /// Post the comment draft, then clear it and reload this post's comments.
    pub async fn add_comment(&mut self) -> Result<(), DomainError> {
        let comment = validate_comment(&self.post_id, &self.comment)?;

        if let Err(e) = self.store.insert_comment(&comment).await {
            tracing::error!(post_id = %self.post_id, error = %e, "Error adding comment");
            return Err(e.into());
        }

        self.comment = CommentDraft::default();
        reload_comments(&self.store, &self.post_id, &mut self.comments).await;
        Ok(())
    }
}

async fn reload_post(
    store: &ReviewStore,
    id: &RowId,
    post: &mut Option<Post>,
    edit: &mut EditForm,
) -> Result<(), RepoError> {
    match store.post(id).await {
        Ok(fresh) => {
            *edit = EditForm::from_post(&fresh);
            *post = Some(fresh);
            Ok(())
        }
        Err(e) => {
            tracing::error!(post_id = %id, error = %e, "Error fetching post");
            Err(e)
        }
    }
}

async fn reload_comments(store: &ReviewStore, id: &RowId, comments: &mut Vec<Comment>) {
    match store.comments_for(id).await {
        Ok(fresh) => *comments = fresh,
        Err(e) => tracing::error!(post_id = %id, error = %e, "Error fetching comments"),
    }
}
