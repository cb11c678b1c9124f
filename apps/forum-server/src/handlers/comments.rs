//! Comment endpoint.

use actix_web::{HttpResponse, web};

use reel_core::domain::{CommentDraft, RowId};
use reel_shared::dto::CreateCommentRequest;

use super::posts::{comment_responses, load_detail};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts/{id}/comments
///
/// Responds with the post's comments, oldest first, after the insert.
pub async fn add_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut flow = load_detail(&state, RowId::new(path.into_inner())).await?;

    flow.comment = CommentDraft {
        username: req.username,
        content: req.content,
    };
    flow.add_comment().await?;

    Ok(HttpResponse::Created().json(comment_responses(&flow)))
}
