//! Review endpoints: list, create, detail, upvote and owner actions.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use reel_core::DomainError;
use reel_core::domain::{EditForm, Post, ReviewForm, RowId};
use reel_core::flows::{
    CreateReviewFlow, DeleteOutcome, Notice, PostCard, ReviewDetailFlow, ReviewListView, SortOrder,
};
use reel_shared::ApiResponse;
use reel_shared::dto::{
    CommentResponse, CreatePostRequest, CredentialsRequest, DeletePostRequest, PostCardResponse,
    PostDetailResponse, PostResponse, UnlockResponse, UpdatePostRequest, UpvoteResponse,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub search: String,
    pub sort: SortOrder,
}

pub(super) fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title.clone(),
        content: post.content.clone(),
        movie_id: post.movie_id.clone(),
        movie_title: post.movie_title.clone(),
        genres: post.genres.clone(),
        username: post.username.clone(),
        rating: post.rating,
        url: post.url.clone(),
        upvotes: post.upvotes,
        created_at: post.created_at,
    }
}

pub(super) fn comment_responses(flow: &ReviewDetailFlow) -> Vec<CommentResponse> {
    flow.comments()
        .iter()
        .map(|c| CommentResponse {
            id: c.id.to_string(),
            post_id: c.post_id.to_string(),
            username: c.username.clone(),
            content: c.content.clone(),
            created_at: c.created_at,
        })
        .collect()
}

fn card_response(card: &PostCard<'_>) -> PostCardResponse {
    let post = card.post;
    PostCardResponse {
        id: post.id.to_string(),
        title: post.title.clone(),
        excerpt: post.excerpt(),
        movie_id: post.movie_id.clone(),
        movie_title: post.movie_title.clone(),
        genres: post.genres.clone(),
        username: post.username.clone(),
        rating: post.rating,
        url: post.url.clone(),
        upvotes: post.upvotes,
        comment_count: card.comment_count,
        created_at: post.created_at,
    }
}

fn not_found(id: &RowId) -> AppError {
    DomainError::NotFound {
        entity_type: "Post",
        id: id.to_string(),
    }
    .into()
}

/// Load the detail view for `id`. A missing post is a 404, an unreachable
/// store a 500.
pub(super) async fn load_detail(state: &AppState, id: RowId) -> AppResult<ReviewDetailFlow> {
    let mut flow = ReviewDetailFlow::new(state.store.clone(), id);
    flow.try_load().await?;
    Ok(flow)
}

/// GET /api/posts?search=&sort=
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> HttpResponse {
    let params = params.into_inner();

    let mut view = ReviewListView::new(state.store.clone());
    view.search = params.search;
    view.sort = params.sort;
    view.load().await;

    let cards: Vec<PostCardResponse> = view.cards().iter().map(card_response).collect();
    HttpResponse::Ok().json(cards)
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut flow = CreateReviewFlow::new(state.store.clone(), state.lookup.clone());
    if let Some(movie_id) = req.movie_id {
        flow.select_movie_id(movie_id).await?;
    }
    flow.form = ReviewForm {
        title: req.title,
        content: req.content,
        username: req.username,
        secret: req.secret,
        rating: req.rating,
        image_url: req.image_url,
    };

    let notice = flow.submit().await?;
    Ok(HttpResponse::Created().json(ApiResponse::message(notice.to_string())))
}

/// GET /api/posts/{id}
pub async fn detail(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let flow = load_detail(&state, RowId::new(path.into_inner())).await?;
    let post = flow.post().ok_or_else(|| not_found(flow.post_id()))?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post_response(post),
        comments: comment_responses(&flow),
    }))
}

/// POST /api/posts/{id}/upvote
pub async fn upvote(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = RowId::new(path.into_inner());

    let mut view = ReviewListView::new(state.store.clone());
    view.try_load().await?;
    view.upvote(&id).await?;

    let post = view
        .posts()
        .iter()
        .find(|post| post.id == id)
        .ok_or_else(|| not_found(&id))?;

    Ok(HttpResponse::Ok().json(UpvoteResponse {
        id: id.to_string(),
        upvotes: post.upvotes,
    }))
}

/// POST /api/posts/{id}/unlock
pub async fn unlock(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CredentialsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut flow = load_detail(&state, RowId::new(path.into_inner())).await?;

    flow.show_unlock_form();
    flow.unlock(&req.username, &req.secret)?;

    Ok(HttpResponse::Ok().json(UnlockResponse {
        authorized: flow.is_authorized(),
    }))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut flow = load_detail(&state, RowId::new(path.into_inner())).await?;

    flow.show_unlock_form();
    flow.unlock(&req.username, &req.secret)?;
    flow.edit = EditForm {
        title: req.title,
        content: req.content,
        rating: req.rating,
        url: req.url,
    };

    let notice: Notice = flow.save().await?;
    let post = flow.post().ok_or_else(|| not_found(flow.post_id()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        post_response(post),
        notice.to_string(),
    )))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<DeletePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut flow = load_detail(&state, RowId::new(path.into_inner())).await?;

    flow.show_unlock_form();
    flow.unlock(&req.username, &req.secret)?;

    match flow.delete(req.confirm).await? {
        DeleteOutcome::Cancelled => Err(AppError::BadRequest(
            "Deletion was not confirmed.".to_string(),
        )),
        DeleteOutcome::Deleted => Ok(HttpResponse::Ok()
            .json(ApiResponse::message(Notice::PostDeleted.to_string()))),
    }
}
