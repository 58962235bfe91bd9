//! Comment handlers. Adding a comment is open to readers; moderation is not.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::Comment;
use blog_core::domain::validation::CommentContent;
use blog_shared::dto::{AddCommentRequest, CommentResponse};

use crate::middleware::auth::RequestCaller;
use crate::middleware::error::AppResult;
use crate::state::AppState;

pub(crate) fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post: comment.post_id,
        author: comment.author,
        text: comment.text,
        created_date: comment.created_date,
        approved_comment: comment.approved_comment,
    }
}

/// GET /api/posts/{id}/comments
pub async fn list(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comments = state
        .blog
        .list_post_comments(&caller.0, path.into_inner())
        .await?;

    let body: Vec<CommentResponse> = comments.into_iter().map(comment_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts/{id}/comments
pub async fn add(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<AddCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let content = CommentContent {
        author: req.author,
        text: req.text,
    };

    let comment = state.blog.add_comment(path.into_inner(), content).await?;
    Ok(HttpResponse::Created().json(comment_response(comment)))
}

/// POST /api/comments/{id}/approve
pub async fn approve(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = state
        .blog
        .approve_comment(&caller.0, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(comment_response(comment)))
}

/// DELETE /api/comments/{id}
pub async fn remove(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .blog
        .remove_comment(&caller.0, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
