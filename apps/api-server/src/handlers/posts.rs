//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::domain::validation::PostContent;
use blog_core::service::PostDetail;
use blog_shared::dto::{CreatePostRequest, PostDetailResponse, PostResponse, UpdatePostRequest};

use super::comments::comment_response;
use crate::middleware::auth::RequestCaller;
use crate::middleware::error::AppResult;
use crate::state::AppState;

pub(crate) fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author: post.author_id,
        title: post.title,
        text: post.text,
        created_date: post.created_date,
        published_date: post.published_date,
    }
}

fn detail_response(detail: PostDetail) -> PostDetailResponse {
    PostDetailResponse {
        post: post_response(detail.post),
        comments: detail.comments.into_iter().map(comment_response).collect(),
    }
}

fn posts_response(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(post_response).collect()
}

/// GET /api/posts
pub async fn list_published(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.blog.list_published_posts().await?;
    Ok(HttpResponse::Ok().json(posts_response(posts)))
}

/// GET /api/posts/drafts
pub async fn list_drafts(
    state: web::Data<AppState>,
    caller: RequestCaller,
) -> AppResult<HttpResponse> {
    let drafts = state.blog.list_drafts(&caller.0).await?;
    Ok(HttpResponse::Ok().json(posts_response(drafts)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    caller: RequestCaller,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let RequestCaller(caller) = caller;
    let req = body.into_inner();

    // Anonymous callers fall through to the service, which rejects them.
    let author_id = req
        .author
        .or_else(|| caller.principal().map(|p| p.user_id))
        .unwrap_or_else(Uuid::nil);

    let content = PostContent {
        title: req.title,
        text: req.text,
    };
    let post = state.blog.create_post(&caller, author_id, content).await?;

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// GET /api/posts/{id}
pub async fn detail(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let detail = state.blog.get_post_detail(&caller.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(detail_response(detail)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let content = PostContent {
        title: req.title,
        text: req.text,
    };

    let post = state
        .blog
        .update_post(&caller.0, path.into_inner(), content, req.author)
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.blog.delete_post(&caller.0, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/publish
pub async fn publish(
    state: web::Data<AppState>,
    caller: RequestCaller,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.blog.publish_post(&caller.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}
