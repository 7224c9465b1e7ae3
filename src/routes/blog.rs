//! Blog endpoints: public reading, admin authoring.

use super::{require, validate_slug};
use crate::auth::middleware::AppState;
use crate::error::AppError;
use crate::models::{BlogPost, CreateBlogRequest, DataResponse};
use crate::storage;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::time::{SystemTime, UNIX_EPOCH};

/// POST /admin/api/blog: Publish a post
///
/// Every field is required. The slug must be unused.
pub async fn create_post(
    State(state): State<AppState>,
    Json(req): Json<CreateBlogRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_slug(&req.slug)?;
    require(&req.title, "title")?;
    require(&req.subtitle, "subtitle")?;
    require(&req.content, "content")?;
    require(&req.cover_image, "coverimage")?;
    require(&req.author_name, "authorName")?;
    require(&req.author_avatar, "authorAvatar")?;
    require(&req.author_role, "authorRole")?;

    let publish_millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    let post = BlogPost {
        id: nanoid::nanoid!(12),
        slug: req.slug,
        title: req.title,
        subtitle: req.subtitle,
        content: req.content,
        cover_image: req.cover_image,
        author_name: req.author_name,
        author_avatar: req.author_avatar,
        author_role: req.author_role,
        publish_date: publish_millis.to_string(),
    };

    let mut con = state.redis_connection().await?;
    if !storage::blog::create_post(&mut con, &post).await? {
        return Err(AppError::Conflict(format!(
            "Slug '{}' is already in use",
            post.slug
        )));
    }

    tracing::info!(action = "blog_created", post_id = %post.id, slug = %post.slug, "Blog post published");

    Ok(Json(DataResponse { data: post }))
}

/// GET /api/blog: List posts, newest first
pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut con = state.redis_connection().await?;
    let posts = storage::blog::list_posts(&mut con).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/blog/{slug}: Fetch one post
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    validate_slug(&slug)?;

    let mut con = state.redis_connection().await?;
    let post = storage::blog::get_post_by_slug(&mut con, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

    Ok(Json(DataResponse { data: post }))
}
