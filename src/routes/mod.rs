//! HTTP route handlers and router assembly.

pub mod admin;
pub mod auth;
pub mod blog;
pub mod contact;

use crate::auth::middleware::{admin_gate, AppState};
use crate::error::AppError;
use crate::middleware::security_headers;
use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Maximum slug length accepted for blog posts.
const MAX_SLUG_LEN: usize = 128;

/// Room for a post's text fields on top of its inline images.
const BLOG_TEXT_HEADROOM: usize = 1024 * 1024;

/// Body limit for post creation.
///
/// A post embeds two uploaded images (cover and author avatar) as base64
/// data URLs, each up to 4/3 of the upload limit.
pub fn blog_body_limit(max_upload_bytes: usize) -> usize {
    base64::encoded_len(max_upload_bytes, true)
        .unwrap_or(usize::MAX)
        .saturating_mul(2)
        .saturating_add(BLOG_TEXT_HEADROOM)
}

/// Reject an empty (or whitespace-only) required field.
pub fn require(value: &str, label: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", label)));
    }
    Ok(())
}

/// Validate a blog slug: lowercase ASCII alphanumerics and hyphens.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty()
        || slug.len() > MAX_SLUG_LEN
        || !slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::BadRequest("Invalid slug format".to_string()));
    }
    Ok(())
}

/// Build the route table.
pub fn api_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        // Public endpoints
        .route("/api/contact", post(contact::submit_contact))
        .route("/api/blog", get(blog::list_posts))
        .route("/api/blog/{slug}", get(blog::get_post))
        // Login (exempt from the gate)
        .route("/admin/login", get(auth::login_page).post(auth::login))
        // Admin area
        .route("/admin", get(admin::dashboard))
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/admin/api/contacts", get(admin::list_contacts))
        .route("/admin/api/contacts/export", get(admin::export_contacts))
        .route(
            "/admin/api/blog",
            post(blog::create_post)
                .layer(DefaultBodyLimit::max(blog_body_limit(max_upload_bytes))),
        )
        .route("/admin/api/images", post(admin::upload_image))
}

/// Assemble the full application: routes, static fallback, gate, and headers.
pub fn app(state: AppState, static_dir: &str) -> Router {
    // CorsLayer::new() allows no origins: single-origin deployment
    let cors = CorsLayer::new();

    let max_upload_bytes = state.config.max_upload_bytes;

    api_router(max_upload_bytes)
        .fallback_service(ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn_with_state(state.clone(), admin_gate))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(axum::middleware::from_fn(security_headers))
        .with_state(state)
}
