//! Admin dashboard endpoints (all behind the session gate).

use crate::auth::middleware::AppState;
use crate::auth::token::now_secs;
use crate::error::AppError;
use crate::export::contacts_to_csv;
use crate::media::image_to_data_url;
use crate::models::{ContactLead, DashboardOverview, DataResponse, ImageUploadResponse};
use crate::storage;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Datelike};

/// GET /admin, /admin/dashboard: Headline numbers
pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut con = state.redis_connection().await?;

    let contacts = storage::contact::list_contacts(&mut con).await?;
    // Posts carry inline images, so count them without loading
    let total_posts = storage::blog::count_posts(&mut con).await?;

    Ok(Json(DashboardOverview {
        total_contacts: contacts.len(),
        new_contacts_this_month: count_in_month_of(&contacts, now_secs()),
        total_posts,
    }))
}

/// Count leads created in the same UTC calendar month as `now`.
fn count_in_month_of(contacts: &[ContactLead], now: u64) -> usize {
    let Some(now) = DateTime::from_timestamp(now as i64, 0) else {
        return 0;
    };

    contacts
        .iter()
        .filter_map(|c| DateTime::from_timestamp(c.created_at as i64, 0))
        .filter(|t| t.year() == now.year() && t.month() == now.month())
        .count()
}

/// GET /admin/api/contacts: List leads, newest first
pub async fn list_contacts(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut con = state.redis_connection().await?;
    let contacts = storage::contact::list_contacts(&mut con).await?;
    Ok(Json(DataResponse { data: contacts }))
}

/// GET /admin/api/contacts/export: Download leads as CSV
pub async fn export_contacts(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut con = state.redis_connection().await?;
    let contacts = storage::contact::list_contacts(&mut con).await?;

    tracing::info!(action = "contacts_exported", count = contacts.len(), "Contacts exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"contacts.csv\"",
            ),
        ],
        contacts_to_csv(&contacts),
    ))
}

/// POST /admin/api/images: Convert an uploaded image to a data URL
///
/// Takes the first multipart field that carries a content type.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let limit = state.config.max_upload_bytes;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let Some(content_type) = field.content_type().map(str::to_string) else {
            continue;
        };

        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

        if bytes.is_empty() {
            return Err(AppError::BadRequest("Image is empty".to_string()));
        }

        let data_url = image_to_data_url(&content_type, &bytes).ok_or_else(|| {
            AppError::BadRequest(format!("Unsupported image type: {}", content_type))
        })?;

        return Ok(Json(ImageUploadResponse { data_url }));
    }

    Err(AppError::BadRequest("Missing image".to_string()))
}

/// The request body limit surfaces as a multipart read error.
fn multipart_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Image too large: limit is {} bytes", limit))
    } else {
        AppError::BadRequest(format!("Invalid multipart: {}", err))
    }
}
