//! Public contact form endpoint.

use super::require;
use crate::auth::middleware::AppState;
use crate::auth::token::now_secs;
use crate::error::AppError;
use crate::models::{ContactLead, CreateContactRequest, DataResponse};
use crate::storage;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

/// POST /api/contact: Submit a contact lead
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(req): Json<CreateContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    require(&req.name, "name")?;
    require(&req.email, "email")?;
    require(&req.phone, "phone")?;
    require(&req.company, "company")?;
    require(&req.location, "location")?;
    require(&req.content, "content")?;
    if !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    let lead = ContactLead {
        id: nanoid::nanoid!(12),
        name: req.name,
        email: req.email,
        phone: req.phone,
        company: req.company,
        marketing_spend: req.marketing_spend.filter(|s| !s.trim().is_empty()),
        location: req.location,
        content: req.content,
        created_at: now_secs(),
    };

    let mut con = state.redis_connection().await?;
    storage::contact::store_contact(&mut con, &lead).await?;

    tracing::info!(action = "contact_created", contact_id = %lead.id, "Contact lead received");

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}
