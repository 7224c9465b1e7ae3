//! Request and response models for the API.
//!
//! JSON field names follow the site's front end (camelCase), so the same
//! records round-trip between the public forms, Redis, and the dashboard.

use serde::{Deserialize, Serialize};

// ============================================================================
// Contact Leads
// ============================================================================

/// Contact form submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    #[serde(default)]
    pub marketing_spend: Option<String>,
    pub location: String,
    pub content: String,
}

/// Contact lead as stored in Redis and listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub marketing_spend: Option<String>,
    pub location: String,
    pub content: String,
    pub created_at: u64,
}

// ============================================================================
// Blog Posts
// ============================================================================

/// Blog post authoring payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub content: String,
    #[serde(rename = "coverimage")]
    pub cover_image: String,
    pub author_name: String,
    pub author_avatar: String,
    pub author_role: String,
}

/// Published blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub content: String,
    #[serde(rename = "coverimage")]
    pub cover_image: String,
    pub author_name: String,
    pub author_avatar: String,
    pub author_role: String,
    /// Unix milliseconds, as a string.
    #[serde(rename = "publishdate")]
    pub publish_date: String,
}

impl BlogPost {
    /// Publish time in unix milliseconds, or 0 if unparseable.
    pub fn published_millis(&self) -> u64 {
        self.publish_date.parse().unwrap_or(0)
    }
}

/// `{ "data": ... }` envelope used by list and create endpoints.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

// ============================================================================
// Admin
// ============================================================================

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Result of a login attempt, consumed by the login page script.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

/// Dashboard headline numbers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub total_contacts: usize,
    pub new_contacts_this_month: usize,
    pub total_posts: usize,
}

/// Uploaded image re-encoded for embedding in a post.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    pub data_url: String,
}
