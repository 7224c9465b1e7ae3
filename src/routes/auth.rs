//! Admin login endpoints.

use crate::auth::cookie::session_cookie;
use crate::auth::middleware::AppState;
use crate::error::AppError;
use crate::models::{LoginForm, LoginResponse};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Admin login</title>
  <script src="/login.js" defer></script>
</head>
<body>
  <form id="login-form" method="post" action="/admin/login">
    <label>Username <input name="username" autocomplete="username" required></label>
    <label>Password <input name="password" type="password" autocomplete="current-password" required></label>
    <button type="submit">Sign in</button>
    <p id="login-message" role="alert"></p>
  </form>
</body>
</html>
"#;

/// GET /admin/login: Login page
pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// POST /admin/login: Check credentials and set the session cookie
///
/// Success: 200 `{success: true}` with `Set-Cookie: admin_token=...`.
/// Failure: 401 `{success: false, message: "Invalid credentials"}`.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let claims = match state.auth.authenticate(&form.username, &form.password) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(action = "login_failed", "Admin login rejected");
            return Ok((
                StatusCode::UNAUTHORIZED,
                Json(LoginResponse {
                    success: false,
                    message: e.to_string(),
                }),
            )
                .into_response());
        }
    };

    // Signing failure aborts the login with a generic 500
    let token = state.auth.issue_token(&claims)?;
    let cookie = session_cookie(&token, state.config.production);

    tracing::info!(action = "login_success", username = %claims.username, "Admin logged in");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
        }),
    )
        .into_response())
}
