//! Shared application state and the admin route gate.

use super::cookie::{read_cookie, SESSION_COOKIE};
use super::Authenticator;
use crate::config::Config;
use crate::error::AppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

/// Every path at or below this prefix requires a valid session.
pub const PROTECTED_PREFIX: &str = "/admin";

/// Where rejected requests are sent. Reachable without a session.
pub const LOGIN_PATH: &str = "/admin/login";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub redis: redis::Client,
    pub config: Arc<Config>,
    pub auth: Arc<Authenticator>,
}

impl AppState {
    pub fn new(redis: redis::Client, config: Config) -> Self {
        let auth = Authenticator::from_config(&config);
        Self {
            redis,
            config: Arc::new(config),
            auth: Arc::new(auth),
        }
    }

    /// Open a multiplexed Redis connection for one request.
    pub async fn redis_connection(
        &self,
    ) -> Result<redis::aio::MultiplexedConnection, AppError> {
        self.redis
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection error: {}", e)))
    }
}

/// Whether a request path must pass the gate.
pub fn is_protected_path(path: &str) -> bool {
    let under_prefix = path == PROTECTED_PREFIX
        || path
            .strip_prefix(PROTECTED_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'));
    under_prefix && path != LOGIN_PATH
}

/// Gate for the admin area.
///
/// Requests under [`PROTECTED_PREFIX`] must present a valid `admin_token`
/// cookie. Missing, tampered and expired tokens all redirect to the login
/// page; the reason is only logged. Valid requests pass through untouched.
pub async fn admin_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !is_protected_path(request.uri().path()) {
        return next.run(request).await;
    }

    let verdict = state
        .auth
        .verify_token(read_cookie(request.headers(), SESSION_COOKIE));

    match verdict {
        Ok(_) => next.run(request).await,
        Err(e) => {
            tracing::debug!(
                action = "gate_rejected",
                path = %request.uri().path(),
                reason = %e,
                "Redirecting to login"
            );
            Redirect::temporary(LOGIN_PATH).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionClaims;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn test_config() -> Config {
        Config {
            admin_username: "admin".to_string(),
            admin_password: "admin@258".to_string().into(),
            jwt_secret: "gate-test-secret".to_string().into(),
            using_fallback_secret: false,
            production: false,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            max_upload_bytes: 1024,
        }
    }

    fn test_state() -> AppState {
        let redis = redis::Client::open("redis://127.0.0.1:6379").unwrap();
        AppState::new(redis, test_config())
    }

    fn gated_app(state: AppState) -> Router {
        Router::new()
            .route("/admin", get(|| async { "admin home" }))
            .route("/admin/dashboard", get(|| async { "dashboard" }))
            .route("/admin/login", get(|| async { "login page" }))
            .route("/public/page", get(|| async { "public" }))
            .layer(middleware::from_fn_with_state(state.clone(), admin_gate))
            .with_state(state)
    }

    async fn send(app: Router, uri: &str, cookie: Option<&str>) -> axum::response::Response {
        let mut req = Request::builder().uri(uri);
        if let Some(c) = cookie {
            req = req.header(header::COOKIE, c);
        }
        app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
    }

    fn admin_token(state: &AppState) -> String {
        state
            .auth
            .issue_token(&SessionClaims {
                username: "admin".to_string(),
            })
            .unwrap()
    }

    fn assert_redirects_to_login(response: &axum::response::Response) {
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/admin/login");
    }

    #[test]
    fn test_is_protected_path() {
        assert!(is_protected_path("/admin"));
        assert!(is_protected_path("/admin/"));
        assert!(is_protected_path("/admin/dashboard"));
        assert!(is_protected_path("/admin/api/contacts"));
        assert!(!is_protected_path("/admin/login"));
        assert!(!is_protected_path("/administrator"));
        assert!(!is_protected_path("/public/page"));
        assert!(!is_protected_path("/api/blog"));
        assert!(!is_protected_path("/"));
    }

    #[tokio::test]
    async fn test_protected_without_cookie_redirects() {
        let response = send(gated_app(test_state()), "/admin/dashboard", None).await;
        assert_redirects_to_login(&response);
    }

    #[tokio::test]
    async fn test_protected_with_valid_cookie_proceeds() {
        let state = test_state();
        let cookie = format!("admin_token={}", admin_token(&state));

        let response = send(gated_app(state), "/admin/dashboard", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, "dashboard");
    }

    #[tokio::test]
    async fn test_prefix_root_is_gated() {
        let state = test_state();
        let response = send(gated_app(state.clone()), "/admin", None).await;
        assert_redirects_to_login(&response);

        let cookie = format!("admin_token={}", admin_token(&state));
        let response = send(gated_app(state), "/admin", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_path_bypasses_gate() {
        let response = send(gated_app(test_state()), "/public/page", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_page_reachable_without_cookie() {
        let response = send(gated_app(test_state()), "/admin/login", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_garbage_cookie_redirects() {
        let response = send(
            gated_app(test_state()),
            "/admin/dashboard",
            Some("admin_token=definitely.not.valid"),
        )
        .await;
        assert_redirects_to_login(&response);
    }

    #[tokio::test]
    async fn test_expired_token_redirects() {
        let state = test_state();
        let issued_long_ago = crate::auth::token::now_secs() - 3601;
        let token = state
            .auth
            .keys()
            .issue_at(
                &SessionClaims {
                    username: "admin".to_string(),
                },
                issued_long_ago,
            )
            .unwrap();
        let cookie = format!("admin_token={}", token);

        let response = send(gated_app(state), "/admin/dashboard", Some(&cookie)).await;
        assert_redirects_to_login(&response);
    }

    #[tokio::test]
    async fn test_token_from_other_key_redirects() {
        let foreign = crate::auth::SessionKeys::new(b"someone-elses-secret")
            .issue(&SessionClaims {
                username: "admin".to_string(),
            })
            .unwrap();
        let cookie = format!("admin_token={}", foreign);

        let response = send(gated_app(test_state()), "/admin/dashboard", Some(&cookie)).await;
        assert_redirects_to_login(&response);
    }
}
