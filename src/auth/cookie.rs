//! Session cookie formatting and parsing.

use super::token::SESSION_TTL_SECS;
use axum::http::{header, HeaderMap};

/// Name of the cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "admin_token";

/// Build the `Set-Cookie` value for a freshly issued session token.
///
/// The cookie is hidden from page scripts, only sent on same-site requests,
/// and lives exactly as long as the token. `Secure` is set in production only
/// so local development over plain HTTP still works.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Strict",
        SESSION_COOKIE, token, SESSION_TTL_SECS
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Find a cookie value by name across all `Cookie` headers.
///
/// Empty values are treated as absent.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc.def.ghi", false);
        assert!(cookie.starts_with("admin_token=abc.def.ghi;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_session_cookie_secure_in_production() {
        let cookie = session_cookie("abc.def.ghi", true);
        assert!(cookie.ends_with("; Secure"));
    }

    #[test]
    fn test_read_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; admin_token=tok.en.sig; lang=en"),
        );
        assert_eq!(read_cookie(&headers, SESSION_COOKIE), Some("tok.en.sig"));
        assert_eq!(read_cookie(&headers, "theme"), Some("dark"));
    }

    #[test]
    fn test_read_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("admin_token=xyz"));
        assert_eq!(read_cookie(&headers, SESSION_COOKIE), Some("xyz"));
    }

    #[test]
    fn test_read_cookie_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(read_cookie(&headers, SESSION_COOKIE), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("admin_token="));
        assert_eq!(read_cookie(&headers, SESSION_COOKIE), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("xadmin_token=abc"));
        assert_eq!(read_cookie(&headers, SESSION_COOKIE), None);
    }
}
