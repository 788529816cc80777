//! The `token` session cookie.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

pub const TOKEN_COOKIE: &str = "token";

/// `Set-Cookie` value carrying a freshly issued token.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Strict",
        TOKEN_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Reads the session token from the `Cookie` headers, if present.
pub fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = session_cookie("abc", 60, false);
        assert_eq!(cookie, "token=abc; HttpOnly; Path=/; Max-Age=60; SameSite=Strict");
        assert!(session_cookie("abc", 60, true).ends_with("; Secure"));
    }

    #[test]
    fn cleared_cookie_expires_immediately() {
        assert!(clear_session_cookie(false).starts_with("token=; HttpOnly; Path=/; Max-Age=0"));
    }

    #[test]
    fn finds_token_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; token=jwt-value; lang=en"));
        assert_eq!(token_from_cookies(&headers), Some("jwt-value".to_string()));
    }

    #[test]
    fn empty_or_missing_token_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(token_from_cookies(&headers), None);
        headers.insert(COOKIE, HeaderValue::from_static("token="));
        assert_eq!(token_from_cookies(&headers), None);
    }
}
