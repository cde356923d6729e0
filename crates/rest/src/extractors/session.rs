//! Session cookie extractor.
//!
//! The check is presence-only: any non-empty `session` cookie is accepted.
//! Tokens are not looked up in a session store.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use tracing::debug;

use crate::error::RestError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Name of the cookie holding the logged-in user's RIF.
pub const USER_RIF_COOKIE: &str = "user_rif";

/// Axum extractor guarding authenticated endpoints.
///
/// # Example
///
/// ```rust,ignore
/// use retenciones_rest::extractors::SessionCookie;
///
/// async fn handler(_session: SessionCookie) -> &'static str {
///     "ok"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionCookie {
    token: String,
}

impl SessionCookie {
    /// Returns the raw session token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Returns the value of the first cookie named `name` across all `Cookie`
/// headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
}

impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match cookie_value(&parts.headers, SESSION_COOKIE) {
            Some(token) if !token.is_empty() => Ok(SessionCookie {
                token: token.to_string(),
            }),
            _ => {
                debug!(path = %parts.uri.path(), "Rejected request without session");
                Err(RestError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc-123; user_rif=J-1"),
        );
        assert_eq!(cookie_value(&headers, SESSION_COOKIE), Some("abc-123"));
        assert_eq!(cookie_value(&headers, USER_RIF_COOKIE), Some("J-1"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_cookie_value_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("session=xyz"));
        assert_eq!(cookie_value(&headers, SESSION_COOKIE), Some("xyz"));
    }

    #[test]
    fn test_cookie_name_is_exact() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session_old=1"));
        assert_eq!(cookie_value(&headers, SESSION_COOKIE), None);
    }

    #[tokio::test]
    async fn test_empty_session_rejected() {
        let request = axum::http::Request::builder()
            .uri("/api/retenciones")
            .header(header::COOKIE, "session=")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let result = SessionCookie::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(RestError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_present_session_accepted() {
        let request = axum::http::Request::builder()
            .uri("/api/retenciones")
            .header(header::COOKIE, "session=token")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let session = SessionCookie::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(session.token(), "token");
    }
}
