//! Session authentication for HTTP and WebSocket requests.
//!
//! The session token comes from the `sessionID` cookie (browsers) or an
//! `Authorization: Bearer <token>` header (other clients).

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::domain::{SessionLookupError, SessionToken, User};

use super::state::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "sessionID";

/// Session cookie lifetime
pub const SESSION_MAX_AGE_DAYS: i64 = 180;

/// The caller's resolved identity.
///
/// Rejects with `401 Unauthorized` when no known session is presented and with
/// `503 Service Unavailable` when the session store cannot be reached.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session_token = session_token_from_headers(&parts.headers).ok_or_else(|| {
            tracing::debug!("Request to {} without a session", parts.uri.path());
            StatusCode::UNAUTHORIZED
        })?;

        match state.authenticate_usecase.execute(&session_token).await {
            Ok(user) => Ok(Self(user)),
            Err(SessionLookupError::NotFound(_)) => {
                tracing::debug!("Unknown session presented to {}", parts.uri.path());
                Err(StatusCode::UNAUTHORIZED)
            }
            Err(SessionLookupError::Store(e)) => {
                tracing::error!("Session lookup failed: {}", e);
                Err(StatusCode::SERVICE_UNAVAILABLE)
            }
        }
    }
}

/// Extract the session token from the request headers, cookie first
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<SessionToken> {
    let jar = CookieJar::from_headers(headers);
    let from_cookie = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| SessionToken::new(cookie.value_trimmed().to_string()).ok());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .and_then(|token| SessionToken::new(token.trim().to_string()).ok())
    })
}

/// Session cookie handed out with a new session
pub fn session_cookie(session_token: &SessionToken) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_token.as_str().to_string()))
        .path("/")
        .max_age(time::Duration::days(SESSION_MAX_AGE_DAYS))
        .same_site(SameSite::Strict)
        .http_only(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_token_from_cookie() {
        // テスト項目: Cookie ヘッダからセッショントークンを取り出せる
        // given (前提条件):
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; sessionID=abc-123; lang=ja"),
        );

        // when (操作):
        let token = session_token_from_headers(&headers);

        // then (期待する結果):
        assert_eq!(token.unwrap().as_str(), "abc-123");
    }

    #[test]
    fn test_token_from_quoted_cookie_value() {
        // テスト項目: ダブルクォートで囲まれた Cookie の値からクォートを除いたトークンを取り出せる
        // given (前提条件):
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("sessionID=\"abc-123\""),
        );

        // when (操作):
        let token = session_token_from_headers(&headers);

        // then (期待する結果):
        assert_eq!(token.unwrap().as_str(), "abc-123");
    }

    #[test]
    fn test_token_from_bearer_header() {
        // テスト項目: Authorization ヘッダからセッショントークンを取り出せる
        // given (前提条件):
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer xyz"),
        );

        // when (操作):
        let token = session_token_from_headers(&headers);

        // then (期待する結果):
        assert_eq!(token.unwrap().as_str(), "xyz");
    }

    #[test]
    fn test_cookie_takes_precedence_over_bearer() {
        // テスト項目: 両方ある場合は Cookie が優先される
        // given (前提条件):
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sessionID=cookie"));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header"),
        );

        // when (操作):
        let token = session_token_from_headers(&headers);

        // then (期待する結果):
        assert_eq!(token.unwrap().as_str(), "cookie");
    }

    #[test]
    fn test_missing_or_empty_token() {
        // テスト項目: トークンがない・空の場合は None
        // given (前提条件):
        let empty = HeaderMap::new();
        let mut blank_cookie = HeaderMap::new();
        blank_cookie.insert(header::COOKIE, HeaderValue::from_static("sessionID="));

        // when (操作) / then (期待する結果):
        assert!(session_token_from_headers(&empty).is_none());
        assert!(session_token_from_headers(&blank_cookie).is_none());
    }

    #[test]
    fn test_session_cookie_attributes() {
        // テスト項目: セッション Cookie に名前・値・属性が設定される
        // given (前提条件):
        let token = SessionToken::new("abc".to_string()).unwrap();

        // when (操作):
        let cookie = session_cookie(&token);

        // then (期待する結果):
        assert_eq!(cookie.name(), "sessionID");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(180)));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.http_only(), Some(true));
    }
}
