//! # 認証ガード
//!
//! `Authorization: Bearer <token>` を認証サービスで検証し、
//! 解決したユーザーをリクエスト extensions に格納する。
//! 失敗はすべて 401 を返す。
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! Router::new()
//!     .route("/api/profile", get(get_profile))
//!     .route_layer(from_fn_with_state(guard_state, require_auth))
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use randapizza_infra::{AuthClient, AuthError};
use randapizza_shared::event_log::error as log_error;

use crate::error::ApiError;

/// 認証ガードの状態
#[derive(Clone)]
pub struct AuthGuardState {
    pub auth_client: Arc<dyn AuthClient>,
}

/// `Authorization` ヘッダーから Bearer トークンを取り出す
///
/// スキーム名は大文字小文字を区別しない。トークンが空なら `None`。
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// 認証ガード
pub async fn require_auth(
    State(state): State<AuthGuardState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(request.headers()) else {
        return ApiError::Unauthorized("Missing or malformed bearer token".to_string())
            .into_response();
    };

    let resolved = state.auth_client.get_user(token).await;
    match resolved {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, "認証済みユーザーを解決しました");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(AuthError::InvalidToken | AuthError::Rejected(_)) => {
            ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
        }
        Err(e) => {
            tracing::error!(
                error.category = log_error::category::EXTERNAL_SERVICE,
                error.kind = log_error::kind::AUTH_PROVIDER,
                "トークン検証で認証サービスの呼び出しに失敗しました: {}",
                e
            );
            ApiError::Unauthorized("Unable to verify token".to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension,
        Router,
        http::{HeaderValue, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use randapizza_domain::user::{AuthenticatedUser, UserId};
    use randapizza_infra::mock::StubAuthClient;
    use rstest::rstest;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;

    fn headers(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(authorization).unwrap(),
        );
        headers
    }

    // ===== extract_bearer_token =====

    #[rstest]
    #[case("Bearer abc.def", Some("abc.def"))]
    #[case("bearer abc.def", Some("abc.def"))]
    #[case("Bearer   padded  ", Some("padded"))]
    #[case("Bearer ", None)]
    #[case("Basic dXNlcjpwYXNz", None)]
    #[case("abc.def", None)]
    fn test_extract_bearer_token(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_bearer_token(&headers(value)), expected);
    }

    #[test]
    fn test_extract_bearer_token_ヘッダーが無ければnone() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    // ===== require_auth =====

    async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
        user.email
    }

    fn app(stub: StubAuthClient) -> Router {
        let state = AuthGuardState {
            auth_client: Arc::new(stub),
        };
        Router::new()
            .route("/me", get(whoami))
            .route_layer(from_fn_with_state(state, require_auth))
    }

    fn request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/me");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::from_uuid(Uuid::from_u128(1)), "owner@example.com")
    }

    #[tokio::test]
    async fn test_有効なトークンでユーザーがハンドラに渡る() {
        let sut = app(StubAuthClient::new().with_user("good", user()));

        let response = sut.oneshot(request(Some("Bearer good"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"owner@example.com");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Token good"))]
    #[case(Some("Bearer "))]
    #[case(Some("Bearer unknown"))]
    #[tokio::test]
    async fn test_トークンが無効なら401(#[case] authorization: Option<&str>) {
        let sut = app(StubAuthClient::new().with_user("good", user()));

        let response = sut.oneshot(request(authorization)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_認証サービスの通信失敗も401() {
        let stub = StubAuthClient::new()
            .with_user("good", user())
            .with_get_user_failure(AuthError::Network("connection refused".to_string()));
        let sut = app(stub);

        let response = sut.oneshot(request(Some("Bearer good"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
