//! # 認証 API ハンドラ
//!
//! - `POST /api/register` - ユーザー登録（確認メール送信）
//! - `POST /api/login` - パスワードログイン
//!
//! 確認メールのリンク先は、リバースプロキシの転送ヘッダーから
//! フロントエンドのオリジンを復元して組み立てる。

use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap};
use randapizza_domain::user::UserId;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, usecase::AuthUseCaseImpl};

const FORWARDED_HOST: &str = "x-forwarded-host";
const FORWARDED_PROTO: &str = "x-forwarded-proto";

pub struct AuthState {
    pub usecase:              AuthUseCaseImpl,
    /// 転送ヘッダーが無い場合のリンク先
    pub default_redirect_url: String,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email:    String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id:      UserId,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// 確認メールのリンク先を決める
///
/// `X-Forwarded-Host` があれば `{proto}://{host}/login`（proto の既定は `https`）。
/// 無ければ `default_url`。
pub fn email_redirect_url(headers: &HeaderMap, default_url: &str) -> String {
    let header = |name| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    match header(FORWARDED_HOST) {
        Some(host) => {
            let proto = header(FORWARDED_PROTO).unwrap_or("https");
            format!("{proto}://{host}/login")
        }
        None => default_url.to_string(),
    }
}

#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<Arc<AuthState>>,
    headers: HeaderMap,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let redirect_to = email_redirect_url(&headers, &state.default_redirect_url);
    let id = state
        .usecase
        .register(&req.email, &req.password, &redirect_to)
        .await?;

    Ok(Json(RegisterResponse {
        message: "Registration successful. Please check your email to confirm your account."
            .to_string(),
        id,
    }))
}

#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<AuthState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let access_token = state.usecase.login(&req.email, &req.password).await?;
    Ok(Json(LoginResponse { access_token }))
}
