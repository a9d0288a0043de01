//! # API エラー定義
//!
//! ユースケース・ハンドラで発生するエラーと、RFC 9457 形式の
//! HTTP レスポンスへの変換を定義する。
//!
//! | バリアント | ステータス | detail |
//! |-----------|-----------|--------|
//! | `Domain(Validation)` | 400 | 違反した制約 |
//! | `Domain(UnknownIngredients)` | 400 | `Unknown ingredients: [..]` |
//! | `BadRequest` | 400 | 認証サービスの文言 |
//! | `Unauthorized` | 401 | 認証失敗の理由 |
//! | `Infra` | 500 | 固定文言 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use randapizza_domain::DomainError;
use randapizza_infra::InfraError;
use randapizza_shared::{ErrorResponse, event_log::error as log_error};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// 認証サービスが拒否した登録要求など
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    #[error("認証に失敗しました: {0}")]
    Unauthorized(String),

    #[error("データベースエラー: {0}")]
    Infra(#[from] InfraError),
}

impl ApiError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            ApiError::Domain(err @ DomainError::Validation(_)) => {
                ErrorResponse::validation_error(err.to_string())
            }
            ApiError::Domain(err @ DomainError::UnknownIngredients(_)) => ErrorResponse::new(
                "unknown-ingredients",
                "Unknown Ingredients",
                400,
                err.to_string(),
            ),
            ApiError::BadRequest(msg) => ErrorResponse::bad_request(msg.clone()),
            ApiError::Unauthorized(msg) => ErrorResponse::unauthorized(msg.clone()),
            ApiError::Infra(_) => ErrorResponse::internal_error(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Infra(e) = &self {
            tracing::error!(
                error.category = log_error::category::INFRASTRUCTURE,
                error.kind = log_error::kind::DATABASE,
                span_trace = %e.span_trace(),
                "データベースエラー: {}",
                e
            );
        }

        let body = self.to_error_response();
        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
