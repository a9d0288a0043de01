//! # ヘルスチェックハンドラ
//!
//! ```text
//! GET /health        → 200 {"status":"healthy","version":"0.1.0"}
//! GET /health/ready  → 200/503 {"status":"ready","checks":{"database":"ok"}}
//! ```

use std::{collections::HashMap, sync::Arc};

use axum::{Json, extract::State, http::StatusCode};
use randapizza_infra::db::DatabaseProbe;
use randapizza_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

pub struct ReadinessState {
    pub db_probe: Arc<dyn DatabaseProbe>,
}

/// Liveness チェック
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness チェック
///
/// データベースに到達できなければ 503 を返す。
pub async fn readiness_check(
    State(state): State<Arc<ReadinessState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database = match state.db_probe.ping().await {
        Ok(()) => CheckStatus::Ok,
        Err(e) => {
            tracing::warn!("データベースの疎通確認に失敗しました: {}", e);
            CheckStatus::Error
        }
    };

    let response =
        ReadinessResponse::from_checks(HashMap::from([("database".to_string(), database)]));
    let status = match response.status {
        ReadinessStatus::Ready => StatusCode::OK,
        ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(response))
}
