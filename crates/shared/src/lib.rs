//! # Rand-a-Pizza 共有ユーティリティ
//!
//! サーバーとインフラ層の双方から使う、ビジネスロジックを含まない部品を置く。
//!
//! - [`error_response`] - RFC 9457 形式のエラーレスポンス
//! - [`health`] - ヘルスチェックのレスポンス型
//! - [`event_log`] - ビジネスイベントの構造化ログ
//! - `observability` / `canonical_log` - トレーシング初期化とリクエストサマリログ
//!   （`observability` feature 有効時のみ）

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod event_log;
pub mod health;
#[cfg(feature = "observability")]
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
