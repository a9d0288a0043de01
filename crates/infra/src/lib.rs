//! # Rand-a-Pizza インフラ層
//!
//! 外部システムとの接続・通信を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL（ホスト型データストア）への接続プール管理
//! - **リポジトリ実装**: 材料・レシピ・プロフィール・コミュニティレシピの永続化
//! - **認証クライアント**: ホスト型認証サービスの REST API 呼び出し
//!
//! ## 依存関係
//!
//! ```text
//! server → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プール
//! - [`repository`] - リポジトリトレイトと PostgreSQL 実装
//! - [`auth`] - 認証サービスクライアント
//! - [`error`] - インフラ層エラー定義
//! - `mock` - インメモリのテストダブル（`test-utils` feature）

pub mod auth;
pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use auth::{AuthClient, AuthError, SupabaseAuthClient};
pub use error::{InfraError, InfraErrorKind};
