//! # ユースケース層
//!
//! リポジトリと認証クライアントを組み合わせたビジネスロジックを実装する。
//! 依存はすべて `Arc<dyn Trait>` で受け取り、テストではモックに差し替える。

pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod profile;
pub mod recipe;

pub use auth::AuthUseCaseImpl;
pub use catalog::CatalogUseCaseImpl;
pub use dashboard::DashboardUseCaseImpl;
pub use profile::ProfileUseCaseImpl;
pub use recipe::{RecipeHistoryEntry, RecipeUseCaseImpl};
