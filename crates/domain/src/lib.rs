//! # Rand-a-Pizza ドメイン層
//!
//! ピザの材料カタログ、レシピ、プロフィール、ダッシュボード集計といった
//! ビジネスルールを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! server → infra → domain
//! ```
//!
//! ドメイン層はデータベースや認証サービスに一切依存しない。
//! 乱数生成器も呼び出し側から受け取るため、テストでは固定シードで再現できる。
//!
//! ## モジュール構成
//!
//! - [`ingredient`] - 材料、カタログ、ランダム選択、名前解決
//! - [`recipe`] - 保存済みレシピ（ユーザーの生成履歴）
//! - [`user`] - 認証済みユーザー
//! - [`profile`] - ビジネスプロフィール
//! - [`dashboard`] - コミュニティレシピの KPI 集計
//! - [`error`] - ドメイン層で発生するエラーの定義
//!
//! ## 使用例
//!
//! ```rust
//! use randapizza_domain::{DomainError, ingredient::IngredientCount};
//!
//! let count = IngredientCount::new(5).unwrap();
//! assert_eq!(count.get(), 5);
//!
//! let err = IngredientCount::new(11).unwrap_err();
//! assert!(matches!(err, DomainError::Validation(_)));
//! ```

#[macro_use]
mod macros;

pub mod dashboard;
pub mod error;
pub mod ingredient;
pub mod profile;
pub mod recipe;
pub mod user;

pub use error::DomainError;
