//! # ドメイン層エラー定義
//!
//! 入力値の検証失敗やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗（材料数の範囲外など） |
//! | `UnknownIngredients` | 400 Bad Request | カタログに存在しない材料名 |
//!
//! ## 使用例
//!
//! ```rust
//! use randapizza_domain::DomainError;
//!
//! fn validate_count(count: i64) -> Result<(), DomainError> {
//!     if !(1..=10).contains(&count) {
//!         return Err(DomainError::Validation(
//!             "num_ingredients must be 1-10".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_count(0).is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
/// `Display` の文言はそのままクライアントに返すため、英語で記述する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// メッセージには違反した制約をそのまま含める。
    #[error("{0}")]
    Validation(String),

    /// カタログで解決できなかった材料名
    ///
    /// レシピ保存は全件解決できた場合のみ成功する（部分保存はしない）。
    /// 未解決の名前はリクエスト順で保持する。
    #[error("Unknown ingredients: {0:?}")]
    UnknownIngredients(Vec<String>),
}
