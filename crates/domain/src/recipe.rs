//! # レシピ
//!
//! ユーザーが保存した材料の組み合わせと評価（liked）を定義する。
//!
//! レシピは保存時に作成され、このシステムでは更新・削除しない。
//! 作成日時はストアが採番する。

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::ingredient::IngredientId;

/// レシピの所有者 ID
///
/// フロントエンドが発行する任意の文字列（localStorage の UUID など）。
/// 認証サービスの [`UserId`](crate::user::UserId) とは独立している。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 新規レシピ（保存リクエスト）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub owner_id:       OwnerId,
    pub ingredient_ids: Vec<IngredientId>,
    pub liked:          bool,
}

/// 保存済みレシピ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRecipe {
    pub owner_id:       OwnerId,
    /// 保存時の順序を保持する
    pub ingredient_ids: Vec<IngredientId>,
    pub liked:          bool,
    pub created_at:     DateTime<Utc>,
}
