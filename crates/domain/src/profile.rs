//! # プロフィール
//!
//! ビジネスダッシュボード利用者のプロフィールを定義する。
//!
//! プロフィールは初回取得時に遅延作成される。作成時の会社名は
//! [`PLACEHOLDER_COMPANY_NAME`] で、利用者が後から更新する想定。

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::user::{AuthenticatedUser, UserId};

/// 遅延作成時に設定する会社名
pub const PLACEHOLDER_COMPANY_NAME: &str = "Unknown Company";

/// 新規プロフィール（作成リクエスト）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub id:           UserId,
    pub email:        String,
    pub company_name: String,
}

impl NewProfile {
    /// 認証済みユーザーからプレースホルダー付きのプロフィールを作る
    pub fn placeholder_for(user: &AuthenticatedUser) -> Self {
        Self {
            id:           user.id,
            email:        user.email.clone(),
            company_name: PLACEHOLDER_COMPANY_NAME.to_string(),
        }
    }
}

/// プロフィール
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id:           UserId,
    pub email:        String,
    pub company_name: String,
    pub created_at:   DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_プレースホルダーは認証メールと固定の会社名を持つ() {
        let user = AuthenticatedUser::new(UserId::from_uuid(Uuid::nil()), "owner@example.com");

        let profile = NewProfile::placeholder_for(&user);

        assert_eq!(
            profile,
            NewProfile {
                id:           user.id,
                email:        "owner@example.com".to_string(),
                company_name: "Unknown Company".to_string(),
            }
        );
    }
}
