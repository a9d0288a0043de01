//! # ユーザー
//!
//! 認証サービスが解決したユーザーの識別情報を定義する。
//!
//! ユーザー登録・パスワード管理はホスト型の認証サービスが担うため、
//! このクレートが保持するのは ID とメールアドレスのみ。

use serde::{Deserialize, Serialize};

define_uuid_id! {
    /// ユーザー ID
    ///
    /// 認証サービスが採番する UUID。プロフィールの主キーとしても使う。
    pub struct UserId;
}

/// 認証済みユーザー
///
/// Bearer トークンを認証サービスで検証した結果。
/// 認証ミドルウェアがリクエスト extensions に格納し、ハンドラが参照する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id:    UserId,
    /// 電話番号認証などでメールを持たないユーザーは空文字列
    pub email: String,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}
