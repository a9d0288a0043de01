//! # 認証サービスクライアント
//!
//! ホスト型認証サービス（Supabase Auth / GoTrue）の REST API を呼び出す。
//!
//! ## エンドポイント
//!
//! - `POST /auth/v1/signup?redirect_to=...` - ユーザー登録（確認メール送信）
//! - `POST /auth/v1/token?grant_type=password` - パスワードログイン
//! - `GET /auth/v1/user` - アクセストークンからユーザーを解決
//!
//! 全リクエストに `apikey` ヘッダー（プロジェクトの API キー）を付与する。
//! リトライはしない。

use async_trait::async_trait;
use randapizza_domain::user::{AuthenticatedUser, UserId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// 認証サービスクライアントエラー
///
/// 登録・ログインの失敗時は `Display` の文言がそのままクライアントに返るため英語で記述する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// 認証サービスが要求を拒否した（メッセージはサービスの文言そのまま）
    #[error("{0}")]
    Rejected(String),

    /// アクセストークンが無効・期限切れ
    #[error("Invalid or expired token")]
    InvalidToken,

    /// 接続失敗・タイムアウト
    #[error("Authentication service unreachable: {0}")]
    Network(String),

    /// 想定外のステータスやレスポンス形式
    #[error("Unexpected authentication service response: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AuthError::Unexpected(err.to_string())
        } else {
            AuthError::Network(err.to_string())
        }
    }
}

/// ユーザー登録結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpResult {
    pub user_id: UserId,
}

/// ログイン結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInResult {
    pub access_token: String,
}

/// 認証サービスクライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// ユーザーを登録する。確認メールのリンク先は `redirect_to`
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<SignUpResult, AuthError>;

    /// メールアドレスとパスワードでログインする
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInResult, AuthError>;

    /// アクセストークンからユーザーを解決する
    async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email:    &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    id:    Uuid,
    email: Option<String>,
}

/// サインアップのレスポンス
///
/// メール確認が必要な設定ではユーザーそのもの、自動確認の設定では
/// `{ user, access_token, ... }` のセッションが返る。
#[derive(Debug, Deserialize)]
struct SignUpBody {
    id:   Option<Uuid>,
    user: Option<UserBody>,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    access_token: String,
}

/// Supabase Auth クライアント実装
pub struct SupabaseAuthClient {
    base_url: String,
    api_key:  String,
    client:   reqwest::Client,
}

impl SupabaseAuthClient {
    /// # 引数
    ///
    /// - `base_url`: プロジェクト URL（例: `https://abc.supabase.co`）
    /// - `api_key`: プロジェクトの API キー
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key:  api_key.into(),
            client:   reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }
}

/// 失敗レスポンスからユーザー向けメッセージを取り出す
///
/// GoTrue はバージョンによって `msg` / `message` / `error_description` / `error`
/// のいずれかにメッセージを入れる。
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        ["msg", "message", "error_description", "error"]
            .iter()
            .find_map(|key| v.get(key).and_then(Value::as_str))
    });

    match message {
        Some(message) => message.to_string(),
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => format!("Authentication service returned {status}"),
    }
}

async fn rejection(response: reqwest::Response) -> AuthError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    AuthError::Rejected(error_message(status, &body))
}

#[async_trait]
impl AuthClient for SupabaseAuthClient {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<SignUpResult, AuthError> {
        let response = self
            .client
            .post(self.endpoint("/signup"))
            .query(&[("redirect_to", redirect_to)])
            .header("apikey", &self.api_key)
            .json(&CredentialsRequest { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body = response.json::<SignUpBody>().await?;
        body.id
            .or(body.user.map(|u| u.id))
            .map(|id| SignUpResult {
                user_id: UserId::from_uuid(id),
            })
            .ok_or_else(|| AuthError::Unexpected("sign-up response has no user id".to_string()))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInResult, AuthError> {
        let response = self
            .client
            .post(self.endpoint("/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&CredentialsRequest { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body = response.json::<TokenBody>().await?;
        Ok(SignInResult {
            access_token: body.access_token,
        })
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        let response = self
            .client
            .get(self.endpoint("/user"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let user = response.json::<UserBody>().await?;
                Ok(AuthenticatedUser::new(
                    UserId::from_uuid(user.id),
                    user.email.unwrap_or_default(),
                ))
            }
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Err(AuthError::InvalidToken)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AuthError::Unexpected(format!(
                    "status {status}: {body}"
                )))
            }
        }
    }
}
