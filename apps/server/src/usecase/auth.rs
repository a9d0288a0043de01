//! # 認証ユースケース
//!
//! ユーザー登録とログインを認証サービスへ委譲する。
//! 認証サービスの拒否理由はそのままクライアントに返す。

use std::sync::Arc;

use randapizza_domain::user::UserId;
use randapizza_infra::{AuthClient, AuthError};
use randapizza_shared::{event_log::{self, event}, log_business_event};

use crate::error::ApiError;

pub struct AuthUseCaseImpl {
    auth_client: Arc<dyn AuthClient>,
}

impl AuthUseCaseImpl {
    pub fn new(auth_client: Arc<dyn AuthClient>) -> Self {
        Self { auth_client }
    }

    /// ユーザーを登録する。失敗はすべて 400 として扱う
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<UserId, ApiError> {
        match self.auth_client.sign_up(email, password, redirect_to).await {
            Ok(result) => {
                log_business_event!(
                    event.category = event::category::AUTH,
                    event.action = event::action::SIGNUP_SUCCESS,
                    event.entity_type = event::entity_type::USER,
                    event.entity_id = %result.user_id,
                    event.result = event::result::SUCCESS,
                    "ユーザー登録成功"
                );
                Ok(result.user_id)
            }
            Err(e) => {
                log_auth_failure(event::action::SIGNUP_FAILURE, &e);
                Err(ApiError::BadRequest(e.to_string()))
            }
        }
    }

    /// ログインしてアクセストークンを返す。失敗はすべて 401 として扱う
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        match self.auth_client.sign_in(email, password).await {
            Ok(result) => {
                log_business_event!(
                    event.category = event::category::AUTH,
                    event.action = event::action::LOGIN_SUCCESS,
                    event.entity_type = event::entity_type::USER,
                    event.result = event::result::SUCCESS,
                    "ログイン成功"
                );
                Ok(result.access_token)
            }
            Err(e) => {
                log_auth_failure(event::action::LOGIN_FAILURE, &e);
                Err(ApiError::Unauthorized(e.to_string()))
            }
        }
    }
}

fn log_auth_failure(action: &'static str, error: &AuthError) {
    if matches!(error, AuthError::Network(_) | AuthError::Unexpected(_)) {
        tracing::error!(
            error.category = event_log::error::category::EXTERNAL_SERVICE,
            error.kind = event_log::error::kind::AUTH_PROVIDER,
            "認証サービスの呼び出しに失敗しました: {}",
            error
        );
    }

    log_business_event!(
        event.category = event::category::AUTH,
        event.action = action,
        event.entity_type = event::entity_type::USER,
        event.result = event::result::FAILURE,
        reason = %error,
        "認証サービスが要求を拒否しました"
    );
}
