//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! ログフィールドの命名規約とヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## エラーコンテキスト
//!
//! `tracing::error!` に `error.category` と `error.kind` を直接追加する。
//! 定数は [`error`] モジュールで提供。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` を付与し、INFO レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: [`event::category`] の定数
/// - `event.action`: [`event::action`] の定数
/// - `event.result`: [`event::result`] の定数
///
/// ## 推奨フィールド
///
/// - `event.entity_type`, `event.entity_id`, `event.actor_id`
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    pub mod category {
        pub const RECIPE: &str = "recipe";
        pub const AUTH: &str = "auth";
        pub const PROFILE: &str = "profile";
    }

    pub mod action {
        // レシピ
        pub const RECIPE_SAVED: &str = "recipe.saved";

        // 認証
        pub const SIGNUP_SUCCESS: &str = "auth.signup_success";
        pub const SIGNUP_FAILURE: &str = "auth.signup_failure";
        pub const LOGIN_SUCCESS: &str = "auth.login_success";
        pub const LOGIN_FAILURE: &str = "auth.login_failure";

        // プロフィール
        pub const PROFILE_CREATED: &str = "profile.created";
    }

    pub mod entity_type {
        pub const RECIPE: &str = "recipe";
        pub const USER: &str = "user";
        pub const PROFILE: &str = "profile";
    }

    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    pub mod category {
        /// データベース
        pub const INFRASTRUCTURE: &str = "infrastructure";
        /// 認証プロバイダ呼び出し
        pub const EXTERNAL_SERVICE: &str = "external_service";
    }

    pub mod kind {
        pub const DATABASE: &str = "database";
        pub const AUTH_PROVIDER: &str = "auth_provider";
    }
}
