//! # ミドルウェア
//!
//! - `auth`: Bearer トークンの認証ガード
//! - `security_headers`: Content-Security-Policy ヘッダー

pub mod auth;
pub mod security_headers;

pub use auth::{AuthGuardState, extract_bearer_token, require_auth};
pub use security_headers::content_security_policy;
