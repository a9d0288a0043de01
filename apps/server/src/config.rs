//! # サーバー設定
//!
//! 環境変数からサーバーの設定を読み込む。
//! 必須項目の欠落や不正値は起動時に [`ConfigError`] として報告する。

use std::env;

use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_EMAIL_REDIRECT_URL: &str = "http://localhost:5173/login";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// サーバーの設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// バインドアドレス
    pub host:               String,
    pub port:               u16,
    /// データストア（PostgreSQL）の接続 URL
    pub database_url:       String,
    /// ホスト型バックエンドのプロジェクト URL（認証 API のベース）
    pub supabase_url:       String,
    pub supabase_key:       String,
    /// `supabase_url` のオリジン（CSP に使用）
    pub supabase_origin:    String,
    /// 転送ヘッダーが無い場合の確認メールのリンク先
    pub email_redirect_url: String,
}

impl ServerConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let port = match lookup("PIZZA_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PIZZA_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let supabase_url = required("SUPABASE_URL")?;
        let supabase_origin = Url::parse(&supabase_url)
            .ok()
            .filter(|url| url.has_host())
            .map(|url| url.origin().ascii_serialization())
            .ok_or_else(|| ConfigError::Invalid {
                name:  "SUPABASE_URL",
                value: supabase_url.clone(),
            })?;

        Ok(Self {
            host: lookup("PIZZA_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url: required("DATABASE_URL")?,
            supabase_key: required("SUPABASE_KEY")?,
            supabase_url,
            supabase_origin,
            email_redirect_url: lookup("EMAIL_REDIRECT_URL")
                .unwrap_or_else(|| DEFAULT_EMAIL_REDIRECT_URL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DATABASE_URL", "postgres://localhost/pizza"),
        ("SUPABASE_URL", "https://abc.supabase.co/"),
        ("SUPABASE_KEY", "anon-key"),
    ];

    #[test]
    fn test_必須項目のみで既定値が補完される() {
        let config = load(&REQUIRED).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.supabase_origin, "https://abc.supabase.co");
        assert_eq!(config.email_redirect_url, "http://localhost:5173/login");
    }

    #[test]
    fn test_任意項目は環境変数で上書きできる() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("PIZZA_HOST", "127.0.0.1"),
            ("PIZZA_PORT", "9000"),
            ("EMAIL_REDIRECT_URL", "https://pizza.example.com/login"),
        ]);

        let config = load(&vars).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.email_redirect_url, "https://pizza.example.com/login");
    }

    #[test]
    fn test_必須項目が無ければmissingになる() {
        let vars: Vec<_> = REQUIRED
            .iter()
            .copied()
            .filter(|(k, _)| *k != "SUPABASE_KEY")
            .collect();

        assert_eq!(load(&vars).unwrap_err(), ConfigError::Missing("SUPABASE_KEY"));
    }

    #[test]
    fn test_ポート番号が数値でなければinvalidになる() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PIZZA_PORT", "eighty"));

        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::Invalid { name: "PIZZA_PORT", .. }
        ));
    }

    #[test]
    fn test_supabase_urlがurlでなければinvalidになる() {
        let vars: Vec<_> = REQUIRED
            .iter()
            .map(|(k, v)| if *k == "SUPABASE_URL" { (*k, "not a url") } else { (*k, *v) })
            .collect();

        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::Invalid { name: "SUPABASE_URL", .. }
        ));
    }
}
