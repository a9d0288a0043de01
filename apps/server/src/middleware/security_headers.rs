//! # セキュリティヘッダー
//!
//! 全レスポンスに付与する Content-Security-Policy を組み立てる。
//! データストアのオリジンからの画像読み込みと API 接続のみを追加で許可する。

/// CSP ヘッダー値を組み立てる
///
/// `store_origin` はスキームとホストのみ（例: `https://abc.supabase.co`）。
pub fn content_security_policy(store_origin: &str) -> String {
    format!(
        "default-src 'self'; \
         img-src 'self' {store_origin} data: https:; \
         style-src 'self' 'unsafe-inline'; \
         script-src 'self' 'unsafe-inline'; \
         connect-src 'self' {store_origin};"
    )
}
