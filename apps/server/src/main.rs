//! # Rand-a-Pizza API サーバー
//!
//! ランダムピザ生成、レシピ保存、認証、ビジネスダッシュボードを提供する
//! HTTP API サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `PIZZA_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PIZZA_PORT` | No | ポート番号（デフォルト: `8000`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `SUPABASE_URL` | **Yes** | ホスト型ストア / 認証サービスのベース URL |
//! | `SUPABASE_KEY` | **Yes** | 認証サービスの API キー |
//! | `EMAIL_REDIRECT_URL` | No | 確認メールの既定リンク先 |
//! | `LOG_FORMAT` | No | `json` または `pretty` |
//! | `RUST_LOG` | No | ログフィルタ |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p randapizza-server
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::http::HeaderValue;
use randapizza_infra::{
    SupabaseAuthClient,
    db::{self, PostgresDatabaseProbe},
    repository::{
        PostgresCommunityRecipeRepository,
        PostgresIngredientRepository,
        PostgresProfileRepository,
        PostgresRecipeRepository,
    },
};
use randapizza_server::{
    app::{AppDeps, build_app},
    config::ServerConfig,
    middleware::content_security_policy,
};
use randapizza_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("randapizza-server"));
    let _tracing_guard = tracing::info_span!("app", service = "randapizza-server").entered();

    let config = ServerConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    let csp = content_security_policy(&config.supabase_origin);
    let deps = AppDeps {
        ingredient_repo:         Arc::new(PostgresIngredientRepository::new(pool.clone())),
        recipe_repo:             Arc::new(PostgresRecipeRepository::new(pool.clone())),
        profile_repo:            Arc::new(PostgresProfileRepository::new(pool.clone())),
        community_recipe_repo:   Arc::new(PostgresCommunityRecipeRepository::new(pool.clone())),
        auth_client:             Arc::new(SupabaseAuthClient::new(
            &config.supabase_url,
            config.supabase_key.clone(),
        )),
        db_probe:                Arc::new(PostgresDatabaseProbe::new(pool)),
        default_redirect_url:    config.email_redirect_url.clone(),
        content_security_policy: HeaderValue::from_str(&csp)
            .context("Content-Security-Policy ヘッダーの生成に失敗しました")?,
    };
    let app = build_app(deps);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
