//! # ルーター構築
//!
//! 依存コンポーネントを受け取り、ルーティングとミドルウェアを組み立てる。
//! `main` からも統合テストからも同じ経路で構築する。
//!
//! ## レイヤー構成（外側から）
//!
//! ```text
//! Content-Security-Policy 付与
//!   → リクエスト ID 採番 (UUID v7) → リクエスト ID をレスポンスへ伝播
//!     → TraceLayer (span) → Canonical Log Line → CORS
//!       → ルート（保護ルートは認証ガード付き）
//! ```

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, header},
    middleware::from_fn_with_state,
    routing::{get, post},
};
use randapizza_infra::{
    AuthClient,
    db::DatabaseProbe,
    repository::{
        CommunityRecipeRepository,
        IngredientRepository,
        ProfileRepository,
        RecipeRepository,
    },
};
use randapizza_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::{
    handler::{
        AuthState,
        CatalogState,
        DashboardState,
        ProfileState,
        ReadinessState,
        RecipeState,
        get_business_stats,
        get_ingredients,
        get_profile,
        get_user_recipes,
        health_check,
        login,
        random_pizza,
        readiness_check,
        register,
        save_recipe,
    },
    middleware::{AuthGuardState, require_auth},
    usecase::{
        AuthUseCaseImpl,
        CatalogUseCaseImpl,
        DashboardUseCaseImpl,
        ProfileUseCaseImpl,
        RecipeUseCaseImpl,
    },
};

/// アプリケーションの依存コンポーネント
pub struct AppDeps {
    pub ingredient_repo:         Arc<dyn IngredientRepository>,
    pub recipe_repo:             Arc<dyn RecipeRepository>,
    pub profile_repo:            Arc<dyn ProfileRepository>,
    pub community_recipe_repo:   Arc<dyn CommunityRecipeRepository>,
    pub auth_client:             Arc<dyn AuthClient>,
    pub db_probe:                Arc<dyn DatabaseProbe>,
    /// 確認メールのリンク先（転送ヘッダーが無い場合）
    pub default_redirect_url:    String,
    /// 全レスポンスに付与する Content-Security-Policy
    pub content_security_policy: HeaderValue,
}

/// ルーターを構築する
pub fn build_app(deps: AppDeps) -> Router {
    let readiness_state = Arc::new(ReadinessState {
        db_probe: deps.db_probe,
    });
    let catalog_state = Arc::new(CatalogState {
        usecase: CatalogUseCaseImpl::new(deps.ingredient_repo.clone()),
    });
    let recipe_state = Arc::new(RecipeState {
        usecase: RecipeUseCaseImpl::new(deps.ingredient_repo, deps.recipe_repo),
    });
    let auth_state = Arc::new(AuthState {
        usecase:              AuthUseCaseImpl::new(deps.auth_client.clone()),
        default_redirect_url: deps.default_redirect_url,
    });
    let profile_state = Arc::new(ProfileState {
        usecase: ProfileUseCaseImpl::new(deps.profile_repo),
    });
    let dashboard_state = Arc::new(DashboardState {
        usecase: DashboardUseCaseImpl::new(deps.community_recipe_repo),
    });
    let guard_state = AuthGuardState {
        auth_client: deps.auth_client,
    };

    let public_routes = Router::new()
        .route("/api/ingredients", get(get_ingredients))
        .route("/api/random-pizza", post(random_pizza))
        .with_state(catalog_state)
        .merge(
            Router::new()
                .route("/api/save-recipe", post(save_recipe))
                .route("/api/user-recipes/{user_id}", get(get_user_recipes))
                .with_state(recipe_state),
        )
        .merge(
            Router::new()
                .route("/api/register", post(register))
                .route("/api/login", post(login))
                .with_state(auth_state),
        );

    // 認証ガードは route_layer でマッチしたルートにのみ適用する
    let protected_routes = Router::new()
        .route("/api/profile", get(get_profile))
        .with_state(profile_state)
        .merge(
            Router::new()
                .route("/api/business/stats", get(get_business_stats))
                .with_state(dashboard_state),
        )
        .route_layer(from_fn_with_state(guard_state, require_auth));

    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::very_permissive())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            deps.content_security_policy,
        ))
}
