//! # 材料 API ハンドラ
//!
//! - `GET /api/ingredients` - カテゴリ別の材料名
//! - `POST /api/random-pizza` - ランダムな材料の組み合わせ

use std::sync::Arc;

use axum::{Json, extract::State};
use randapizza_domain::ingredient::{IngredientCategory, IngredientCount};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, usecase::CatalogUseCaseImpl};

pub struct CatalogState {
    pub usecase: CatalogUseCaseImpl,
}

/// カテゴリ別の材料名（ストア順）
#[derive(Debug, Serialize)]
pub struct IngredientCatalogDto {
    pub toppings: Vec<String>,
    pub cheeses:  Vec<String>,
    pub doughs:   Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RandomPizzaRequest {
    #[serde(default = "default_num_ingredients")]
    pub num_ingredients: i64,
}

fn default_num_ingredients() -> i64 {
    IngredientCount::DEFAULT
}

#[derive(Debug, Serialize)]
pub struct RandomPizzaResponse {
    pub ingredients: Vec<String>,
}

#[tracing::instrument(skip_all)]
pub async fn get_ingredients(
    State(state): State<Arc<CatalogState>>,
) -> Result<Json<IngredientCatalogDto>, ApiError> {
    let catalog = state.usecase.get_catalog().await?;

    let names = |category| -> Vec<String> {
        catalog
            .names_in(category)
            .into_iter()
            .map(String::from)
            .collect()
    };

    Ok(Json(IngredientCatalogDto {
        toppings: names(IngredientCategory::Toppings),
        cheeses:  names(IngredientCategory::Cheeses),
        doughs:   names(IngredientCategory::Doughs),
    }))
}

/// 件数の検証はストアへのアクセスより先に行う
#[tracing::instrument(skip_all, fields(num_ingredients = req.num_ingredients))]
pub async fn random_pizza(
    State(state): State<Arc<CatalogState>>,
    Json(req): Json<RandomPizzaRequest>,
) -> Result<Json<RandomPizzaResponse>, ApiError> {
    let count = IngredientCount::new(req.num_ingredients)?;
    let ingredients = state.usecase.random_pizza(count).await?;

    Ok(Json(RandomPizzaResponse { ingredients }))
}
