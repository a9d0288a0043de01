//! # レシピ API ハンドラ
//!
//! - `POST /api/save-recipe` - 材料名でレシピを保存
//! - `GET /api/user-recipes/{user_id}` - ユーザーのレシピ履歴

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use randapizza_domain::{ingredient::IngredientId, recipe::OwnerId};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    usecase::{RecipeHistoryEntry, RecipeUseCaseImpl},
};

pub struct RecipeState {
    pub usecase: RecipeUseCaseImpl,
}

#[derive(Debug, Deserialize)]
pub struct SaveRecipeRequest {
    pub user_id:     String,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub liked:       bool,
}

#[derive(Debug, Serialize)]
pub struct SaveRecipeResponse {
    pub saved_ids:   Vec<IngredientId>,
    pub saved_count: usize,
}

#[derive(Debug, Serialize)]
pub struct RecipeHistoryDto {
    pub ingredient_names: Vec<String>,
    pub liked:            bool,
    pub created_at:       DateTime<Utc>,
}

impl From<RecipeHistoryEntry> for RecipeHistoryDto {
    fn from(entry: RecipeHistoryEntry) -> Self {
        Self {
            ingredient_names: entry.ingredient_names,
            liked:            entry.liked,
            created_at:       entry.created_at,
        }
    }
}

#[tracing::instrument(skip_all, fields(user_id = %req.user_id))]
pub async fn save_recipe(
    State(state): State<Arc<RecipeState>>,
    Json(req): Json<SaveRecipeRequest>,
) -> Result<Json<SaveRecipeResponse>, ApiError> {
    let saved_ids = state
        .usecase
        .save(OwnerId::new(req.user_id), &req.ingredients, req.liked)
        .await?;

    Ok(Json(SaveRecipeResponse {
        saved_count: saved_ids.len(),
        saved_ids,
    }))
}

#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn get_user_recipes(
    State(state): State<Arc<RecipeState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<RecipeHistoryDto>>, ApiError> {
    let history = state.usecase.history(&OwnerId::new(user_id)).await?;

    Ok(Json(history.into_iter().map(RecipeHistoryDto::from).collect()))
}
