//! # レシピユースケース
//!
//! 材料名でのレシピ保存と、ユーザーのレシピ履歴取得を担当する。
//!
//! 保存は全件解決できた場合のみ行う（部分保存はしない）。
//! 履歴の材料名は 1 回のまとめ取得で解決する。

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use randapizza_domain::{
    ingredient::{IngredientId, IngredientNameIndex},
    recipe::{NewRecipe, OwnerId},
};
use randapizza_infra::repository::{IngredientRepository, RecipeRepository};
use randapizza_shared::{event_log::event, log_business_event};

use crate::error::ApiError;

/// 履歴の 1 件（材料名に解決済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeHistoryEntry {
    pub ingredient_names: Vec<String>,
    pub liked:            bool,
    pub created_at:       DateTime<Utc>,
}

pub struct RecipeUseCaseImpl {
    ingredient_repo: Arc<dyn IngredientRepository>,
    recipe_repo:     Arc<dyn RecipeRepository>,
}

impl RecipeUseCaseImpl {
    pub fn new(
        ingredient_repo: Arc<dyn IngredientRepository>,
        recipe_repo: Arc<dyn RecipeRepository>,
    ) -> Self {
        Self {
            ingredient_repo,
            recipe_repo,
        }
    }

    /// 材料名を ID に解決してレシピを保存する
    ///
    /// 保存した ID 列（リクエスト順）を返す。
    pub async fn save(
        &self,
        owner_id: OwnerId,
        ingredient_names: &[String],
        liked: bool,
    ) -> Result<Vec<IngredientId>, ApiError> {
        // 名前解決はカテゴリで絞り込まず、ストアの全行を対象にする
        let index = IngredientNameIndex::from_ingredients(self.ingredient_repo.find_all().await?);
        let ingredient_ids = index.resolve(ingredient_names)?;

        let recipe = NewRecipe {
            owner_id,
            ingredient_ids,
            liked,
        };
        self.recipe_repo.insert(&recipe).await?;

        log_business_event!(
            event.category = event::category::RECIPE,
            event.action = event::action::RECIPE_SAVED,
            event.entity_type = event::entity_type::RECIPE,
            event.actor_id = %recipe.owner_id,
            event.result = event::result::SUCCESS,
            ingredient_count = recipe.ingredient_ids.len(),
            liked = recipe.liked,
            "レシピを保存しました"
        );

        Ok(recipe.ingredient_ids)
    }

    /// ユーザーのレシピ履歴を作成日時順で返す
    ///
    /// 解決できなくなった材料 ID は名前の列から除外する。
    pub async fn history(&self, owner_id: &OwnerId) -> Result<Vec<RecipeHistoryEntry>, ApiError> {
        let recipes = self.recipe_repo.find_by_owner(owner_id).await?;
        if recipes.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<IngredientId> = recipes
            .iter()
            .flat_map(|r| r.ingredient_ids.iter().copied())
            .collect();
        ids.sort_by_key(IngredientId::as_i64);
        ids.dedup();

        let names: HashMap<IngredientId, String> = self
            .ingredient_repo
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|i| (i.id(), i.name().to_string()))
            .collect();

        Ok(recipes
            .into_iter()
            .map(|recipe| RecipeHistoryEntry {
                ingredient_names: recipe
                    .ingredient_ids
                    .iter()
                    .filter_map(|id| names.get(id).cloned())
                    .collect(),
                liked:            recipe.liked,
                created_at:       recipe.created_at,
            })
            .collect())
    }
}
