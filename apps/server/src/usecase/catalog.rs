//! # 材料カタログユースケース
//!
//! カタログの取得とランダムピザの生成を担当する。

use std::sync::Arc;

use randapizza_domain::ingredient::{Catalog, IngredientCount};
use randapizza_infra::repository::IngredientRepository;

use crate::error::ApiError;

pub struct CatalogUseCaseImpl {
    ingredient_repo: Arc<dyn IngredientRepository>,
}

impl CatalogUseCaseImpl {
    pub fn new(ingredient_repo: Arc<dyn IngredientRepository>) -> Self {
        Self { ingredient_repo }
    }

    /// 既知カテゴリの材料でカタログを構築する
    pub async fn get_catalog(&self) -> Result<Catalog, ApiError> {
        let ingredients = self.ingredient_repo.find_all().await?;

        for skipped in ingredients.iter().filter(|i| i.category().is_none()) {
            tracing::debug!(
                ingredient_id = %skipped.id(),
                name = skipped.name(),
                "未知のカテゴリの材料を除外しました"
            );
        }

        Ok(Catalog::from_ingredients(ingredients))
    }

    /// カタログ全体から重複なしで材料名を選ぶ
    ///
    /// 件数の検証は呼び出し側で [`IngredientCount`] として済ませておく。
    pub async fn random_pizza(&self, count: IngredientCount) -> Result<Vec<String>, ApiError> {
        let catalog = self.get_catalog().await?;
        Ok(catalog.sample(count, &mut rand::rng()))
    }
}
