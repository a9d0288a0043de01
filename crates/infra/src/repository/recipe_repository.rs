//! # RecipeRepository
//!
//! ユーザーが保存したレシピ（`userdata` テーブル）の書き込みと履歴取得を担当する。
//!
//! 材料は ID 配列（`bigint[]`）で保存し、保存時の順序をそのまま保持する。
//! `created_at` はストアの既定値（`now()`）で採番される。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use randapizza_domain::{
    ingredient::IngredientId,
    recipe::{NewRecipe, OwnerId, SavedRecipe},
};
use sqlx::PgPool;

use crate::error::InfraError;

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// レシピを 1 行挿入する
    async fn insert(&self, recipe: &NewRecipe) -> Result<(), InfraError>;

    /// 所有者のレシピを作成日時の昇順で取得する
    async fn find_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<SavedRecipe>, InfraError>;
}

#[derive(Debug, Clone)]
pub struct PostgresRecipeRepository {
    pool: PgPool,
}

impl PostgresRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SavedRecipeRow {
    user_id:        String,
    ingredient_ids: Option<Vec<i64>>,
    liked:          Option<bool>,
    created_at:     DateTime<Utc>,
}

impl From<SavedRecipeRow> for SavedRecipe {
    fn from(row: SavedRecipeRow) -> Self {
        SavedRecipe {
            owner_id:       OwnerId::new(row.user_id),
            ingredient_ids: row
                .ingredient_ids
                .unwrap_or_default()
                .into_iter()
                .map(IngredientId::new)
                .collect(),
            liked:          row.liked.unwrap_or(false),
            created_at:     row.created_at,
        }
    }
}

#[async_trait]
impl RecipeRepository for PostgresRecipeRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(owner_id = %recipe.owner_id))]
    async fn insert(&self, recipe: &NewRecipe) -> Result<(), InfraError> {
        let ids: Vec<i64> = recipe
            .ingredient_ids
            .iter()
            .map(IngredientId::as_i64)
            .collect();

        sqlx::query(
            r#"
            INSERT INTO userdata (user_id, ingredient_ids, liked)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(recipe.owner_id.as_str())
        .bind(&ids)
        .bind(recipe.liked)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(owner_id = %owner_id))]
    async fn find_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<SavedRecipe>, InfraError> {
        let rows = sqlx::query_as::<_, SavedRecipeRow>(
            r#"
            SELECT user_id, ingredient_ids::bigint[] AS ingredient_ids, liked, created_at
            FROM userdata
            WHERE user_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SavedRecipe::from).collect())
    }
}
