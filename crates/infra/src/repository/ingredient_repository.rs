//! # IngredientRepository
//!
//! 材料マスタ（`ingreds` テーブル）の読み取りを担当する。
//! 材料の追加・更新はデータ投入スクリプト側の責務で、このリポジトリは読み取り専用。

use async_trait::async_trait;
use randapizza_domain::ingredient::{Ingredient, IngredientId};
use sqlx::PgPool;

use crate::error::InfraError;

#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// 全材料を ID 順で取得する
    async fn find_all(&self) -> Result<Vec<Ingredient>, InfraError>;

    /// 指定 ID の材料をまとめて取得する
    ///
    /// 存在しない ID は結果に含まれない。順序は保証しない。
    async fn find_by_ids(&self, ids: &[IngredientId]) -> Result<Vec<Ingredient>, InfraError>;
}

#[derive(Debug, Clone)]
pub struct PostgresIngredientRepository {
    pool: PgPool,
}

impl PostgresIngredientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct IngredientRow {
    id:       i64,
    name:     String,
    category: Option<String>,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Ingredient::new(
            IngredientId::new(row.id),
            row.name,
            row.category.unwrap_or_default(),
        )
    }
}

#[async_trait]
impl IngredientRepository for PostgresIngredientRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Ingredient>, InfraError> {
        let rows = sqlx::query_as::<_, IngredientRow>(
            r#"
            SELECT id::bigint AS id, name, category
            FROM ingreds
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Ingredient::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[IngredientId]) -> Result<Vec<Ingredient>, InfraError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = ids.iter().map(IngredientId::as_i64).collect();
        let rows = sqlx::query_as::<_, IngredientRow>(
            r#"
            SELECT id::bigint AS id, name, category
            FROM ingreds
            WHERE id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Ingredient::from).collect())
    }
}
