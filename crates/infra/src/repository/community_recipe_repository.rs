//! # CommunityRecipeRepository
//!
//! 投票付きのコミュニティレシピ（`pizza_recipes` テーブル）の読み取りを担当する。
//!
//! 生地・チーズ・トッピングは JSONB のまま取り出す。トッピングの解釈は
//! ドメイン層（[`ToppingRef`](randapizza_domain::dashboard::ToppingRef)）が行う。

use async_trait::async_trait;
use randapizza_domain::dashboard::CommunityRecipe;
use serde_json::Value;
use sqlx::PgPool;

use crate::error::InfraError;

#[async_trait]
pub trait CommunityRecipeRepository: Send + Sync {
    /// 全レシピを ID 順で取得する
    async fn find_all(&self) -> Result<Vec<CommunityRecipe>, InfraError>;
}

#[derive(Debug, Clone)]
pub struct PostgresCommunityRecipeRepository {
    pool: PgPool,
}

impl PostgresCommunityRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommunityRecipeRow {
    id:       i64,
    name:     Option<String>,
    dough:    Option<Value>,
    cheese:   Option<Value>,
    toppings: Option<Value>,
    votes:    i64,
}

impl From<CommunityRecipeRow> for CommunityRecipe {
    fn from(row: CommunityRecipeRow) -> Self {
        // 配列以外（null や単一値）はトッピングなしとして扱う
        let toppings = match row.toppings {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };

        CommunityRecipe {
            id: row.id,
            name: row.name,
            dough: row.dough,
            cheese: row.cheese,
            toppings,
            votes: row.votes,
        }
    }
}

#[async_trait]
impl CommunityRecipeRepository for PostgresCommunityRecipeRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<CommunityRecipe>, InfraError> {
        let rows = sqlx::query_as::<_, CommunityRecipeRow>(
            r#"
            SELECT
                id::bigint AS id,
                name,
                to_jsonb(dough) AS dough,
                to_jsonb(cheese) AS cheese,
                to_jsonb(toppings) AS toppings,
                COALESCE(votes, 0)::bigint AS votes
            FROM pizza_recipes
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommunityRecipe::from).collect())
    }
}
