//! # ProfileRepository
//!
//! ビジネスプロフィール（`profiles` テーブル）の遅延作成を担当する。
//!
//! 「無ければ作成、あれば取得」を 1 文の SQL で行う。
//! `INSERT ... ON CONFLICT DO NOTHING RETURNING` が空の場合のみ既存行を返す。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use randapizza_domain::{
    profile::{NewProfile, Profile},
    user::UserId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// プロフィール取得結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLookup {
    pub profile: Profile,
    /// この呼び出しで新規作成された場合は true
    pub created: bool,
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// プロフィールを取得する。存在しなければ `new_profile` の内容で作成する
    ///
    /// 同一ユーザーの並行呼び出しでも行は 1 つだけ作られる。
    async fn find_or_create(&self, new_profile: &NewProfile) -> Result<ProfileLookup, InfraError>;
}

#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id:           Uuid,
    email:        Option<String>,
    company_name: Option<String>,
    created_at:   DateTime<Utc>,
    created:      bool,
}

impl From<ProfileRow> for ProfileLookup {
    fn from(row: ProfileRow) -> Self {
        ProfileLookup {
            profile: Profile {
                id:           UserId::from_uuid(row.id),
                email:        row.email.unwrap_or_default(),
                company_name: row.company_name.unwrap_or_default(),
                created_at:   row.created_at,
            },
            created: row.created,
        }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(user_id = %new_profile.id))]
    async fn find_or_create(&self, new_profile: &NewProfile) -> Result<ProfileLookup, InfraError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            WITH inserted AS (
                INSERT INTO profiles (id, email, company_name)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO NOTHING
                RETURNING id, email, company_name, created_at
            )
            SELECT id, email, company_name, created_at, true AS created FROM inserted
            UNION ALL
            SELECT id, email, company_name, created_at, false AS created
            FROM profiles
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(new_profile.id.as_uuid())
        .bind(&new_profile.email)
        .bind(&new_profile.company_name)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return Ok(row.into());
        }

        // 並行トランザクションが同じ ID を挿入した直後は、文のスナップショットに
        // その行が見えないため取り直す
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, email, company_name, created_at, false AS created
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(new_profile.id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProfileLookup::from).ok_or_else(|| {
            InfraError::unexpected(format!("プロフィールを作成できませんでした: {}", new_profile.id))
        })
    }
}
