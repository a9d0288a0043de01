//! # プロフィール API ハンドラ
//!
//! `GET /api/profile`（認証必須）。初回アクセス時にプロフィールを作成する。

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use chrono::{DateTime, Utc};
use randapizza_domain::{
    profile::Profile,
    user::{AuthenticatedUser, UserId},
};
use serde::Serialize;

use crate::{error::ApiError, usecase::ProfileUseCaseImpl};

pub struct ProfileState {
    pub usecase: ProfileUseCaseImpl,
}

#[derive(Debug, Serialize)]
pub struct ProfileDto {
    pub id:           UserId,
    pub email:        String,
    pub company_name: String,
    pub created_at:   DateTime<Utc>,
}

impl From<Profile> for ProfileDto {
    fn from(profile: Profile) -> Self {
        Self {
            id:           profile.id,
            email:        profile.email,
            company_name: profile.company_name,
            created_at:   profile.created_at,
        }
    }
}

#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn get_profile(
    State(state): State<Arc<ProfileState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ProfileDto>, ApiError> {
    let profile = state.usecase.get_or_create(&user).await?;
    Ok(Json(ProfileDto::from(profile)))
}
