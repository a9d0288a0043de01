//! # プロフィールユースケース

use std::sync::Arc;

use randapizza_domain::{
    profile::{NewProfile, Profile},
    user::AuthenticatedUser,
};
use randapizza_infra::repository::ProfileRepository;
use randapizza_shared::{event_log::event, log_business_event};

use crate::error::ApiError;

pub struct ProfileUseCaseImpl {
    profile_repo: Arc<dyn ProfileRepository>,
}

impl ProfileUseCaseImpl {
    pub fn new(profile_repo: Arc<dyn ProfileRepository>) -> Self {
        Self { profile_repo }
    }

    /// 認証済みユーザーのプロフィールを返す。初回はプレースホルダーで作成する
    pub async fn get_or_create(&self, user: &AuthenticatedUser) -> Result<Profile, ApiError> {
        let lookup = self
            .profile_repo
            .find_or_create(&NewProfile::placeholder_for(user))
            .await?;

        if lookup.created {
            log_business_event!(
                event.category = event::category::PROFILE,
                event.action = event::action::PROFILE_CREATED,
                event.entity_type = event::entity_type::PROFILE,
                event.entity_id = %user.id,
                event.actor_id = %user.id,
                event.result = event::result::SUCCESS,
                "プロフィールを作成しました"
            );
        }

        Ok(lookup.profile)
    }
}
