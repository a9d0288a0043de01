//! # ダッシュボードユースケース
//!
//! コミュニティレシピを取得し、ドメイン層で KPI を集計する。

use std::sync::Arc;

use randapizza_domain::dashboard::DashboardStats;
use randapizza_infra::repository::CommunityRecipeRepository;

use crate::error::ApiError;

pub struct DashboardUseCaseImpl {
    community_recipe_repo: Arc<dyn CommunityRecipeRepository>,
}

impl DashboardUseCaseImpl {
    pub fn new(community_recipe_repo: Arc<dyn CommunityRecipeRepository>) -> Self {
        Self {
            community_recipe_repo,
        }
    }

    pub async fn get_stats(&self) -> Result<DashboardStats, ApiError> {
        let recipes = self.community_recipe_repo.find_all().await?;
        Ok(DashboardStats::aggregate(&recipes))
    }
}
