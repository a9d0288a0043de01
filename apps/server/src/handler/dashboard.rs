//! # ダッシュボード API ハンドラ
//!
//! `GET /api/business/stats`（認証必須）。コミュニティレシピの KPI を返す。

use std::sync::Arc;

use axum::{Json, extract::State};
use randapizza_domain::dashboard::{DashboardStats, ToppingCount, VoteEntry};
use serde::Serialize;
use serde_json::Value;

use crate::{error::ApiError, usecase::DashboardUseCaseImpl};

pub struct DashboardState {
    pub usecase: DashboardUseCaseImpl,
}

#[derive(Debug, Serialize)]
pub struct DashboardStatsDto {
    pub total_pizzas:      i64,
    pub total_votes:       i64,
    pub top_toppings:      Vec<ToppingCountDto>,
    pub vote_distribution: Vec<VoteEntryDto>,
}

#[derive(Debug, Serialize)]
pub struct ToppingCountDto {
    pub name:  String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct VoteEntryDto {
    pub name:                String,
    pub votes:               i64,
    pub payload_ingredients: PayloadIngredientsDto,
}

/// レシピの材料（格納形式のまま）
#[derive(Debug, Serialize)]
pub struct PayloadIngredientsDto {
    pub dough:    Option<Value>,
    pub cheese:   Option<Value>,
    pub toppings: Vec<Value>,
}

impl From<ToppingCount> for ToppingCountDto {
    fn from(topping: ToppingCount) -> Self {
        Self {
            name:  topping.name,
            count: topping.count,
        }
    }
}

impl From<VoteEntry> for VoteEntryDto {
    fn from(entry: VoteEntry) -> Self {
        Self {
            name:                entry.name,
            votes:               entry.votes,
            payload_ingredients: PayloadIngredientsDto {
                dough:    entry.dough,
                cheese:   entry.cheese,
                toppings: entry.toppings,
            },
        }
    }
}

impl From<DashboardStats> for DashboardStatsDto {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_pizzas:      stats.total_pizzas,
            total_votes:       stats.total_votes,
            top_toppings:      stats.top_toppings.into_iter().map(Into::into).collect(),
            vote_distribution: stats
                .vote_distribution
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

#[tracing::instrument(skip_all)]
pub async fn get_business_stats(
    State(state): State<Arc<DashboardState>>,
) -> Result<Json<DashboardStatsDto>, ApiError> {
    let stats = state.usecase.get_stats().await?;
    Ok(Json(DashboardStatsDto::from(stats)))
}
