//! # HTTP ハンドラ
//!
//! リクエストの取り出しとレスポンス DTO への変換のみを行い、
//! ビジネスロジックはユースケース層に委譲する。

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod ingredient;
pub mod profile;
pub mod recipe;

pub use auth::{AuthState, login, register};
pub use dashboard::{DashboardState, get_business_stats};
pub use health::{ReadinessState, health_check, readiness_check};
pub use ingredient::{CatalogState, get_ingredients, random_pizza};
pub use profile::{ProfileState, get_profile};
pub use recipe::{RecipeState, get_user_recipes, save_recipe};
