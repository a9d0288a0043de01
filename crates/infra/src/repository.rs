//! # リポジトリ実装
//!
//! エンティティごとのリポジトリトレイトと PostgreSQL 実装を提供する。
//! ユースケースは `Arc<dyn XxxRepository>` として受け取り、
//! テストでは [`mock`](crate::mock) のインメモリ実装に差し替える。

pub mod community_recipe_repository;
pub mod ingredient_repository;
pub mod profile_repository;
pub mod recipe_repository;

pub use community_recipe_repository::{
    CommunityRecipeRepository,
    PostgresCommunityRecipeRepository,
};
pub use ingredient_repository::{IngredientRepository, PostgresIngredientRepository};
pub use profile_repository::{PostgresProfileRepository, ProfileLookup, ProfileRepository};
pub use recipe_repository::{PostgresRecipeRepository, RecipeRepository};
