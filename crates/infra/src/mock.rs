//! # テスト用モック
//!
//! ユースケース・ハンドラのテストで使用するインメモリのリポジトリと
//! 認証クライアントのスタブ。`test-utils` feature で他クレートからも利用できる。
//!
//! ```toml
//! [dev-dependencies]
//! randapizza-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::HashMap,
    sync::{
        Arc,
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::Utc;
use randapizza_domain::{
    dashboard::CommunityRecipe,
    ingredient::{Ingredient, IngredientId},
    profile::{NewProfile, Profile},
    recipe::{NewRecipe, OwnerId, SavedRecipe},
    user::AuthenticatedUser,
};

use crate::{
    auth::{AuthClient, AuthError, SignInResult, SignUpResult},
    db::DatabaseProbe,
    error::InfraError,
    repository::{
        CommunityRecipeRepository,
        IngredientRepository,
        ProfileLookup,
        ProfileRepository,
        RecipeRepository,
    },
};

fn unavailable() -> InfraError {
    InfraError::unexpected("mock store unavailable")
}

// ===== MockIngredientRepository =====

#[derive(Clone, Default)]
pub struct MockIngredientRepository {
    ingredients:    Arc<Mutex<Vec<Ingredient>>>,
    failing:        Arc<AtomicBool>,
    find_all_calls: Arc<AtomicUsize>,
    lookup_calls:   Arc<AtomicUsize>,
}

impl MockIngredientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ingredients(ingredients: Vec<Ingredient>) -> Self {
        let repo = Self::new();
        *repo.ingredients.lock().unwrap() = ingredients;
        repo
    }

    /// 以降の呼び出しをすべて失敗させる
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    /// `find_by_ids` が呼ばれた回数
    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IngredientRepository for MockIngredientRepository {
    async fn find_all(&self) -> Result<Vec<Ingredient>, InfraError> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.ingredients.lock().unwrap().clone())
    }

    async fn find_by_ids(&self, ids: &[IngredientId]) -> Result<Vec<Ingredient>, InfraError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self
            .ingredients
            .lock()
            .unwrap()
            .iter()
            .filter(|i| ids.contains(&i.id()))
            .cloned()
            .collect())
    }
}

// ===== MockRecipeRepository =====

#[derive(Clone, Default)]
pub struct MockRecipeRepository {
    recipes: Arc<Mutex<Vec<SavedRecipe>>>,
    failing: Arc<AtomicBool>,
}

impl MockRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_recipe(&self, recipe: SavedRecipe) {
        self.recipes.lock().unwrap().push(recipe);
    }

    /// 保存済みレシピのスナップショット
    pub fn recipes(&self) -> Vec<SavedRecipe> {
        self.recipes.lock().unwrap().clone()
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecipeRepository for MockRecipeRepository {
    async fn insert(&self, recipe: &NewRecipe) -> Result<(), InfraError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.recipes.lock().unwrap().push(SavedRecipe {
            owner_id:       recipe.owner_id.clone(),
            ingredient_ids: recipe.ingredient_ids.clone(),
            liked:          recipe.liked,
            created_at:     Utc::now(),
        });
        Ok(())
    }

    async fn find_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<SavedRecipe>, InfraError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut recipes: Vec<SavedRecipe> = self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.owner_id == owner_id)
            .cloned()
            .collect();
        recipes.sort_by_key(|r| r.created_at);
        Ok(recipes)
    }
}

// ===== MockProfileRepository =====

#[derive(Clone, Default)]
pub struct MockProfileRepository {
    profiles: Arc<Mutex<Vec<Profile>>>,
}

impl MockProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_profile(&self, profile: Profile) {
        self.profiles.lock().unwrap().push(profile);
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.profiles.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn find_or_create(&self, new_profile: &NewProfile) -> Result<ProfileLookup, InfraError> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(existing) = profiles.iter().find(|p| p.id == new_profile.id) {
            return Ok(ProfileLookup {
                profile: existing.clone(),
                created: false,
            });
        }

        let profile = Profile {
            id:           new_profile.id,
            email:        new_profile.email.clone(),
            company_name: new_profile.company_name.clone(),
            created_at:   Utc::now(),
        };
        profiles.push(profile.clone());
        Ok(ProfileLookup {
            profile,
            created: true,
        })
    }
}

// ===== MockCommunityRecipeRepository =====

#[derive(Clone, Default)]
pub struct MockCommunityRecipeRepository {
    recipes: Arc<Mutex<Vec<CommunityRecipe>>>,
}

impl MockCommunityRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipes(recipes: Vec<CommunityRecipe>) -> Self {
        let repo = Self::new();
        *repo.recipes.lock().unwrap() = recipes;
        repo
    }
}

#[async_trait]
impl CommunityRecipeRepository for MockCommunityRecipeRepository {
    async fn find_all(&self) -> Result<Vec<CommunityRecipe>, InfraError> {
        Ok(self.recipes.lock().unwrap().clone())
    }
}

// ===== MockDatabaseProbe =====

#[derive(Clone, Default)]
pub struct MockDatabaseProbe {
    down: Arc<AtomicBool>,
}

impl MockDatabaseProbe {
    pub fn healthy() -> Self {
        Self::default()
    }

    pub fn down() -> Self {
        let probe = Self::default();
        probe.down.store(true, Ordering::SeqCst);
        probe
    }
}

#[async_trait]
impl DatabaseProbe for MockDatabaseProbe {
    async fn ping(&self) -> Result<(), InfraError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

// ===== StubAuthClient =====

/// 認証クライアントのスタブ
///
/// 登録済みトークンのみ有効。サインアップ・ログインの結果は事前に設定する
/// （未設定時は `Rejected`）。
#[derive(Clone)]
pub struct StubAuthClient {
    users:            Arc<Mutex<HashMap<String, AuthenticatedUser>>>,
    sign_up_result:   Arc<Mutex<Result<SignUpResult, AuthError>>>,
    sign_in_result:   Arc<Mutex<Result<SignInResult, AuthError>>>,
    get_user_failure: Arc<Mutex<Option<AuthError>>>,
    last_redirect:    Arc<Mutex<Option<String>>>,
}

impl Default for StubAuthClient {
    fn default() -> Self {
        Self {
            users:            Arc::default(),
            sign_up_result:   Arc::new(Mutex::new(Err(AuthError::Rejected(
                "sign-up not configured".to_string(),
            )))),
            sign_in_result:   Arc::new(Mutex::new(Err(AuthError::Rejected(
                "Invalid login credentials".to_string(),
            )))),
            get_user_failure: Arc::default(),
            last_redirect:    Arc::default(),
        }
    }
}

impl StubAuthClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// トークンとユーザーの対応を登録する
    pub fn with_user(self, token: &str, user: AuthenticatedUser) -> Self {
        self.users.lock().unwrap().insert(token.to_string(), user);
        self
    }

    pub fn with_sign_up(self, result: Result<SignUpResult, AuthError>) -> Self {
        *self.sign_up_result.lock().unwrap() = result;
        self
    }

    pub fn with_sign_in(self, result: Result<SignInResult, AuthError>) -> Self {
        *self.sign_in_result.lock().unwrap() = result;
        self
    }

    /// トークン検証を常に指定エラーで失敗させる
    pub fn with_get_user_failure(self, error: AuthError) -> Self {
        *self.get_user_failure.lock().unwrap() = Some(error);
        self
    }

    /// 直近のサインアップで渡された `redirect_to`
    pub fn last_redirect(&self) -> Option<String> {
        self.last_redirect.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthClient for StubAuthClient {
    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        redirect_to: &str,
    ) -> Result<SignUpResult, AuthError> {
        *self.last_redirect.lock().unwrap() = Some(redirect_to.to_string());
        self.sign_up_result.lock().unwrap().clone()
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<SignInResult, AuthError> {
        self.sign_in_result.lock().unwrap().clone()
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(err) = self.get_user_failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.users
            .lock()
            .unwrap()
            .get(access_token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
