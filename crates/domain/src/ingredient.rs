//! # 材料カタログ
//!
//! 材料（ingredient）とカテゴリ別カタログ、ランダムピザ用のサンプリング、
//! 材料名から ID への解決を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`Ingredient`] | 材料 | ストアの 1 行（ID・表示名・カテゴリ文字列） |
//! | [`IngredientCategory`] | カテゴリ | `toppings` / `cheeses` / `doughs` のいずれか |
//! | [`Catalog`] | カタログ | 既知カテゴリに属する材料の集合 |
//! | [`IngredientNameIndex`] | 名前索引 | 全カテゴリの材料名から ID への対応 |
//! | [`IngredientCount`] | 材料数 | ランダムピザで要求する材料数（1〜10） |
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rand::{SeedableRng, rngs::StdRng};
//! use randapizza_domain::ingredient::{Catalog, Ingredient, IngredientCount, IngredientId};
//!
//! let catalog = Catalog::from_ingredients(vec![
//!     Ingredient::new(IngredientId::new(1), "Salami", "toppings"),
//!     Ingredient::new(IngredientId::new(2), "Gouda", "cheeses"),
//! ]);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let picked = catalog.sample(IngredientCount::new(10)?, &mut rng);
//! assert_eq!(picked.len(), 2);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use derive_more::Display;
use rand::{Rng, seq::index};
use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::DomainError;

/// 材料 ID
///
/// ストアが採番する整数 ID をラップする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct IngredientId(i64);

impl IngredientId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// 材料カテゴリ
///
/// ストア上の文字列表現（小文字）との相互変換を strum で行う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum IngredientCategory {
    Toppings,
    Cheeses,
    Doughs,
}

/// 材料（ストアの 1 行）
///
/// カテゴリはストアの値をそのまま保持する。
/// 既知カテゴリへの分類は [`Catalog::from_ingredients`] で行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    id:       IngredientId,
    name:     String,
    category: String,
}

impl Ingredient {
    pub fn new(id: IngredientId, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
        }
    }

    pub fn id(&self) -> IngredientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 既知カテゴリであれば分類結果を返す
    pub fn category(&self) -> Option<IngredientCategory> {
        self.category.parse().ok()
    }
}

/// ランダムピザで要求する材料数
///
/// 1〜10 の範囲のみ許可する。プールより多い値は
/// [`Catalog::sample`] 側で切り詰める（エラーにはしない）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientCount(usize);

impl IngredientCount {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 10;
    /// リクエストで省略された場合の値
    pub const DEFAULT: i64 = 5;

    pub fn new(value: i64) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::Validation(format!(
                "num_ingredients must be {}-{}",
                Self::MIN,
                Self::MAX
            )));
        }
        // 範囲チェック済みのため usize への変換は失敗しない
        Ok(Self(value as usize))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

/// 材料カタログ
///
/// 既知カテゴリに属する材料だけをストアの順序のまま保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<(IngredientCategory, Ingredient)>,
}

impl Catalog {
    /// ストアの行からカタログを組み立てる
    ///
    /// 未知のカテゴリを持つ行は除外する。
    pub fn from_ingredients(ingredients: impl IntoIterator<Item = Ingredient>) -> Self {
        let entries = ingredients
            .into_iter()
            .filter_map(|ingredient| ingredient.category().map(|c| (c, ingredient)))
            .collect();
        Self { entries }
    }

    /// 指定カテゴリの材料名をストア順で返す
    pub fn names_in(&self, category: IngredientCategory) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, ingredient)| ingredient.name())
            .collect()
    }

    /// 全カテゴリを toppings → cheeses → doughs の順に平坦化したプール
    pub fn pool(&self) -> Vec<&str> {
        [
            IngredientCategory::Toppings,
            IngredientCategory::Cheeses,
            IngredientCategory::Doughs,
        ]
        .into_iter()
        .flat_map(|category| self.names_in(category))
        .collect()
    }

    /// プールから重複なしで材料名を無作為抽出する
    ///
    /// 抽出数は `min(count, プールサイズ)`。結果の順序も無作為。
    pub fn sample<R: Rng + ?Sized>(&self, count: IngredientCount, rng: &mut R) -> Vec<String> {
        let pool = self.pool();
        let amount = count.get().min(pool.len());
        if amount == 0 {
            return Vec::new();
        }

        index::sample(rng, pool.len(), amount)
            .into_iter()
            .map(|i| pool[i].to_string())
            .collect()
    }
}

/// 材料名から ID への索引
///
/// レシピ保存時の名前解決に使う。カテゴリに関係なくストアの全行を対象とし、
/// 同名の行が複数ある場合はストア順で後の行が優先される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientNameIndex {
    ids: HashMap<String, IngredientId>,
}

impl IngredientNameIndex {
    pub fn from_ingredients(ingredients: impl IntoIterator<Item = Ingredient>) -> Self {
        let ids = ingredients
            .into_iter()
            .map(|ingredient| (ingredient.name, ingredient.id))
            .collect();
        Self { ids }
    }

    /// 材料名を ID に解決する
    ///
    /// 1 件でも解決できなければ、未解決の名前をすべて含む
    /// [`DomainError::UnknownIngredients`] を返す。
    pub fn resolve(&self, names: &[String]) -> Result<Vec<IngredientId>, DomainError> {
        let mut ids = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.ids.get(name) {
                Some(id) => ids.push(*id),
                None => missing.push(name.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(DomainError::UnknownIngredients(missing));
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};
    use rstest::rstest;

    use super::*;

    fn ingredient(id: i64, name: &str, category: &str) -> Ingredient {
        Ingredient::new(IngredientId::new(id), name, category)
    }

    fn small_catalog() -> Catalog {
        Catalog::from_ingredients(vec![
            ingredient(1, "Salami", "toppings"),
            ingredient(2, "Ham", "toppings"),
            ingredient(3, "Mozzarella", "cheeses"),
            ingredient(4, "Classic", "doughs"),
        ])
    }

    // ===== IngredientCount =====

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(10)]
    fn test_材料数_範囲内の値を受け付ける(#[case] value: i64) {
        assert_eq!(IngredientCount::new(value).unwrap().get(), value as usize);
    }

    #[rstest]
    #[case(0)]
    #[case(11)]
    #[case(-3)]
    fn test_材料数_範囲外の値は制約名付きのバリデーションエラー(#[case] value: i64) {
        let err = IngredientCount::new(value).unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation("num_ingredients must be 1-10".to_string())
        );
    }

    // ===== Catalog 構築 =====

    #[test]
    fn test_カテゴリ別に名前をストア順で返す() {
        let catalog = Catalog::from_ingredients(vec![
            ingredient(1, "Roman", "doughs"),
            ingredient(2, "Salami", "toppings"),
            ingredient(3, "Gouda", "cheeses"),
            ingredient(4, "Ham", "toppings"),
        ]);

        assert_eq!(catalog.names_in(IngredientCategory::Toppings), vec!["Salami", "Ham"]);
        assert_eq!(catalog.names_in(IngredientCategory::Cheeses), vec!["Gouda"]);
        assert_eq!(catalog.names_in(IngredientCategory::Doughs), vec!["Roman"]);
    }

    #[test]
    fn test_未知のカテゴリは除外される() {
        let catalog = Catalog::from_ingredients(vec![
            ingredient(1, "Salami", "toppings"),
            ingredient(2, "Basil", "herbs"),
            ingredient(3, "Gouda", "Cheeses"),
        ]);

        assert_eq!(catalog.pool(), vec!["Salami"]);
    }

    #[test]
    fn test_プールはtoppings_cheeses_doughsの順に平坦化される() {
        let catalog = Catalog::from_ingredients(vec![
            ingredient(1, "Classic", "doughs"),
            ingredient(2, "Mozzarella", "cheeses"),
            ingredient(3, "Salami", "toppings"),
        ]);

        assert_eq!(catalog.pool(), vec!["Salami", "Mozzarella", "Classic"]);
    }

    // ===== サンプリング =====

    #[test]
    fn test_要求数がプールを超える場合は全件に切り詰める() {
        let catalog = small_catalog();
        let mut rng = StdRng::seed_from_u64(42);

        let picked = catalog.sample(IngredientCount::new(10).unwrap(), &mut rng);

        let picked: HashSet<_> = picked.into_iter().collect();
        let expected: HashSet<_> = ["Salami", "Ham", "Mozzarella", "Classic"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(picked, expected);
    }

    #[test]
    fn test_全ての要求数で重複なしのカタログ部分集合を返す() {
        let catalog = small_catalog();
        let pool: HashSet<&str> = catalog.pool().into_iter().collect();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for count in IngredientCount::MIN..=IngredientCount::MAX {
                let picked = catalog.sample(IngredientCount::new(count).unwrap(), &mut rng);

                assert_eq!(picked.len(), (count as usize).min(pool.len()));
                let unique: HashSet<&str> = picked.iter().map(String::as_str).collect();
                assert_eq!(unique.len(), picked.len(), "重複なし: {picked:?}");
                assert!(unique.is_subset(&pool), "カタログの部分集合: {picked:?}");
            }
        }
    }

    #[test]
    fn test_空のカタログからは空のリストを返す() {
        let catalog = Catalog::default();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(catalog.sample(IngredientCount::new(3).unwrap(), &mut rng).is_empty());
    }

    // ===== 名前解決 =====

    fn name_index() -> IngredientNameIndex {
        IngredientNameIndex::from_ingredients(vec![
            ingredient(1, "Salami", "toppings"),
            ingredient(2, "Ham", "toppings"),
            ingredient(3, "Mozzarella", "cheeses"),
            ingredient(4, "Classic", "doughs"),
        ])
    }

    #[test]
    fn test_全ての名前が解決できればリクエスト順のidを返す() {
        let index = name_index();
        let names = vec!["Classic".to_string(), "Salami".to_string(), "Salami".to_string()];

        let ids = index.resolve(&names).unwrap();

        assert_eq!(
            ids,
            vec![IngredientId::new(4), IngredientId::new(1), IngredientId::new(1)]
        );
    }

    #[test]
    fn test_未解決の名前があれば全件をまとめて拒否する() {
        let index = name_index();
        let names = vec![
            "Kale".to_string(),
            "Ham".to_string(),
            "Tofu".to_string(),
        ];

        let err = index.resolve(&names).unwrap_err();

        assert_eq!(
            err,
            DomainError::UnknownIngredients(vec!["Kale".to_string(), "Tofu".to_string()])
        );
    }

    #[test]
    fn test_同名の材料はストア順で後の行が採用される() {
        let index = IngredientNameIndex::from_ingredients(vec![
            ingredient(4, "Mozzarella", "toppings"),
            ingredient(13, "Mozzarella", "cheeses"),
        ]);

        let ids = index.resolve(&["Mozzarella".to_string()]).unwrap();

        assert_eq!(ids, vec![IngredientId::new(13)]);
    }

    #[test]
    fn test_未知カテゴリの材料名も解決できる() {
        let index = IngredientNameIndex::from_ingredients(vec![ingredient(1, "Basil", "herbs")]);

        let ids = index.resolve(&["Basil".to_string()]).unwrap();

        assert_eq!(ids, vec![IngredientId::new(1)]);
    }
}
