//! # ビジネスダッシュボード集計
//!
//! コミュニティレシピ（投票付きのピザ）から KPI を集計する。
//!
//! ## 統計項目
//!
//! - 総レシピ数: コミュニティレシピの件数
//! - 総投票数: 全レシピの票数の合計
//! - 人気トッピング: トッピング名の出現回数の上位 5 件
//! - 投票分布: 票数の上位 5 レシピ
//!
//! 上位 5 件の同順位は入力順（トッピングは初出順）を保つ。

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// 上位リストの最大件数
pub const TOP_N: usize = 5;

/// トッピング参照
///
/// コミュニティレシピのトッピングは、名前文字列そのものか
/// `name` フィールドを持つオブジェクトのいずれかで格納されている。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ToppingRef {
    Bare(String),
    Named { name: String },
}

impl ToppingRef {
    /// JSON 値からトッピング参照を読み取る
    ///
    /// どちらの形式にも当てはまらない値は `None`。
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Bare(name) | Self::Named { name } => name,
        }
    }
}

/// コミュニティレシピ（集計元）
#[derive(Debug, Clone, PartialEq)]
pub struct CommunityRecipe {
    pub id:       i64,
    pub name:     Option<String>,
    pub dough:    Option<Value>,
    pub cheese:   Option<Value>,
    /// 格納形式のまま保持する（ダッシュボードの詳細表示にそのまま返す）
    pub toppings: Vec<Value>,
    pub votes:    i64,
}

impl CommunityRecipe {
    /// 表示名。未設定の場合は `Pizza #<id>`
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Pizza #{}", self.id),
        }
    }

    /// 読み取れたトッピング名を格納順で返す
    pub fn topping_names(&self) -> impl Iterator<Item = String> + '_ {
        self.toppings
            .iter()
            .filter_map(ToppingRef::from_value)
            .map(|topping| topping.name().to_string())
    }
}

/// トッピングの出現回数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToppingCount {
    pub name:  String,
    pub count: i64,
}

/// 投票分布の 1 エントリ
#[derive(Debug, Clone, PartialEq)]
pub struct VoteEntry {
    pub name:     String,
    pub votes:    i64,
    pub dough:    Option<Value>,
    pub cheese:   Option<Value>,
    pub toppings: Vec<Value>,
}

/// ダッシュボード統計情報
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_pizzas:      i64,
    pub total_votes:       i64,
    pub top_toppings:      Vec<ToppingCount>,
    pub vote_distribution: Vec<VoteEntry>,
}

impl DashboardStats {
    /// コミュニティレシピから統計情報を集計する
    ///
    /// レシピが 0 件の場合はゼロ値と空リストを返す。
    pub fn aggregate(recipes: &[CommunityRecipe]) -> Self {
        if recipes.is_empty() {
            return Self::default();
        }

        Self {
            total_pizzas:      recipes.len() as i64,
            total_votes:       recipes.iter().map(|r| r.votes).fold(0, i64::saturating_add),
            top_toppings:      top_toppings(recipes),
            vote_distribution: vote_distribution(recipes),
        }
    }
}

fn top_toppings(recipes: &[CommunityRecipe]) -> Vec<ToppingCount> {
    // 同数の順位を初出順で安定させるため、出現順の Vec と位置のインデックスを併用する
    let mut counts: Vec<ToppingCount> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for name in recipes.iter().flat_map(CommunityRecipe::topping_names) {
        match positions.get(&name) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                positions.insert(name.clone(), counts.len());
                counts.push(ToppingCount { name, count: 1 });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_N);
    counts
}

fn vote_distribution(recipes: &[CommunityRecipe]) -> Vec<VoteEntry> {
    let mut ranked: Vec<&CommunityRecipe> = recipes.iter().collect();
    ranked.sort_by(|a, b| b.votes.cmp(&a.votes));

    ranked
        .into_iter()
        .take(TOP_N)
        .map(|recipe| VoteEntry {
            name:     recipe.display_name(),
            votes:    recipe.votes,
            dough:    recipe.dough.clone(),
            cheese:   recipe.cheese.clone(),
            toppings: recipe.toppings.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn recipe(id: i64, name: Option<&str>, toppings: Vec<Value>, votes: i64) -> CommunityRecipe {
        CommunityRecipe {
            id,
            name: name.map(String::from),
            dough: Some(json!({ "id": 1, "name": "Roman" })),
            cheese: Some(json!({ "id": 2, "name": "Gouda" })),
            toppings,
            votes,
        }
    }

    fn names(counts: &[ToppingCount]) -> Vec<(&str, i64)> {
        counts.iter().map(|c| (c.name.as_str(), c.count)).collect()
    }

    #[test]
    fn test_レシピが0件ならゼロ値と空リスト() {
        let stats = DashboardStats::aggregate(&[]);

        assert_eq!(stats, DashboardStats::default());
        assert_eq!(stats.total_pizzas, 0);
        assert_eq!(stats.total_votes, 0);
        assert!(stats.top_toppings.is_empty());
        assert!(stats.vote_distribution.is_empty());
    }

    #[test]
    fn test_総数と総投票数を集計する() {
        let recipes = vec![
            recipe(1, Some("A"), vec![], 3),
            recipe(2, Some("B"), vec![], 0),
            recipe(3, None, vec![], 7),
        ];

        let stats = DashboardStats::aggregate(&recipes);

        assert_eq!(stats.total_pizzas, 3);
        assert_eq!(stats.total_votes, 10);
    }

    #[test]
    fn test_総投票数はオーバーフローせず上限で飽和する() {
        let recipes = vec![
            recipe(1, None, vec![], i64::MAX),
            recipe(2, None, vec![], 1),
        ];

        let stats = DashboardStats::aggregate(&recipes);

        assert_eq!(stats.total_votes, i64::MAX);
    }

    #[test]
    fn test_トッピングは文字列とオブジェクトの両形式を数える() {
        let recipes = vec![
            recipe(1, None, vec![json!("Salami"), json!({ "id": 9, "name": "Ham" })], 0),
            recipe(2, None, vec![json!({ "name": "Salami" })], 0),
        ];

        let stats = DashboardStats::aggregate(&recipes);

        assert_eq!(names(&stats.top_toppings), vec![("Salami", 2), ("Ham", 1)]);
    }

    #[test]
    fn test_読み取れないトッピングは無視する() {
        let recipes = vec![recipe(
            1,
            None,
            vec![json!(42), json!({ "id": 3 }), json!(null), json!("Tuna")],
            0,
        )];

        let stats = DashboardStats::aggregate(&recipes);

        assert_eq!(names(&stats.top_toppings), vec![("Tuna", 1)]);
    }

    #[test]
    fn test_人気トッピングは降順で最大5件_同数は初出順() {
        let recipes = vec![
            recipe(
                1,
                None,
                vec![json!("A"), json!("B"), json!("C"), json!("D"), json!("E"), json!("F")],
                0,
            ),
            recipe(2, None, vec![json!("F"), json!("E")], 0),
            recipe(3, None, vec![json!("E")], 0),
        ];

        let stats = DashboardStats::aggregate(&recipes);

        assert_eq!(
            names(&stats.top_toppings),
            vec![("E", 3), ("F", 2), ("A", 1), ("B", 1), ("C", 1)]
        );
    }

    #[test]
    fn test_投票分布は票数降順で最大5件_名前未設定はフォールバック() {
        let recipes = vec![
            recipe(1, Some("Margherita"), vec![], 2),
            recipe(2, None, vec![], 9),
            recipe(3, Some("Diavola"), vec![], 5),
            recipe(4, Some(""), vec![], 5),
            recipe(5, Some("Hawaii"), vec![], 1),
            recipe(6, Some("Funghi"), vec![], 0),
        ];

        let stats = DashboardStats::aggregate(&recipes);

        let ranking: Vec<(&str, i64)> = stats
            .vote_distribution
            .iter()
            .map(|e| (e.name.as_str(), e.votes))
            .collect();
        assert_eq!(
            ranking,
            vec![
                ("Pizza #2", 9),
                ("Diavola", 5),
                ("Pizza #4", 5),
                ("Margherita", 2),
                ("Hawaii", 1),
            ]
        );
    }

    #[test]
    fn test_投票分布は材料をそのまま保持する() {
        let toppings = vec![json!({ "id": 7, "name": "Sucuk" })];
        let recipes = vec![recipe(1, Some("Istanbul"), toppings.clone(), 4)];

        let stats = DashboardStats::aggregate(&recipes);

        let entry = &stats.vote_distribution[0];
        assert_eq!(entry.toppings, toppings);
        assert_eq!(entry.dough, Some(json!({ "id": 1, "name": "Roman" })));
        assert_eq!(entry.cheese, Some(json!({ "id": 2, "name": "Gouda" })));
    }
}
