//! # Derived Views
//!
//! Read-only computations over lists: budget progress, per-list summaries,
//! category grouping and cross-list spending statistics.
//!
//! ## Budget Progress
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Budget $50.00                                                          │
//! │  ████████████████████░░░░░░░░░░░░  $31.40 / $50.00   (62.8%)           │
//! │                                                                         │
//! │  Over budget: bar pinned at 100%, remaining goes negative               │
//! │  ██████████████████████████████████  $57.10 / $50.00  remaining -$7.10 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lists without a budget, or with a zero budget, have no [`BudgetStatus`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Category, Item, ShoppingList};

/// Label used for items whose category id is not in the category set.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

// =============================================================================
// Budget
// =============================================================================

/// Spending against a list's budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BudgetStatus {
    #[ts(as = "f64")]
    pub total: Money,
    #[ts(as = "f64")]
    pub budget: Money,
    /// `budget - total`; negative when over budget.
    #[ts(as = "f64")]
    pub remaining: Money,
    /// Share of the budget spent, capped at 100.
    pub percent_used: f64,
    pub is_over_budget: bool,
}

impl BudgetStatus {
    /// Returns `None` if the list has no budget or a zero budget.
    pub fn for_list(list: &ShoppingList) -> Option<Self> {
        let budget = list.budget.filter(|b| !b.is_zero())?;
        let total = list.total();

        Some(BudgetStatus {
            total,
            budget,
            remaining: budget - total,
            percent_used: total.percent_of(budget).min(100.0),
            is_over_budget: total > budget,
        })
    }
}

// =============================================================================
// List Summary
// =============================================================================

/// One row of the lists overview.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ListSummary {
    pub id: String,
    pub name: String,
    pub item_count: usize,
    pub checked_count: usize,
    #[ts(as = "f64")]
    pub total: Money,
    #[ts(as = "f64")]
    pub checked_total: Money,
    #[ts(as = "Option<f64>")]
    pub budget: Option<Money>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl From<&ShoppingList> for ListSummary {
    fn from(list: &ShoppingList) -> Self {
        ListSummary {
            id: list.id.clone(),
            name: list.name.clone(),
            item_count: list.items.len(),
            checked_count: list.checked_count(),
            total: list.total(),
            checked_total: list.checked_total(),
            budget: list.budget,
            updated_at: list.updated_at,
        }
    }
}

// =============================================================================
// Category Grouping
// =============================================================================

/// Items of one list that share a category id.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category_id: &'a str,
    /// `None` if the id is not in the category set.
    pub category: Option<&'a Category>,
    pub items: Vec<&'a Item>,
}

/// Groups `items` by category id.
///
/// Groups appear in the order their first item appears; items keep list
/// order inside each group.
pub fn group_by_category<'a>(
    items: &'a [Item],
    categories: &'a [Category],
) -> Vec<CategoryGroup<'a>> {
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let slot = *index.entry(item.category_id.as_str()).or_insert_with(|| {
            groups.push(CategoryGroup {
                category_id: &item.category_id,
                category: categories.iter().find(|c| c.id == item.category_id),
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].items.push(item);
    }

    groups
}

// =============================================================================
// Statistics
// =============================================================================

/// Total spending of one list.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ListSpending {
    pub list_id: String,
    pub name: String,
    #[ts(as = "f64")]
    pub total: Money,
}

/// Number of items (across all lists) in one category.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryCount {
    pub category_id: String,
    /// Category display name, or [`UNKNOWN_CATEGORY`].
    pub name: String,
    pub count: usize,
}

/// Aggregate figures for the statistics page.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Statistics {
    #[ts(as = "f64")]
    pub total_spending: Money,
    /// Highest total first.
    pub spending_by_list: Vec<ListSpending>,
    /// Largest count first.
    pub items_by_category: Vec<CategoryCount>,
}

impl Statistics {
    pub fn compute(lists: &[ShoppingList], categories: &[Category]) -> Self {
        let mut spending_by_list: Vec<ListSpending> = lists
            .iter()
            .map(|list| ListSpending {
                list_id: list.id.clone(),
                name: list.name.clone(),
                total: list.total(),
            })
            .collect();
        // stable sort: ties keep list order
        spending_by_list.sort_by(|a, b| b.total.cmp(&a.total));

        let total_spending = spending_by_list.iter().map(|s| s.total).sum();

        let mut items_by_category: Vec<CategoryCount> = Vec::new();
        for item in lists.iter().flat_map(|l| l.items.iter()) {
            match items_by_category
                .iter_mut()
                .find(|c| c.category_id == item.category_id)
            {
                Some(entry) => entry.count += 1,
                None => items_by_category.push(CategoryCount {
                    category_id: item.category_id.clone(),
                    name: categories
                        .iter()
                        .find(|c| c.id == item.category_id)
                        .map_or_else(|| UNKNOWN_CATEGORY.to_string(), |c| c.name.clone()),
                    count: 1,
                }),
            }
        }
        items_by_category.sort_by(|a, b| b.count.cmp(&a.count));

        Statistics {
            total_spending,
            spending_by_list,
            items_by_category,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.spending_by_list.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{default_categories, NewItem, Unit};

    fn list_with(id: &str, budget: Option<i64>, items: &[(&str, &str, Option<i64>, f64)]) -> ShoppingList {
        let mut list = ShoppingList::new(id, format!("List {}", id), budget.map(Money::from_cents));
        for (i, (name, category, price, qty)) in items.iter().enumerate() {
            let item = NewItem::new(*name, *category, *qty, Unit::Pieces, price.map(Money::from_cents))
                .into_item(format!("{}-{}", id, i));
            list.items.push(item);
        }
        list
    }

    #[test]
    fn test_budget_status_under_budget() {
        let list = list_with("a", Some(5000), &[("Milk", "dairy", Some(299), 1.0)]);
        let status = BudgetStatus::for_list(&list).unwrap();

        assert_eq!(status.total.cents(), 299);
        assert_eq!(status.remaining.cents(), 4701);
        assert!(!status.is_over_budget);
        assert!((status.percent_used - 5.98).abs() < 1e-9);
    }

    #[test]
    fn test_budget_status_over_budget_caps_percent() {
        let list = list_with("a", Some(1000), &[("Steak", "meat", Some(1500), 1.0)]);
        let status = BudgetStatus::for_list(&list).unwrap();

        assert!(status.is_over_budget);
        assert_eq!(status.percent_used, 100.0);
        assert_eq!(status.remaining.cents(), -500);
    }

    #[test]
    fn test_no_budget_no_status() {
        let list = list_with("a", None, &[("Milk", "dairy", Some(299), 1.0)]);
        assert!(BudgetStatus::for_list(&list).is_none());
    }

    #[test]
    fn test_zero_budget_no_status() {
        let list = list_with("a", Some(0), &[("Milk", "dairy", Some(299), 1.0)]);
        assert_eq!(list.budget, Some(Money::zero()));
        assert!(BudgetStatus::for_list(&list).is_none());
    }

    #[test]
    fn test_group_by_category_first_appearance_order() {
        let categories = default_categories();
        let list = list_with(
            "a",
            None,
            &[
                ("Milk", "dairy", None, 1.0),
                ("Bread", "bakery", None, 1.0),
                ("Cheese", "dairy", None, 1.0),
                ("Mystery", "toys", None, 1.0),
            ],
        );

        let groups = group_by_category(&list.items, &categories);
        let ids: Vec<_> = groups.iter().map(|g| g.category_id).collect();
        assert_eq!(ids, vec!["dairy", "bakery", "toys"]);

        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[0].items[1].name, "Cheese");
        assert_eq!(groups[0].category.map(|c| c.name.as_str()), Some("Dairy"));
        assert!(groups[2].category.is_none());
    }

    #[test]
    fn test_statistics() {
        let categories = default_categories();
        let lists = vec![
            list_with("a", None, &[("Milk", "dairy", Some(299), 1.0)]),
            list_with(
                "b",
                None,
                &[
                    ("Yogurt", "dairy", Some(150), 4.0),
                    ("Widget", "gadgets", None, 1.0),
                ],
            ),
        ];

        let stats = Statistics::compute(&lists, &categories);

        assert_eq!(stats.total_spending.cents(), 899);
        assert_eq!(stats.spending_by_list[0].list_id, "b");
        assert_eq!(stats.spending_by_list[1].list_id, "a");

        assert_eq!(stats.items_by_category[0].category_id, "dairy");
        assert_eq!(stats.items_by_category[0].count, 2);
        assert_eq!(stats.items_by_category[1].name, UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_statistics_empty() {
        let stats = Statistics::compute(&[], &default_categories());
        assert!(stats.is_empty());
        assert!(stats.total_spending.is_zero());
    }

    #[test]
    fn test_list_summary() {
        let mut list = list_with("a", Some(2000), &[("Milk", "dairy", Some(299), 2.0)]);
        list.items[0].is_checked = true;
        let summary = ListSummary::from(&list);
        assert_eq!(summary.item_count, 1);
        assert_eq!(summary.checked_count, 1);
        assert_eq!(summary.checked_total.cents(), 598);
    }
}
