//! # Domain Types
//!
//! Core domain types used throughout Basket.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌─────────────────────┐                │
//! │  │   ShoppingList      │ 1    * │       Item          │                │
//! │  │  ─────────────────  │───────►│  ─────────────────  │                │
//! │  │  id                 │        │  id                 │                │
//! │  │  name               │        │  name, categoryId   │                │
//! │  │  createdAt (fixed)  │        │  quantity + unit    │                │
//! │  │  updatedAt          │        │  price? (unknown)   │                │
//! │  │  budget?            │        │  isChecked          │                │
//! │  └─────────────────────┘        │  comments?, store-  │                │
//! │                                 │  Location?          │                │
//! │                                 └─────────────────────┘                │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────────────────┐  │
//! │  │  Category    │  │    Store     │  │ Unit                         │  │
//! │  │  (fixed set) │  │ (fixed set)  │  │ pcs kg g l ml pack box bottle│  │
//! │  └──────────────┘  └──────────────┘  └──────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Absent vs Zero
//! `price` and `budget` are `Option<Money>`. `None` means "unknown" / "no
//! budget" and is never folded into totals as zero.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Quantity};

// =============================================================================
// Category & Store
// =============================================================================

/// An item category (Dairy, Bakery, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            icon: None,
        }
    }
}

/// A physical retailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Store {
    pub id: String,
    pub name: String,
}

impl Store {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Store {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The built-in category set.
pub fn default_categories() -> Vec<Category> {
    [
        ("produce", "Produce"),
        ("dairy", "Dairy"),
        ("meat", "Meat"),
        ("bakery", "Bakery"),
        ("canned", "Canned Goods"),
        ("frozen", "Frozen Foods"),
        ("beverages", "Beverages"),
        ("snacks", "Snacks"),
        ("household", "Household"),
        ("personal", "Personal Care"),
        ("other", "Other"),
    ]
    .into_iter()
    .map(|(id, name)| Category::new(id, name))
    .collect()
}

/// The built-in store set.
pub fn default_stores() -> Vec<Store> {
    [
        ("grocery", "Grocery Store"),
        ("supermarket", "Supermarket"),
        ("farmers", "Farmers Market"),
        ("convenience", "Convenience Store"),
        ("department", "Department Store"),
        ("online", "Online"),
    ]
    .into_iter()
    .map(|(id, name)| Store::new(id, name))
    .collect()
}

// =============================================================================
// Unit
// =============================================================================

/// Measurement unit label. No conversion semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Unit {
    #[serde(rename = "pcs")]
    Pieces,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "l")]
    Liter,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "pack")]
    Pack,
    #[serde(rename = "box")]
    Box,
    #[serde(rename = "bottle")]
    Bottle,
}

impl Unit {
    /// Every unit, in the order pickers show them.
    pub const ALL: [Unit; 8] = [
        Unit::Pieces,
        Unit::Kilogram,
        Unit::Gram,
        Unit::Liter,
        Unit::Milliliter,
        Unit::Pack,
        Unit::Box,
        Unit::Bottle,
    ];

    /// The short token used in storage and on screen (`"kg"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Unit::Pieces => "pcs",
            Unit::Kilogram => "kg",
            Unit::Gram => "g",
            Unit::Liter => "l",
            Unit::Milliliter => "ml",
            Unit::Pack => "pack",
            Unit::Box => "box",
            Unit::Bottle => "bottle",
        }
    }

    /// Long display name (`"kilograms"`).
    pub const fn label(&self) -> &'static str {
        match self {
            Unit::Pieces => "pieces",
            Unit::Kilogram => "kilograms",
            Unit::Gram => "grams",
            Unit::Liter => "liters",
            Unit::Milliliter => "milliliters",
            Unit::Pack => "pack",
            Unit::Box => "box",
            Unit::Bottle => "bottle",
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Pieces
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Item
// =============================================================================

/// A single purchasable entry within a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Not checked against the category set when written.
    pub category_id: String,
    #[ts(as = "f64")]
    pub quantity: Quantity,
    pub unit: Unit,
    /// `None` = price unknown; excluded from every total.
    #[serde(default)]
    #[ts(as = "Option<f64>")]
    pub price: Option<Money>,
    #[serde(default)]
    pub is_checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_location: Option<String>,
}

impl Item {
    /// `price × quantity`, or `None` when the price is unknown.
    pub fn subtotal(&self) -> Option<Money> {
        self.price.map(|price| price.multiply_quantity(self.quantity))
    }
}

/// Fields supplied when adding an item. The store assigns `id` and sets
/// `is_checked = false`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewItem {
    pub name: String,
    pub category_id: String,
    #[ts(as = "f64")]
    pub quantity: Quantity,
    pub unit: Unit,
    #[serde(default)]
    #[ts(as = "Option<f64>")]
    pub price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_location: Option<String>,
}

impl NewItem {
    /// Shorthand for the common case; optional fields start empty.
    pub fn new(
        name: impl Into<String>,
        category_id: impl Into<String>,
        quantity: impl Into<Quantity>,
        unit: Unit,
        price: Option<Money>,
    ) -> Self {
        NewItem {
            name: name.into(),
            category_id: category_id.into(),
            quantity: quantity.into(),
            unit,
            price,
            comments: None,
            store_location: None,
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    pub fn with_store_location(mut self, location: impl Into<String>) -> Self {
        self.store_location = Some(location.into());
        self
    }

    /// Materializes the item under the given id, unchecked.
    pub fn into_item(self, id: String) -> Item {
        Item {
            id,
            name: self.name,
            category_id: self.category_id,
            quantity: self.quantity,
            unit: self.unit,
            price: self.price,
            is_checked: false,
            comments: self.comments,
            store_location: self.store_location,
        }
    }
}

/// Sparse item update. `None` leaves a field untouched; for the optional
/// fields `Some(None)` clears the value.
///
/// ## Example
/// ```rust
/// use basket_core::{ItemUpdate, Money};
///
/// let update = ItemUpdate {
///     price: Some(Some(Money::from_cents(349))),
///     comments: Some(None),
///     ..Default::default()
/// };
/// assert!(!update.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub category_id: Option<String>,
    pub quantity: Option<Quantity>,
    pub unit: Option<Unit>,
    pub price: Option<Option<Money>>,
    pub is_checked: Option<bool>,
    pub comments: Option<Option<String>>,
    pub store_location: Option<Option<String>>,
}

impl ItemUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ItemUpdate::default()
    }

    /// Merges the present fields into `item`. The id is never touched.
    pub fn apply(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(category_id) = self.category_id {
            item.category_id = category_id;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(unit) = self.unit {
            item.unit = unit;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(is_checked) = self.is_checked {
            item.is_checked = is_checked;
        }
        if let Some(comments) = self.comments {
            item.comments = comments;
        }
        if let Some(store_location) = self.store_location {
            item.store_location = store_location;
        }
    }
}

// =============================================================================
// Shopping List
// =============================================================================

/// A named, budgetable collection of items. The aggregate root.
///
/// ## Invariants
/// - item ids are unique within `items`
/// - `updated_at >= created_at`
/// - `items` keeps insertion order; there is no other sort key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShoppingList {
    pub id: String,
    pub name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    /// `None` = no budget tracking for this list.
    #[serde(default)]
    #[ts(as = "Option<f64>")]
    pub budget: Option<Money>,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl ShoppingList {
    /// Creates an empty list stamped with the current time, truncated to
    /// the millisecond precision timestamps are stored with.
    pub fn new(id: impl Into<String>, name: impl Into<String>, budget: Option<Money>) -> Self {
        Self::new_at(id, name, budget, Utc::now().trunc_subsecs(3))
    }

    /// Creates an empty list with an explicit creation time.
    pub fn new_at(
        id: impl Into<String>,
        name: impl Into<String>,
        budget: Option<Money>,
        now: DateTime<Utc>,
    ) -> Self {
        ShoppingList {
            id: id.into(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            budget,
            items: Vec::new(),
        }
    }

    /// Bumps `updated_at`, never below `created_at`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    pub fn contains_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|i| i.id == item_id)
    }

    /// Like [`item_mut`](Self::item_mut), but reports which list missed.
    pub fn require_item_mut(&mut self, item_id: &str) -> CoreResult<&mut Item> {
        let list_id = &self.id;
        self.items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| CoreError::ItemNotFound {
                list_id: list_id.clone(),
                item_id: item_id.to_string(),
            })
    }

    /// Index of the item in `items`.
    pub fn item_position(&self, item_id: &str) -> CoreResult<usize> {
        self.items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| CoreError::ItemNotFound {
                list_id: self.id.clone(),
                item_id: item_id.to_string(),
            })
    }

    /// Sum of `price × quantity` over priced items.
    pub fn total(&self) -> Money {
        self.items.iter().filter_map(Item::subtotal).sum()
    }

    /// Same as [`total`](Self::total), restricted to checked items.
    pub fn checked_total(&self) -> Money {
        self.items
            .iter()
            .filter(|i| i.is_checked)
            .filter_map(Item::subtotal)
            .sum()
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_checked).count()
    }
}

/// Index of the list with `id` in `lists`.
pub fn list_position(lists: &[ShoppingList], id: &str) -> CoreResult<usize> {
    lists
        .iter()
        .position(|l| l.id == id)
        .ok_or_else(|| CoreError::ListNotFound(id.to_string()))
}

/// The list with `id`, mutably.
pub fn find_list_mut<'a>(lists: &'a mut [ShoppingList], id: &str) -> CoreResult<&'a mut ShoppingList> {
    lists
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or_else(|| CoreError::ListNotFound(id.to_string()))
}

/// Sparse list update. Identity, `created_at` and `items` are not
/// updatable through this descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListUpdate {
    pub name: Option<String>,
    /// `Some(None)` removes the budget.
    pub budget: Option<Option<Money>>,
}

impl ListUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        ListUpdate {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn budget(budget: Option<Money>) -> Self {
        ListUpdate {
            budget: Some(budget),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ListUpdate::default()
    }

    pub fn apply(self, list: &mut ShoppingList) {
        if let Some(name) = self.name {
            list.name = name;
        }
        if let Some(budget) = self.budget {
            list.budget = budget;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
