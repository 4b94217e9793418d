//! Row types returned by the store

use serde::Serialize;

/// An item profile: what a product is and how long it keeps.
///
/// Created once per product name; pantry and shopping rows reference it.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub item_id: i64,
    pub category: String,
    pub name: String,
    /// Default days from acquisition to expiry. A period, not a date.
    pub shelf_life_days: i64,
}

/// A stocked quantity of an item with a concrete expiration date.
#[derive(Debug, Clone, Serialize)]
pub struct PantryEntry {
    pub pantry_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    /// User-entered or shelf-life-derived expiration, `YYYY-MM-DD`.
    pub user_expiration: Option<String>,
    /// Far-future sentinel used when no user expiration applies.
    pub fallback_expiration: String,
}

/// A requested-for-purchase quantity of an item.
#[derive(Debug, Clone, Serialize)]
pub struct ShoppingEntry {
    pub sl_id: i64,
    pub item_id: i64,
    pub quantity: i64,
}

/// Pantry row joined with its item profile.
#[derive(Debug, Clone, Serialize)]
pub struct PantryItemInfo {
    pub category: String,
    pub name: String,
    pub quantity: i64,
    pub user_expiration: Option<String>,
    pub fallback_expiration: String,
}

/// Shopping row joined with its item profile. Expiration is irrelevant here.
#[derive(Debug, Clone, Serialize)]
pub struct ShoppingItemInfo {
    pub category: String,
    pub name: String,
    pub quantity: i64,
}

/// The single persistent settings row.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub use_user_expiration: bool,
    /// Day offset of the configured lookback label, one of {1,2,5,7,14}.
    pub lookback_days: i64,
    pub auto_populate: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_user_expiration: false,
            lookback_days: 1,
            auto_populate: false,
        }
    }
}

/// Store statistics for `larder store status`.
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub items: usize,
    pub pantry_entries: usize,
    pub shopping_entries: usize,
    pub db_size_bytes: u64,
}
