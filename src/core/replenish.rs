//! Auto-replenishment policy
//!
//! When enabled, pantry items whose user expiration equals today are moved
//! onto the shopping list: a shopping row is inserted with the pantry
//! quantity, then the pantry quantity is zeroed (the row is retained).
//! Items are processed independently; one failure never blocks the rest.
//!
//! No merge is attempted against an existing shopping row for the same
//! item, so running the policy twice in one day produces duplicate rows.
//! That matches the shipped behavior; duplicates are surfaced in the
//! outcome so the caller can warn about them.

use chrono::NaiveDate;

use crate::core::dates::format_date;
use crate::core::store::{Store, StoreError};

/// What a replenishment pass did.
#[derive(Debug, Default)]
pub struct ReplenishOutcome {
    /// Policy was enabled in settings.
    pub enabled: bool,
    /// Item names moved onto the shopping list.
    pub moved: Vec<String>,
    /// Names that already had a shopping row before the move.
    pub duplicates: Vec<String>,
    /// Names whose move failed, with the failure text.
    pub failures: Vec<(String, String)>,
}

/// Run the policy for "today". Gated by `settings.auto_populate`.
pub fn replenish(store: &Store, today: NaiveDate) -> Result<ReplenishOutcome, StoreError> {
    let mut outcome = ReplenishOutcome::default();

    let settings = store.settings()?;
    if !settings.auto_populate {
        return Ok(outcome);
    }
    outcome.enabled = true;

    let expired = store.pantry_by_date(&format_date(today))?;

    for info in expired {
        match move_to_shopping(store, &info.name) {
            Ok(was_duplicate) => {
                if was_duplicate {
                    outcome.duplicates.push(info.name.clone());
                }
                outcome.moved.push(info.name);
            }
            Err(e) => outcome.failures.push((info.name, e.to_string())),
        }
    }

    Ok(outcome)
}

/// Insert a shopping row carrying the item's pantry quantity, then zero the
/// pantry quantity. Returns whether a shopping row already existed.
fn move_to_shopping(store: &Store, name: &str) -> Result<bool, StoreError> {
    let item_id = store
        .item_id(name)?
        .ok_or_else(|| StoreError::UnknownItem(name.to_string()))?;
    let was_duplicate = store.shopping_exists(name)?;

    let quantity = store.pantry_quantity(name)?.unwrap_or(0);
    store.insert_shopping(item_id, quantity)?;
    store.set_pantry_quantity(name, 0)?;

    Ok(was_duplicate)
}
