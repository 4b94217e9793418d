//! Expiration evaluator
//!
//! Given "today" and a lookback, finds the pantry items expiring on the
//! target date and classifies the result into a notification payload. Pure
//! read plus string assembly; the caller dispatches any payload to the
//! notifier. A storage failure abandons the whole tick: the trigger fires
//! again tomorrow, so there is nothing to recover here.

use chrono::NaiveDate;

use crate::core::lookback::Lookback;
use crate::core::notifier::NotificationPayload;
use crate::core::store::{PantryItemInfo, Store, StoreError};

/// Evaluate which pantry items are due for a reminder.
///
/// Returns `None` when nothing expires on the target date; the notifier
/// must not be invoked in that case.
pub fn evaluate(
    store: &Store,
    today: NaiveDate,
    lookback: Lookback,
) -> Result<Option<NotificationPayload>, StoreError> {
    let target = lookback.target_date(today);
    let due = store.pantry_by_date(&target)?;
    Ok(build_payload(&due, lookback))
}

fn build_payload(due: &[PantryItemInfo], lookback: Lookback) -> Option<NotificationPayload> {
    match due {
        [] => None,
        [only] => Some(NotificationPayload {
            title: "An Item will expire soon".to_string(),
            body: format!("{} will expire in {}.", only.name, lookback.phrase()),
        }),
        many => {
            let names: Vec<&str> = many.iter().map(|info| info.name.as_str()).collect();
            Some(NotificationPayload {
                title: "Items are about to expire".to_string(),
                body: format!(
                    "{} will all expire in {}.",
                    names.join(" "),
                    lookback.phrase()
                ),
            })
        }
    }
}
